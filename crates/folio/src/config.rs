//! Configuration management for folio.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::navigation::{NavigationMode, SpyBand};
use crate::reveal::RevealOptions;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "folio";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FOLIO_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/folio/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout and navigation.
    pub site: SiteConfig,
    /// Scroll-spy configuration.
    pub scroll_spy: ScrollSpyConfig,
    /// Scroll-reveal configuration.
    pub reveal: RevealConfig,
}

/// Site-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Navigation mode.
    pub mode: NavigationMode,
    /// Section shown when the address fragment is empty.
    pub default_section: String,
    /// Section ids, in page order.
    pub sections: Vec<String>,
    /// JSON catalog to use instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

/// Scroll-spy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    /// Upper edge of the highlight band, as a fraction of viewport height.
    pub band_top: f64,
    /// Lower edge of the highlight band, as a fraction of viewport height.
    pub band_bottom: f64,
}

/// Scroll-reveal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Enable the reveal effect.
    pub enabled: bool,
    /// CSS selectors of the elements to reveal.
    pub selectors: Vec<String>,
    /// Effect tunables.
    #[serde(flatten)]
    pub options: RevealOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::HashRouted,
            default_section: "home".to_string(),
            sections: default_sections(),
            catalog_path: None,
        }
    }
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        let band = SpyBand::default();
        Self {
            band_top: band.top,
            band_bottom: band.bottom,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selectors: default_reveal_selectors(),
            options: RevealOptions::default(),
        }
    }
}

/// Default page sections, in navigation order.
#[must_use]
pub fn default_sections() -> Vec<String> {
    ["home", "about", "experience", "projects", "skills", "contact"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default selectors of scroll-reveal targets.
fn default_reveal_selectors() -> Vec<String> {
    vec![
        ".project-card".to_string(),
        ".timeline-item".to_string(),
        ".skills-category".to_string(),
        ".certification-card".to_string(),
        ".language-item".to_string(),
    ]
}

impl ScrollSpyConfig {
    /// The configured band.
    #[must_use]
    pub fn band(&self) -> SpyBand {
        SpyBand {
            top: self.band_top,
            bottom: self.band_bottom,
        }
    }
}

impl RevealConfig {
    /// Selectors joined into a single selector list.
    #[must_use]
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FOLIO_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        // Validate site config
        if self.site.sections.is_empty() {
            return Err(Error::config_validation("sections must not be empty"));
        }
        if !self.site.sections.contains(&self.site.default_section) {
            return Err(Error::config_validation(format!(
                "default_section ({}) is not one of the configured sections",
                self.site.default_section
            )));
        }

        // Validate scroll-spy band
        let band = self.scroll_spy.band();
        if !(0.0..=1.0).contains(&band.top) || !(0.0..=1.0).contains(&band.bottom) {
            return Err(Error::config_validation(
                "band_top and band_bottom must be between 0 and 1",
            ));
        }
        if band.top >= band.bottom {
            return Err(Error::config_validation(format!(
                "band_top ({}) must be less than band_bottom ({})",
                band.top, band.bottom
            )));
        }

        // Validate reveal options
        let threshold = self.reveal.options.threshold;
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(Error::config_validation(format!(
                "reveal threshold ({threshold}) must be in (0, 1]"
            )));
        }

        Ok(())
    }
}
