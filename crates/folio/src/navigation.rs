//! Section navigation.
//!
//! The [`NavigationController`] keeps exactly one section active, mirrors the
//! choice onto the navigation links, and either records it in session history
//! (hash-routed pages) or leaves history alone and lets the viewport position
//! drive the highlight (scroll-spy pages).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dom::{Document, ElementRect, History, HistoryEntry, ScrollBehavior};

/// How the page maps sections to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// One section visible at a time, location kept in the URL fragment.
    #[default]
    HashRouted,
    /// All sections stacked on one page, highlight follows scroll position.
    ScrollSpy,
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashRouted => write!(f, "hash_routed"),
            Self::ScrollSpy => write!(f, "scroll_spy"),
        }
    }
}

/// Whether an activation writes a new history entry or overwrites the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// User navigation: new back-stack entry, animated scroll.
    Push,
    /// Initial load or history restore: no new entry, no scroll.
    Replace,
}

/// Direction of a keyboard step through the navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous link (`ArrowLeft`).
    Previous,
    /// Next link (`ArrowRight`).
    Next,
}

/// The vertical band of the viewport used by scroll-spy, as fractions of
/// the viewport height measured from the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpyBand {
    /// Upper edge of the band.
    pub top: f64,
    /// Lower edge of the band.
    pub bottom: f64,
}

impl Default for SpyBand {
    fn default() -> Self {
        Self {
            top: 0.2,
            bottom: 0.7,
        }
    }
}

impl SpyBand {
    /// Observer root margin that shrinks the viewport to this band.
    #[must_use]
    pub fn root_margin(&self) -> String {
        let top = (self.top * 100.0).round();
        let bottom = ((1.0 - self.bottom) * 100.0).round();
        format!("-{top}% 0px -{bottom}% 0px")
    }

    /// Whether an element spanning `top..bottom` (pixels from the viewport
    /// top) overlaps the band.
    #[must_use]
    pub fn overlaps(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let band_top = self.top * viewport_height;
        let band_bottom = self.bottom * viewport_height;
        top < band_bottom && bottom > band_top
    }

    /// Scroll-spy observations for elements at the given positions.
    #[must_use]
    pub fn intersections(
        &self,
        rects: &[ElementRect],
        viewport_height: f64,
    ) -> Vec<SectionIntersection> {
        rects
            .iter()
            .map(|rect| SectionIntersection {
                section: rect.id.clone(),
                is_intersecting: self.overlaps(rect.top, rect.bottom, viewport_height),
            })
            .collect()
    }
}

/// One scroll-spy observation for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionIntersection {
    /// Observed section id.
    pub section: String,
    /// Whether the section now overlaps the band.
    pub is_intersecting: bool,
}

/// Owns the navigation state of one page session.
#[derive(Debug, Clone)]
pub struct NavigationController {
    mode: NavigationMode,
    default_section: String,
    band: SpyBand,
    current: Option<String>,
}

impl NavigationController {
    /// Create a controller. No section is active until the first activation.
    #[must_use]
    pub fn new(mode: NavigationMode, default_section: impl Into<String>) -> Self {
        Self {
            mode,
            default_section: default_section.into(),
            band: SpyBand::default(),
            current: None,
        }
    }

    /// Use a custom scroll-spy band.
    #[must_use]
    pub fn with_band(mut self, band: SpyBand) -> Self {
        self.band = band;
        self
    }

    /// The navigation mode.
    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// The scroll-spy band.
    #[must_use]
    pub fn band(&self) -> SpyBand {
        self.band
    }

    /// Section shown when the location names none.
    #[must_use]
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// The active section, if any activation has succeeded.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Make `section` the active section.
    ///
    /// Unknown sections are ignored and leave the current state untouched.
    /// Returns whether the activation happened.
    pub fn activate<D: Document, H: History>(
        &mut self,
        doc: &mut D,
        history: &mut H,
        section: &str,
        mode: HistoryMode,
    ) -> bool {
        if !doc.has_section(section) {
            debug!(section, "Ignoring activation of unknown section");
            return false;
        }

        self.highlight(doc, section);

        match self.mode {
            NavigationMode::HashRouted => {
                if history.fragment() != section {
                    let entry = HistoryEntry::new(section);
                    match mode {
                        HistoryMode::Push => history.push(&entry),
                        HistoryMode::Replace => history.replace(&entry),
                    }
                }
                if mode == HistoryMode::Push {
                    doc.scroll_to_top(ScrollBehavior::Smooth);
                }
            }
            NavigationMode::ScrollSpy => {
                if mode == HistoryMode::Push {
                    doc.scroll_into_view(section, ScrollBehavior::Smooth);
                }
            }
        }

        debug!(section, ?mode, "Section activated");
        true
    }

    /// Activate the section named by the address fragment, or the default
    /// section when the fragment is empty. Never adds a back-stack entry.
    pub fn activate_from_location<D: Document, H: History>(
        &mut self,
        doc: &mut D,
        history: &mut H,
    ) -> bool {
        let fragment = history.fragment();
        let section = if fragment.is_empty() {
            self.default_section.clone()
        } else {
            fragment
        };
        self.activate(doc, history, &section, HistoryMode::Replace)
    }

    /// Restore the section after a back/forward traversal.
    ///
    /// The entry payload wins, then the fragment, then the default section.
    pub fn restore<D: Document, H: History>(
        &mut self,
        doc: &mut D,
        history: &mut H,
        entry: Option<&HistoryEntry>,
    ) -> bool {
        let section = match entry {
            Some(entry) => entry.section.clone(),
            None => {
                let fragment = history.fragment();
                if fragment.is_empty() {
                    self.default_section.clone()
                } else {
                    fragment
                }
            }
        };
        self.activate(doc, history, &section, HistoryMode::Replace)
    }

    /// Move to the previous or next navigation link, relative to the link
    /// currently styled active. No-op at either end of the list.
    pub fn step<D: Document, H: History>(
        &mut self,
        doc: &mut D,
        history: &mut H,
        direction: Direction,
    ) -> bool {
        let targets = doc.nav_link_targets();
        let current = doc.active_nav_link();

        let target = match (direction, current) {
            (Direction::Previous, Some(i)) if i > 0 => Some(i - 1),
            (Direction::Next, Some(i)) if i + 1 < targets.len() => Some(i + 1),
            (Direction::Next, None) if !targets.is_empty() => Some(0),
            _ => None,
        };

        match target {
            Some(index) => self.activate(doc, history, &targets[index], HistoryMode::Push),
            None => {
                trace!(?direction, ?current, "Keyboard step at boundary");
                false
            }
        }
    }

    /// Feed scroll-spy observations. The last section in the batch that
    /// entered the band becomes active; history and scroll are untouched.
    ///
    /// Hash-routed pages ignore observations: their active section always
    /// matches the address fragment.
    pub fn observe_sections<D: Document>(
        &mut self,
        doc: &mut D,
        entries: &[SectionIntersection],
    ) -> Option<String> {
        if self.mode != NavigationMode::ScrollSpy {
            trace!(count = entries.len(), "Scroll-spy observations ignored");
            return None;
        }

        let entered = entries
            .iter()
            .rev()
            .find(|e| e.is_intersecting && doc.has_section(&e.section))?;

        if self.current.as_deref() == Some(entered.section.as_str()) {
            return None;
        }

        let section = entered.section.clone();
        self.highlight(doc, &section);
        trace!(section, "Scroll-spy highlight");
        Some(section)
    }

    fn highlight<D: Document>(&mut self, doc: &mut D, section: &str) {
        for id in doc.section_ids() {
            doc.set_section_active(&id, false);
        }
        doc.set_section_active(section, true);

        let targets = doc.nav_link_targets();
        let link = targets.iter().position(|t| t == section);
        for index in 0..targets.len() {
            doc.set_nav_link_active(index, Some(index) == link);
        }

        self.current = Some(section.to_string());
    }
}
