//! `folio` - navigation core for a single-page portfolio site
//!
//! This library owns the behavior of a portfolio page: switching between
//! content sections, highlighting the active navigation link, showing project
//! details in an overlay, and revealing elements as they scroll into view. The
//! page itself is reached through the [`dom::Document`] and [`dom::History`]
//! traits, so the same logic runs in the browser and in memory.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod catalog;
pub mod click;
pub mod cli;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod memory;
pub mod modal;
pub mod navigation;
pub mod replay;
pub mod reveal;

pub use app::{Event, Key, Outcome, Portfolio, Role};
pub use catalog::{Catalog, ProjectRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use navigation::{NavigationController, NavigationMode};
