//! Scripted sessions.
//!
//! A replay script is a JSON document describing a starting URL fragment, an
//! optional page layout and a list of interaction steps. Running it drives a
//! [`Portfolio`] over an in-memory page and reports the outcome of every step
//! and the final state of the page.
//!
//! ```json
//! {
//!   "hash": "projects",
//!   "steps": [
//!     { "type": "click", "role": { "project_trigger": "unieuro-forecasting" } },
//!     { "type": "key", "key": "Escape" },
//!     { "type": "click", "role": { "nav_link": "home" } },
//!     { "type": "back" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{Event, Key, Outcome, Portfolio, PortfolioState, Role};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::dom::{ElementRect, History, ModalField};
use crate::error::{Error, Result};
use crate::memory::{MemoryDocument, MemoryHistory, PageLayout};
use crate::navigation::SectionIntersection;
use crate::reveal::RevealIntersection;

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Click an element with the given role.
    Click {
        /// Role of the clicked element.
        role: Role,
    },
    /// Press a key.
    Key {
        /// Key name, as in `KeyboardEvent.key`.
        key: Key,
    },
    /// Press the browser's back button.
    Back,
    /// Press the browser's forward button.
    Forward,
    /// Sections entered the scroll-spy band, in order.
    Spy {
        /// Section ids.
        sections: Vec<String>,
    },
    /// Reveal targets scrolled into view.
    Reveal {
        /// Element keys.
        elements: Vec<String>,
    },
    /// The page scrolled; sections now sit at these positions.
    SpyScroll {
        /// Viewport height in pixels.
        viewport_height: f64,
        /// Section positions relative to the viewport top.
        sections: Vec<ElementRect>,
    },
    /// The page scrolled; reveal targets now sit at these positions.
    RevealScroll {
        /// Viewport height in pixels.
        viewport_height: f64,
        /// Reveal target positions relative to the viewport top.
        elements: Vec<ElementRect>,
    },
}

/// A scripted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    /// Address fragment at page load.
    pub hash: String,
    /// Page layout; defaults to one section and link per configured section.
    pub layout: Option<PageLayout>,
    /// Steps to run, in order.
    pub steps: Vec<Step>,
}

impl ReplayScript {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReplayScript`] if the JSON does not describe a script.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::replay_script(e.to_string()))
    }

    /// Load a script from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|e| Error::replay_script(format!("{}: {e}", path.display())))
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Position in the script.
    pub index: usize,
    /// The step.
    pub step: Step,
    /// What it did.
    pub outcome: Outcome,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Outcome of the page-load activation.
    pub start: Outcome,
    /// Per-step outcomes.
    pub steps: Vec<StepReport>,
    /// Final session state.
    pub state: PortfolioState,
    /// Final address fragment.
    pub fragment: String,
    /// Final number of history entries.
    pub history_length: usize,
    /// Whether background scrolling is locked at the end.
    pub body_scroll_locked: bool,
    /// Overlay slot contents, keyed by element id.
    pub modal_fields: BTreeMap<String, String>,
    /// Workflow list items.
    pub workflow: Vec<String>,
}

/// Run a script against an in-memory page.
#[must_use]
pub fn run(script: &ReplayScript, catalog: Catalog, config: &Config) -> ReplayReport {
    let layout = script
        .layout
        .clone()
        .unwrap_or_else(|| PageLayout::with_sections(&config.site.sections));
    let mut app = Portfolio::new(
        MemoryDocument::new(&layout),
        MemoryHistory::new(&script.hash),
        catalog,
        config,
    );

    let start = app.start();
    let steps = script
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let outcome = perform(&mut app, step);
            debug!(index, ?step, ?outcome, "Replay step");
            StepReport {
                index,
                step: step.clone(),
                outcome,
            }
        })
        .collect();

    let doc = app.document();
    let modal_fields = ModalField::ALL
        .iter()
        .filter_map(|&field| {
            doc.modal_field(field)
                .map(|text| (field.element_id().to_string(), text.to_string()))
        })
        .collect();

    ReplayReport {
        start,
        steps,
        state: app.state(),
        fragment: app.history().fragment(),
        history_length: app.history().len(),
        body_scroll_locked: doc.body_scroll_locked(),
        modal_fields,
        workflow: doc.workflow_items().to_vec(),
    }
}

fn perform(app: &mut Portfolio<MemoryDocument, MemoryHistory>, step: &Step) -> Outcome {
    match step {
        Step::Click { role } => app.dispatch(Event::Click(role.clone())),
        Step::Key { key } => app.dispatch(Event::KeyDown(key.clone())),
        Step::Back => {
            if !app.history_mut().back() {
                return Outcome::Ignored;
            }
            let entry = app.history().state().cloned();
            app.dispatch(Event::PopState(entry))
        }
        Step::Forward => {
            if !app.history_mut().forward() {
                return Outcome::Ignored;
            }
            let entry = app.history().state().cloned();
            app.dispatch(Event::PopState(entry))
        }
        Step::Spy { sections } => app.dispatch(Event::SectionIntersections(
            sections
                .iter()
                .map(|section| SectionIntersection {
                    section: section.clone(),
                    is_intersecting: true,
                })
                .collect(),
        )),
        Step::Reveal { elements } => app.dispatch(Event::RevealIntersections(
            elements
                .iter()
                .map(|element| RevealIntersection {
                    element: element.clone(),
                    is_intersecting: true,
                })
                .collect(),
        )),
        Step::SpyScroll {
            viewport_height,
            sections,
        } => {
            let entries = app
                .navigation()
                .band()
                .intersections(sections, *viewport_height);
            app.dispatch(Event::SectionIntersections(entries))
        }
        Step::RevealScroll {
            viewport_height,
            elements,
        } => match app.reveal_options() {
            Some(options) => {
                let entries = options.intersections(elements, *viewport_height);
                app.dispatch(Event::RevealIntersections(entries))
            }
            None => Outcome::Ignored,
        },
    }
}
