//! Project details overlay.
//!
//! At most one overlay is open at a time. Opening populates every slot from a
//! catalog record and locks background scrolling; closing hides it and
//! unlocks scrolling. The lock is always the complement of "closed".

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, ProjectRecord};
use crate::dom::{Document, ModalField};

/// Observable overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalState {
    /// Whether the overlay is shown.
    pub is_open: bool,
    /// Project currently displayed.
    pub active_project: Option<String>,
}

/// Renders catalog records into the overlay.
#[derive(Debug, Clone, Default)]
pub struct ModalPresenter {
    state: ModalState,
}

impl ModalPresenter {
    /// Create a closed presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Project currently displayed, if open.
    #[must_use]
    pub fn active_project(&self) -> Option<&str> {
        self.state.active_project.as_deref()
    }

    /// Show the record for `project_id`.
    ///
    /// Unknown ids, and pages without an overlay, leave everything as it was.
    /// Opening while already open replaces the displayed record.
    pub fn open<D: Document>(&mut self, doc: &mut D, catalog: &Catalog, project_id: &str) -> bool {
        let Some(record) = catalog.get(project_id) else {
            debug!(project_id, "Ignoring unknown project");
            return false;
        };
        if !doc.has_modal() {
            debug!(project_id, "Page has no project overlay");
            return false;
        }

        populate(doc, record);
        doc.set_modal_visible(true);
        doc.set_body_scroll_locked(true);

        self.state = ModalState {
            is_open: true,
            active_project: Some(record.id.clone()),
        };
        debug!(project_id, "Project overlay opened");
        true
    }

    /// Hide the overlay and restore background scrolling.
    ///
    /// Safe to call when already closed. Returns whether it was open.
    pub fn close<D: Document>(&mut self, doc: &mut D) -> bool {
        let was_open = self.state.is_open;
        doc.set_modal_visible(false);
        doc.set_body_scroll_locked(false);
        self.state = ModalState::default();
        if was_open {
            debug!("Project overlay closed");
        }
        was_open
    }
}

fn populate<D: Document>(doc: &mut D, record: &ProjectRecord) {
    for field in ModalField::ALL {
        let text = match field {
            ModalField::Title => record.title.as_str(),
            ModalField::Period => record.period.as_str(),
            ModalField::Category => record.category.as_str(),
            ModalField::Overview => record.overview.as_str(),
            ModalField::Methodology => record.methodology.as_deref().unwrap_or_default(),
            ModalField::Results => record.results.as_str(),
            ModalField::TechStack => record.tech_stack.as_str(),
        };
        if !doc.set_modal_field(field, text) {
            debug!(%field, "Overlay slot missing");
        }
    }
    doc.set_workflow_items(&record.workflow);
}
