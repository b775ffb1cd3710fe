//! The page seam.
//!
//! The navigation, modal and reveal components never touch a concrete DOM.
//! They address page elements by logical role through [`Document`] and talk
//! to the address bar through [`History`]. The browser binding lives in the
//! `folio-web` crate; [`crate::memory`] provides an in-memory page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A text slot in the project details overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalField {
    /// Project title.
    Title,
    /// Project period.
    Period,
    /// Project category.
    Category,
    /// Overview paragraph.
    Overview,
    /// Methodology paragraph.
    Methodology,
    /// Results paragraph.
    Results,
    /// Tech stack line.
    TechStack,
}

impl ModalField {
    /// Every text slot, in display order.
    pub const ALL: [ModalField; 7] = [
        Self::Title,
        Self::Period,
        Self::Category,
        Self::Overview,
        Self::Methodology,
        Self::Results,
        Self::TechStack,
    ];

    /// Element id of the slot on the page.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Title => "modal-title",
            Self::Period => "modal-period",
            Self::Category => "modal-category",
            Self::Overview => "modal-overview",
            Self::Methodology => "modal-methodology",
            Self::Results => "modal-results",
            Self::TechStack => "modal-tech-stack",
        }
    }
}

impl fmt::Display for ModalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Element id of the workflow list in the overlay.
pub const WORKFLOW_LIST_ID: &str = "modal-workflow";

/// Element id of the overlay root.
pub const MODAL_ID: &str = "project-modal";

/// How a scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
    /// Jump without animation.
    Instant,
}

/// Vertical extent of a page element relative to the viewport top, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    /// Section id or reveal key.
    pub id: String,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl ElementRect {
    /// Height of the element; never negative.
    #[must_use]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Payload stored with each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Section that was active when the entry was written.
    pub section: String,
}

impl HistoryEntry {
    /// Create an entry for a section.
    #[must_use]
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }

    /// URL written alongside the entry.
    #[must_use]
    pub fn url(&self) -> String {
        format!("#{}", self.section)
    }

    /// The entry as the JSON text stored in `history.state`.
    #[must_use]
    pub fn to_state_json(&self) -> String {
        serde_json::json!({ "section": self.section }).to_string()
    }

    /// Read an entry back from `history.state` JSON. State written by other
    /// scripts, or no state at all (`null`), yields `None`.
    #[must_use]
    pub fn from_state_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// Role-addressed access to the page.
///
/// Every method degrades silently when the addressed element is missing:
/// setters do nothing and report `false` where a result is returned.
pub trait Document {
    /// Whether a section element with this id exists.
    fn has_section(&self, id: &str) -> bool;

    /// Ids of all section elements, in page order.
    fn section_ids(&self) -> Vec<String>;

    /// Toggle the active state of a section.
    fn set_section_active(&mut self, id: &str, active: bool);

    /// Target section ids of the navigation links, in page order.
    fn nav_link_targets(&self) -> Vec<String>;

    /// Index of the first navigation link currently styled active.
    fn active_nav_link(&self) -> Option<usize>;

    /// Toggle the active style of the navigation link at `index`.
    fn set_nav_link_active(&mut self, index: usize, active: bool);

    /// Whether the overlay root exists.
    fn has_modal(&self) -> bool;

    /// Show or hide the overlay.
    fn set_modal_visible(&mut self, visible: bool);

    /// Write text into an overlay slot. Returns `false` if the slot is missing.
    fn set_modal_field(&mut self, field: ModalField, text: &str) -> bool;

    /// Replace the workflow list with one item per entry.
    /// Returns `false` if the list is missing.
    fn set_workflow_items(&mut self, items: &[String]) -> bool;

    /// Lock or unlock background scrolling of the page body.
    fn set_body_scroll_locked(&mut self, locked: bool);

    /// Scroll the viewport to the top of the page.
    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    /// Scroll a section into view.
    fn scroll_into_view(&mut self, section: &str, behavior: ScrollBehavior);

    /// Keys of the elements that take part in the scroll-reveal effect.
    fn reveal_targets(&self) -> Vec<String>;

    /// Set an inline style property on a reveal target.
    fn set_style(&mut self, element: &str, property: &str, value: &str);
}

/// Access to the browser's session history.
pub trait History {
    /// Current address fragment without the leading `#`.
    fn fragment(&self) -> String;

    /// Push a new entry, making it current.
    fn push(&mut self, entry: &HistoryEntry);

    /// Overwrite the current entry.
    fn replace(&mut self, entry: &HistoryEntry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_field_element_ids() {
        assert_eq!(ModalField::Title.element_id(), "modal-title");
        assert_eq!(ModalField::TechStack.element_id(), "modal-tech-stack");
        assert_eq!(ModalField::Methodology.to_string(), "modal-methodology");
    }

    #[test]
    fn test_all_fields_unique() {
        let mut ids: Vec<&str> = ModalField::ALL.iter().map(|f| f.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ModalField::ALL.len());
    }

    #[test]
    fn test_history_entry_url() {
        let entry = HistoryEntry::new("projects");
        assert_eq!(entry.url(), "#projects");
    }

    #[test]
    fn test_history_state_json_round_trip() {
        let entry = HistoryEntry::new("projects");
        let json = entry.to_state_json();
        assert_eq!(json, r#"{"section":"projects"}"#);
        assert_eq!(HistoryEntry::from_state_json(&json), Some(entry));
    }

    #[test]
    fn test_foreign_history_state_is_ignored() {
        assert_eq!(HistoryEntry::from_state_json("null"), None);
        assert_eq!(HistoryEntry::from_state_json(r#"{"page":3}"#), None);
        assert_eq!(HistoryEntry::from_state_json(r#"{"section":7}"#), None);
        assert_eq!(HistoryEntry::from_state_json("not json"), None);
    }

    #[test]
    fn test_element_rect_height() {
        let rect = ElementRect {
            id: "about".to_string(),
            top: 120.0,
            bottom: 480.0,
        };
        assert!((rect.height() - 360.0).abs() < f64::EPSILON);
        let inverted = ElementRect {
            id: "x".to_string(),
            top: 10.0,
            bottom: 5.0,
        };
        assert!(inverted.height().abs() < f64::EPSILON);
    }

    #[test]
    fn test_history_entry_serialization() {
        let json = serde_json::to_string(&HistoryEntry::new("home")).unwrap();
        assert_eq!(json, r#"{"section":"home"}"#);
    }
}
