//! In-memory page and history.
//!
//! [`MemoryDocument`] and [`MemoryHistory`] implement the page seam without a
//! browser. They back the unit tests and the `folio replay` command, and
//! record every side effect (scrolls, history writes, inline styles) so that
//! callers can inspect what a session did.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, History, HistoryEntry, ModalField, ScrollBehavior};

/// Shape of an in-memory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Section ids, in page order.
    pub sections: Vec<String>,
    /// Navigation link targets, in page order.
    pub nav_links: Vec<String>,
    /// Whether the page carries the project overlay.
    pub modal: bool,
    /// Overlay slots that are absent from the page.
    pub missing_fields: Vec<ModalField>,
    /// Keys of scroll-reveal targets.
    pub reveal_targets: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::with_sections(&crate::config::default_sections())
    }
}

impl PageLayout {
    /// A layout with one section and one navigation link per id.
    #[must_use]
    pub fn with_sections<S: AsRef<str>>(sections: &[S]) -> Self {
        let sections: Vec<String> = sections.iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            nav_links: sections.clone(),
            sections,
            modal: true,
            missing_fields: Vec::new(),
            reveal_targets: Vec::new(),
        }
    }
}

/// A recorded scroll request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollRecord {
    /// Scroll to the top of the page.
    Top {
        /// Requested animation.
        behavior: ScrollBehavior,
    },
    /// Scroll a section into view.
    IntoView {
        /// Target section.
        section: String,
        /// Requested animation.
        behavior: ScrollBehavior,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Flagged {
    id: String,
    active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Overlay {
    visible: bool,
    fields: BTreeMap<ModalField, String>,
    missing: Vec<ModalField>,
    workflow: Vec<String>,
}

/// A page held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    sections: Vec<Flagged>,
    nav_links: Vec<Flagged>,
    modal: Option<Overlay>,
    body_scroll_locked: bool,
    scrolls: Vec<ScrollRecord>,
    reveal_order: Vec<String>,
    styles: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryDocument {
    /// Build a page from a layout. Everything starts inactive and hidden.
    #[must_use]
    pub fn new(layout: &PageLayout) -> Self {
        let flag = |ids: &[String]| {
            ids.iter()
                .map(|id| Flagged {
                    id: id.clone(),
                    active: false,
                })
                .collect()
        };
        Self {
            sections: flag(&layout.sections),
            nav_links: flag(&layout.nav_links),
            modal: layout.modal.then(|| Overlay {
                missing: layout.missing_fields.clone(),
                ..Overlay::default()
            }),
            body_scroll_locked: false,
            scrolls: Vec::new(),
            reveal_order: layout.reveal_targets.clone(),
            styles: BTreeMap::new(),
        }
    }

    /// Ids of the sections currently marked active.
    #[must_use]
    pub fn active_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.active)
            .map(|s| s.id.as_str())
            .collect()
    }

    /// Indices of the navigation links currently styled active.
    #[must_use]
    pub fn active_nav_links(&self) -> Vec<usize> {
        self.nav_links
            .iter()
            .enumerate()
            .filter(|(_, l)| l.active)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the overlay is visible.
    #[must_use]
    pub fn modal_visible(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.visible)
    }

    /// Text currently in an overlay slot.
    #[must_use]
    pub fn modal_field(&self, field: ModalField) -> Option<&str> {
        self.modal
            .as_ref()
            .and_then(|m| m.fields.get(&field))
            .map(String::as_str)
    }

    /// Items currently in the workflow list.
    #[must_use]
    pub fn workflow_items(&self) -> &[String] {
        match self.modal.as_ref() {
            Some(modal) => &modal.workflow,
            None => &[],
        }
    }

    /// Whether background scrolling is locked.
    #[must_use]
    pub fn body_scroll_locked(&self) -> bool {
        self.body_scroll_locked
    }

    /// Every scroll requested so far.
    #[must_use]
    pub fn scrolls(&self) -> &[ScrollRecord] {
        &self.scrolls
    }

    /// Inline style of a reveal target.
    #[must_use]
    pub fn style(&self, element: &str, property: &str) -> Option<&str> {
        self.styles
            .get(element)
            .and_then(|props| props.get(property))
            .map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    fn set_section_active(&mut self, id: &str, active: bool) {
        for section in self.sections.iter_mut().filter(|s| s.id == id) {
            section.active = active;
        }
    }

    fn nav_link_targets(&self) -> Vec<String> {
        self.nav_links.iter().map(|l| l.id.clone()).collect()
    }

    fn active_nav_link(&self) -> Option<usize> {
        self.nav_links.iter().position(|l| l.active)
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        if let Some(link) = self.nav_links.get_mut(index) {
            link.active = active;
        }
    }

    fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    fn set_modal_visible(&mut self, visible: bool) {
        if let Some(modal) = self.modal.as_mut() {
            modal.visible = visible;
        }
    }

    fn set_modal_field(&mut self, field: ModalField, text: &str) -> bool {
        match self.modal.as_mut() {
            Some(modal) if !modal.missing.contains(&field) => {
                modal.fields.insert(field, text.to_string());
                true
            }
            _ => false,
        }
    }

    fn set_workflow_items(&mut self, items: &[String]) -> bool {
        match self.modal.as_mut() {
            Some(modal) => {
                modal.workflow = items.to_vec();
                true
            }
            None => false,
        }
    }

    fn set_body_scroll_locked(&mut self, locked: bool) {
        self.body_scroll_locked = locked;
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scrolls.push(ScrollRecord::Top { behavior });
    }

    fn scroll_into_view(&mut self, section: &str, behavior: ScrollBehavior) {
        self.scrolls.push(ScrollRecord::IntoView {
            section: section.to_string(),
            behavior,
        });
    }

    fn reveal_targets(&self) -> Vec<String> {
        self.reveal_order.clone()
    }

    fn set_style(&mut self, element: &str, property: &str, value: &str) {
        if self.reveal_order.iter().any(|e| e == element) {
            self.styles
                .entry(element.to_string())
                .or_default()
                .insert(property.to_string(), value.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    entry: Option<HistoryEntry>,
    url: String,
}

/// Session history held in memory, with back and forward traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    slots: Vec<Slot>,
    cursor: usize,
    writes: usize,
}

impl MemoryHistory {
    /// Start a session at the given fragment (with or without `#`).
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        let fragment = fragment.trim_start_matches('#');
        let url = if fragment.is_empty() {
            String::new()
        } else {
            format!("#{fragment}")
        };
        Self {
            slots: vec![Slot { entry: None, url }],
            cursor: 0,
            writes: 0,
        }
    }

    /// Step back one entry. Returns `false` at the start of the session.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns `false` at the end of the session.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.slots.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Payload of the current entry, if one was written.
    #[must_use]
    pub fn state(&self) -> Option<&HistoryEntry> {
        self.slots[self.cursor].entry.as_ref()
    }

    /// Number of entries in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the session is empty. Never true; a session starts with one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of the current entry.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of push and replace calls made so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn fragment(&self) -> String {
        self.slots[self.cursor]
            .url
            .trim_start_matches('#')
            .to_string()
    }

    fn push(&mut self, entry: &HistoryEntry) {
        self.slots.truncate(self.cursor + 1);
        self.slots.push(Slot {
            entry: Some(entry.clone()),
            url: entry.url(),
        });
        self.cursor += 1;
        self.writes += 1;
    }

    fn replace(&mut self, entry: &HistoryEntry) {
        self.slots[self.cursor] = Slot {
            entry: Some(entry.clone()),
            url: entry.url(),
        };
        self.writes += 1;
    }
}
