//! The page seam over the real DOM.

use js_sys::JSON;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, ScrollIntoViewOptions, ScrollToOptions, Window};

use folio::click;
use folio::dom::{self, HistoryEntry, ModalField, ScrollBehavior, MODAL_ID, WORKFLOW_LIST_ID};

/// Section containers.
pub const SECTION_SELECTOR: &str = ".page, section[id]";
/// Navigation links.
pub const NAV_LINK_SELECTOR: &str = ".nav__link";
/// Attribute carrying a link's target section.
pub const PAGE_ATTR: &str = "data-page";
/// Attribute carrying a reveal target's key.
pub const REVEAL_KEY_ATTR: &str = "data-reveal-key";

const ACTIVE_CLASS: &str = "active";
const HIDDEN_CLASS: &str = "hidden";

fn behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

fn select_all(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Target section of a navigation element.
#[must_use]
pub fn link_target(element: &Element) -> Option<String> {
    click::link_target(
        element.get_attribute(PAGE_ATTR),
        element.get_attribute("href").as_deref(),
    )
}

/// The live document.
#[derive(Debug)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    reveal: Vec<Element>,
}

impl WebDocument {
    /// Wrap the window's document. Elements matching `reveal_selector` are
    /// tagged with a key so observer callbacks can name them.
    #[must_use]
    pub fn new(window: Window, document: web_sys::Document, reveal_selector: &str) -> Self {
        let reveal = if reveal_selector.is_empty() {
            Vec::new()
        } else {
            select_all(&document, reveal_selector)
        };
        for (i, element) in reveal.iter().enumerate() {
            let _ = element.set_attribute(REVEAL_KEY_ATTR, &format!("reveal-{i}"));
        }
        Self {
            window,
            document,
            reveal,
        }
    }

    /// Elements taking part in the reveal effect.
    #[must_use]
    pub fn reveal_elements(&self) -> &[Element] {
        &self.reveal
    }

    /// Elements that are sections.
    #[must_use]
    pub fn section_elements(&self) -> Vec<Element> {
        select_all(&self.document, SECTION_SELECTOR)
    }

    fn nav_links(&self) -> Vec<Element> {
        select_all(&self.document, NAV_LINK_SELECTOR)
    }

    fn reveal_element(&self, key: &str) -> Option<&Element> {
        self.reveal
            .iter()
            .find(|e| e.get_attribute(REVEAL_KEY_ATTR).as_deref() == Some(key))
    }
}

impl dom::Document for WebDocument {
    fn has_section(&self, id: &str) -> bool {
        self.document
            .get_element_by_id(id)
            .is_some_and(|element| element.matches(SECTION_SELECTOR) == Ok(true))
    }

    fn section_ids(&self) -> Vec<String> {
        self.section_elements()
            .iter()
            .map(Element::id)
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn set_section_active(&mut self, id: &str, active: bool) {
        if let Some(section) = self.document.get_element_by_id(id) {
            let classes = section.class_list();
            let _ = if active {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
        }
    }

    fn nav_link_targets(&self) -> Vec<String> {
        self.nav_links()
            .iter()
            .map(|link| link_target(link).unwrap_or_default())
            .collect()
    }

    fn active_nav_link(&self) -> Option<usize> {
        self.nav_links()
            .iter()
            .position(|link| link.class_list().contains(ACTIVE_CLASS))
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        if let Some(link) = self.nav_links().get(index) {
            let classes = link.class_list();
            let _ = if active {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
        }
    }

    fn has_modal(&self) -> bool {
        self.document.get_element_by_id(MODAL_ID).is_some()
    }

    fn set_modal_visible(&mut self, visible: bool) {
        if let Some(modal) = self.document.get_element_by_id(MODAL_ID) {
            let classes = modal.class_list();
            let _ = if visible {
                classes.remove_1(HIDDEN_CLASS)
            } else {
                classes.add_1(HIDDEN_CLASS)
            };
        }
    }

    fn set_modal_field(&mut self, field: ModalField, text: &str) -> bool {
        match self.document.get_element_by_id(field.element_id()) {
            Some(slot) => {
                slot.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_workflow_items(&mut self, items: &[String]) -> bool {
        let Some(list) = self.document.get_element_by_id(WORKFLOW_LIST_ID) else {
            return false;
        };
        list.set_inner_html("");
        for item in items {
            if let Ok(li) = self.document.create_element("li") {
                li.set_text_content(Some(item));
                let _ = list.append_child(&li);
            }
        }
        true
    }

    fn set_body_scroll_locked(&mut self, locked: bool) {
        if let Some(body) = self.document.body() {
            let style = body.style();
            let _ = if locked {
                style.set_property("overflow", "hidden")
            } else {
                style.remove_property("overflow").map(|_| ())
            };
        }
    }

    fn scroll_to_top(&mut self, scroll: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(behavior(scroll));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&mut self, section: &str, scroll: ScrollBehavior) {
        if let Some(element) = self.document.get_element_by_id(section) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(behavior(scroll));
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn reveal_targets(&self) -> Vec<String> {
        self.reveal
            .iter()
            .filter_map(|e| e.get_attribute(REVEAL_KEY_ATTR))
            .collect()
    }

    fn set_style(&mut self, element: &str, property: &str, value: &str) {
        if let Some(html) = self
            .reveal_element(element)
            .and_then(|e| e.dyn_ref::<HtmlElement>())
        {
            let _ = html.style().set_property(property, value);
        }
    }
}

/// The window's session history.
#[derive(Debug)]
pub struct WebHistory {
    window: Window,
}

impl WebHistory {
    /// Wrap the window's history.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn write(&self, entry: &HistoryEntry, push: bool) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let state = entry_to_js(entry);
        let url = entry.url();
        let result = if push {
            history.push_state_with_url(&state, "", Some(&url))
        } else {
            history.replace_state_with_url(&state, "", Some(&url))
        };
        if let Err(err) = result {
            crate::log(&format!("history update failed: {err:?}"));
        }
    }
}

impl dom::History for WebHistory {
    fn fragment(&self) -> String {
        self.window
            .location()
            .hash()
            .map(|hash| hash.trim_start_matches('#').to_string())
            .unwrap_or_default()
    }

    fn push(&mut self, entry: &HistoryEntry) {
        self.write(entry, true);
    }

    fn replace(&mut self, entry: &HistoryEntry) {
        self.write(entry, false);
    }
}

/// Encode an entry as the `history.state` payload.
fn entry_to_js(entry: &HistoryEntry) -> JsValue {
    JSON::parse(&entry.to_state_json()).unwrap_or(JsValue::NULL)
}

/// Decode a `history.state` payload written by [`entry_to_js`].
#[must_use]
pub fn entry_from_js(state: &JsValue) -> Option<HistoryEntry> {
    let json: String = JSON::stringify(state).ok()?.into();
    HistoryEntry::from_state_json(&json)
}
