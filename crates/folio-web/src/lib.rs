//! Browser bindings for folio
//!
//! This crate binds the folio page seam to the live DOM and wires browser
//! events (clicks, key presses, history traversal, viewport intersections)
//! into a single [`folio::Portfolio`] session.

#![cfg(target_arch = "wasm32")]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod page;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event as DomEvent, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, PopStateEvent,
};

use folio::app::{Event, Key, Outcome, Portfolio, Role};
use folio::click::{self, Hit};
use folio::navigation::{NavigationMode, SectionIntersection};
use folio::reveal::RevealIntersection;
use folio::{Catalog, Config};

use page::{entry_from_js, link_target, WebDocument, WebHistory, REVEAL_KEY_ATTR};

type Session = Rc<RefCell<Portfolio<WebDocument, WebHistory>>>;

/// Write a message to the browser console.
pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Classify a clicked element by its logical role.
#[must_use]
pub fn classify(target: &Element) -> Role {
    let closest = |selector: &str| target.closest(selector).ok().flatten();
    let project = |e: &Element| e.get_attribute("data-project");

    let mut hits = Vec::new();
    if let Some(button) = closest(".project-details-btn") {
        hits.push(Hit::DetailsButton(project(&button)));
    }
    if let Some(card) = closest(".project-card") {
        hits.push(Hit::ProjectCard(project(&card)));
    }
    if closest(".modal__close").is_some() {
        hits.push(Hit::ModalClose);
    }
    if target.class_list().contains("modal__overlay") {
        hits.push(Hit::ModalOverlay);
    }
    if closest(".modal").is_some() {
        hits.push(Hit::ModalContent);
    }
    if let Some(link) = closest(page::NAV_LINK_SELECTOR) {
        hits.push(Hit::NavLink(link_target(&link)));
    }
    if let Some(link) = closest("[data-page]") {
        hits.push(Hit::PageLink(link_target(&link)));
    }
    click::classify(hits)
}

/// Read per-page overrides from `<body data-nav-mode=".." data-default-section="..">`.
fn page_config(document: &web_sys::Document) -> Config {
    let mut config = Config::default();
    if let Some(body) = document.body() {
        if body.get_attribute("data-nav-mode").as_deref() == Some("scroll-spy") {
            config.site.mode = NavigationMode::ScrollSpy;
        }
        if let Some(section) = body.get_attribute("data-default-section") {
            config.site.default_section = section;
        }
    }
    config
}

fn attach_clicks(session: &Session, document: &web_sys::Document) -> Result<(), JsValue> {
    let st = session.clone();
    let onclick = Closure::<dyn FnMut(DomEvent)>::wrap(Box::new(move |e: DomEvent| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let role = classify(&target);
        let prevent = role.prevents_default();
        let stop = matches!(role, Role::ProjectTrigger(_));
        let outcome = st.borrow_mut().dispatch(Event::Click(role));
        if outcome.is_handled() {
            if prevent {
                e.prevent_default();
            }
            if stop {
                e.stop_propagation();
            }
        }
    }));
    document.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}

fn attach_keys(session: &Session, document: &web_sys::Document) -> Result<(), JsValue> {
    let st = session.clone();
    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
        let key = Key::from(e.key());
        let arrow = matches!(key, Key::ArrowLeft | Key::ArrowRight);
        let outcome = st.borrow_mut().dispatch(Event::KeyDown(key));
        if arrow && outcome.is_handled() {
            e.prevent_default();
        }
    }));
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();
    Ok(())
}

fn attach_history(session: &Session, window: &web_sys::Window) -> Result<(), JsValue> {
    let st = session.clone();
    let onpop = Closure::<dyn FnMut(PopStateEvent)>::wrap(Box::new(move |e: PopStateEvent| {
        let entry = entry_from_js(&e.state());
        st.borrow_mut().dispatch(Event::PopState(entry));
    }));
    window.add_event_listener_with_callback("popstate", onpop.as_ref().unchecked_ref())?;
    onpop.forget();
    Ok(())
}

fn entries(array: &Array) -> Vec<IntersectionObserverEntry> {
    array
        .iter()
        .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
        .collect()
}

fn attach_reveal(session: &Session) -> Result<(), JsValue> {
    let (options, elements) = {
        let app = session.borrow();
        let Some(options) = app.reveal_options() else {
            return Ok(());
        };
        (options, app.document().reveal_elements().to_vec())
    };

    let st = session.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::wrap(Box::new(
        move |array: Array, observer: IntersectionObserver| {
            let batch: Vec<RevealIntersection> = entries(&array)
                .iter()
                .filter_map(|entry| {
                    let target = entry.target();
                    target
                        .get_attribute(REVEAL_KEY_ATTR)
                        .map(|element| RevealIntersection {
                            element,
                            is_intersecting: entry.is_intersecting(),
                        })
                })
                .collect();
            let outcome = st.borrow_mut().dispatch(Event::RevealIntersections(batch));
            if let Outcome::Revealed(keys) = outcome {
                for entry in entries(&array) {
                    let target = entry.target();
                    if target
                        .get_attribute(REVEAL_KEY_ATTR)
                        .is_some_and(|key| keys.contains(&key))
                    {
                        observer.unobserve(&target);
                    }
                }
            }
        },
    ));

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}

fn attach_scroll_spy(session: &Session) -> Result<(), JsValue> {
    let (band, sections) = {
        let app = session.borrow();
        if app.navigation().mode() != NavigationMode::ScrollSpy {
            return Ok(());
        }
        (app.navigation().band(), app.document().section_elements())
    };

    let st = session.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::wrap(Box::new(
        move |array: Array, _observer: IntersectionObserver| {
            let batch: Vec<SectionIntersection> = entries(&array)
                .iter()
                .map(|entry| SectionIntersection {
                    section: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            st.borrow_mut()
                .dispatch(Event::SectionIntersections(batch));
        },
    ));

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&band.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for section in &sections {
        observer.observe(section);
    }
    callback.forget();
    Ok(())
}

/// Entry point: build the session and wire every listener.
///
/// # Errors
///
/// Returns an error if the window or document is unavailable or a listener
/// cannot be registered.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = page_config(&document);

    let selector = if config.reveal.enabled {
        config.reveal.selector_list()
    } else {
        String::new()
    };
    let page = WebDocument::new(window.clone(), document.clone(), &selector);
    let history = WebHistory::new(window.clone());

    let session: Session = Rc::new(RefCell::new(Portfolio::new(
        page,
        history,
        Catalog::builtin(),
        &config,
    )));

    let outcome = session.borrow_mut().start();
    log(&format!("folio started: {outcome:?}"));

    attach_clicks(&session, &document)?;
    attach_keys(&session, &document)?;
    attach_history(&session, &window)?;
    attach_reveal(&session)?;
    attach_scroll_spy(&session)?;
    Ok(())
}
