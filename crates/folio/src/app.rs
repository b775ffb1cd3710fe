//! The portfolio application.
//!
//! [`Portfolio`] owns the navigation controller, the project overlay and the
//! reveal effect for one page session, together with the page and history it
//! drives. Every user interaction enters through [`Portfolio::dispatch`],
//! which routes clicks through a fixed table keyed by the clicked element's
//! logical [`Role`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::dom::{Document, History, HistoryEntry};
use crate::modal::{ModalPresenter, ModalState};
use crate::navigation::{
    Direction, HistoryMode, NavigationController, NavigationMode, SectionIntersection,
};
use crate::reveal::{RevealIntersection, RevealOptions, ScrollReveal};

/// Logical role of a clicked element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A link in the navigation bar.
    NavLink(String),
    /// Any other element that names a target section.
    PageLink(String),
    /// A project's "details" button.
    ProjectTrigger(String),
    /// A project card.
    ProjectCard(String),
    /// The overlay's close control.
    ModalClose,
    /// The overlay backdrop itself.
    ModalOverlay,
    /// Anything inside the overlay's content box.
    ModalContent,
    /// Anything else.
    Other,
}

impl Role {
    /// Whether a handled click on this role should cancel the browser's
    /// default action. Project cards keep it so links inside them still work.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::NavLink(_) | Self::PageLink(_) | Self::ProjectTrigger(_) | Self::ModalClose
        )
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// `Escape`.
    Escape,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// Any other key, by its `KeyboardEvent.key` name.
    Other(String),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Escape => "Escape".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Other(name) => name,
        }
    }
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An element was clicked.
    Click(Role),
    /// A key was pressed.
    KeyDown(Key),
    /// The user traversed session history.
    PopState(Option<HistoryEntry>),
    /// Sections moved in or out of the scroll-spy band.
    SectionIntersections(Vec<SectionIntersection>),
    /// Reveal targets crossed the visibility threshold.
    RevealIntersections(Vec<RevealIntersection>),
}

/// What a click on a role asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a section.
    Navigate(String),
    /// Show a project in the overlay.
    OpenProject(String),
    /// Close the overlay.
    CloseModal,
    /// Nothing.
    Ignore,
}

/// The click dispatch table.
#[must_use]
pub fn route(role: &Role) -> Action {
    match role {
        Role::NavLink(target) | Role::PageLink(target) => Action::Navigate(target.clone()),
        Role::ProjectTrigger(id) | Role::ProjectCard(id) => Action::OpenProject(id.clone()),
        Role::ModalClose | Role::ModalOverlay => Action::CloseModal,
        Role::ModalContent | Role::Other => Action::Ignore,
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "target", rename_all = "snake_case")]
pub enum Outcome {
    /// A section was activated.
    Navigated(String),
    /// Scroll-spy moved the highlight.
    Highlighted(String),
    /// The overlay was opened on a project.
    ModalOpened(String),
    /// The overlay was closed.
    ModalClosed,
    /// Reveal targets were revealed.
    Revealed(Vec<String>),
    /// The event changed nothing.
    Ignored,
}

impl Outcome {
    /// Whether the event was consumed, i.e. the browser's default action
    /// should be suppressed.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Snapshot of the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioState {
    /// Navigation mode.
    pub mode: NavigationMode,
    /// Active section.
    pub current_section: Option<String>,
    /// Overlay state.
    pub modal: ModalState,
    /// Number of revealed elements.
    pub revealed: usize,
}

/// One page session.
#[derive(Debug)]
pub struct Portfolio<D, H> {
    document: D,
    history: H,
    catalog: Catalog,
    navigation: NavigationController,
    modal: ModalPresenter,
    reveal: Option<ScrollReveal>,
}

impl<D: Document, H: History> Portfolio<D, H> {
    /// Assemble a session from its parts. Nothing is shown until [`Self::start`].
    #[must_use]
    pub fn new(document: D, history: H, catalog: Catalog, config: &Config) -> Self {
        let navigation =
            NavigationController::new(config.site.mode, config.site.default_section.clone())
                .with_band(config.scroll_spy.band());
        let reveal = config
            .reveal
            .enabled
            .then(|| ScrollReveal::new(config.reveal.options));
        Self {
            document,
            history,
            catalog,
            navigation,
            modal: ModalPresenter::new(),
            reveal,
        }
    }

    /// Page-load work: put reveal targets in their initial state and show
    /// the section named by the address fragment.
    pub fn start(&mut self) -> Outcome {
        if let Some(reveal) = self.reveal.as_mut() {
            let observed = reveal.observe_all(&mut self.document);
            debug!(observed, "Scroll-reveal targets observed");
        }

        let ok = self
            .navigation
            .activate_from_location(&mut self.document, &mut self.history);
        info!(
            mode = %self.navigation.mode(),
            section = ?self.navigation.current(),
            "Portfolio started"
        );
        match self.navigation.current() {
            Some(section) if ok => Outcome::Navigated(section.to_string()),
            _ => Outcome::Ignored,
        }
    }

    /// Handle one event to completion.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        match event {
            Event::Click(role) => self.apply(route(&role)),
            Event::KeyDown(key) => self.key_down(&key),
            Event::PopState(entry) => {
                if self.navigation.restore(
                    &mut self.document,
                    &mut self.history,
                    entry.as_ref(),
                ) {
                    self.current_outcome()
                } else {
                    Outcome::Ignored
                }
            }
            Event::SectionIntersections(entries) => self
                .navigation
                .observe_sections(&mut self.document, &entries)
                .map_or(Outcome::Ignored, Outcome::Highlighted),
            Event::RevealIntersections(entries) => {
                let revealed = self
                    .reveal
                    .as_mut()
                    .map(|r| r.on_intersections(&mut self.document, &entries))
                    .unwrap_or_default();
                if revealed.is_empty() {
                    Outcome::Ignored
                } else {
                    Outcome::Revealed(revealed)
                }
            }
        }
    }

    fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Navigate(section) => {
                if self.navigation.activate(
                    &mut self.document,
                    &mut self.history,
                    &section,
                    HistoryMode::Push,
                ) {
                    Outcome::Navigated(section)
                } else {
                    Outcome::Ignored
                }
            }
            Action::OpenProject(id) => {
                if self.modal.open(&mut self.document, &self.catalog, &id) {
                    Outcome::ModalOpened(id)
                } else {
                    Outcome::Ignored
                }
            }
            Action::CloseModal => {
                if self.modal.close(&mut self.document) {
                    Outcome::ModalClosed
                } else {
                    Outcome::Ignored
                }
            }
            Action::Ignore => Outcome::Ignored,
        }
    }

    fn key_down(&mut self, key: &Key) -> Outcome {
        let direction = match key {
            Key::Escape if self.modal.is_open() => return self.apply(Action::CloseModal),
            Key::ArrowLeft => Direction::Previous,
            Key::ArrowRight => Direction::Next,
            _ => return Outcome::Ignored,
        };
        if self.modal.is_open() {
            return Outcome::Ignored;
        }
        if self
            .navigation
            .step(&mut self.document, &mut self.history, direction)
        {
            self.current_outcome()
        } else {
            Outcome::Ignored
        }
    }

    fn current_outcome(&self) -> Outcome {
        self.navigation
            .current()
            .map_or(Outcome::Ignored, |s| Outcome::Navigated(s.to_string()))
    }

    /// Snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> PortfolioState {
        PortfolioState {
            mode: self.navigation.mode(),
            current_section: self.navigation.current().map(String::from),
            modal: self.modal.state().clone(),
            revealed: self.reveal.as_ref().map_or(0, ScrollReveal::revealed_count),
        }
    }

    /// The page.
    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The session history.
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the session history, for driving traversal.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// The project catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The navigation controller.
    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// The overlay presenter.
    #[must_use]
    pub fn modal(&self) -> &ModalPresenter {
        &self.modal
    }

    /// Reveal tunables, or `None` when the effect is disabled.
    #[must_use]
    pub fn reveal_options(&self) -> Option<RevealOptions> {
        self.reveal.as_ref().map(|r| *r.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ModalField;
    use crate::memory::{MemoryDocument, MemoryHistory, PageLayout};

    fn portfolio_at(fragment: &str) -> Portfolio<MemoryDocument, MemoryHistory> {
        crate::logging::init_test_logging();
        let config = Config::default();
        let layout = PageLayout {
            reveal_targets: vec!["card-1".to_string(), "card-2".to_string()],
            ..PageLayout::with_sections(&config.site.sections)
        };
        let mut app = Portfolio::new(
            MemoryDocument::new(&layout),
            MemoryHistory::new(fragment),
            Catalog::builtin(),
            &config,
        );
        app.start();
        app
    }

    fn back(app: &mut Portfolio<MemoryDocument, MemoryHistory>) -> Outcome {
        assert!(app.history_mut().back());
        let entry = app.history().state().cloned();
        app.dispatch(Event::PopState(entry))
    }

    fn forward(app: &mut Portfolio<MemoryDocument, MemoryHistory>) -> Outcome {
        assert!(app.history_mut().forward());
        let entry = app.history().state().cloned();
        app.dispatch(Event::PopState(entry))
    }

    #[test]
    fn test_route_table() {
        assert_eq!(
            route(&Role::NavLink("about".into())),
            Action::Navigate("about".into())
        );
        assert_eq!(
            route(&Role::PageLink("contact".into())),
            Action::Navigate("contact".into())
        );
        assert_eq!(
            route(&Role::ProjectTrigger("p".into())),
            Action::OpenProject("p".into())
        );
        assert_eq!(
            route(&Role::ProjectCard("p".into())),
            Action::OpenProject("p".into())
        );
        assert_eq!(route(&Role::ModalClose), Action::CloseModal);
        assert_eq!(route(&Role::ModalOverlay), Action::CloseModal);
        assert_eq!(route(&Role::ModalContent), Action::Ignore);
        assert_eq!(route(&Role::Other), Action::Ignore);
    }

    #[test]
    fn test_default_action_kept_for_cards_and_backdrop() {
        assert!(Role::NavLink("about".into()).prevents_default());
        assert!(Role::PageLink("contact".into()).prevents_default());
        assert!(Role::ProjectTrigger("p".into()).prevents_default());
        assert!(Role::ModalClose.prevents_default());
        assert!(!Role::ProjectCard("p".into()).prevents_default());
        assert!(!Role::ModalOverlay.prevents_default());
        assert!(!Role::ModalContent.prevents_default());
        assert!(!Role::Other.prevents_default());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from("Escape"), Key::Escape);
        assert_eq!(Key::from("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from("a"), Key::Other("a".to_string()));
        assert_eq!(String::from(Key::ArrowRight), "ArrowRight");
    }

    #[test]
    fn test_start_shows_default_section() {
        let app = portfolio_at("");
        assert_eq!(app.state().current_section.as_deref(), Some("home"));
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.document().style("card-1", "opacity"), Some("0"));
    }

    #[test]
    fn test_start_honours_fragment() {
        let app = portfolio_at("#projects");
        assert_eq!(app.state().current_section.as_deref(), Some("projects"));
    }

    #[test]
    fn test_nav_click_then_back() {
        let mut app = portfolio_at("#about");

        let outcome = app.dispatch(Event::Click(Role::NavLink("home".into())));
        assert_eq!(outcome, Outcome::Navigated("home".into()));
        assert!(outcome.is_handled());

        assert_eq!(back(&mut app), Outcome::Navigated("about".into()));
        assert_eq!(app.document().active_sections(), vec!["about"]);

        assert_eq!(forward(&mut app), Outcome::Navigated("home".into()));
    }

    #[test]
    fn test_click_unknown_section_ignored() {
        let mut app = portfolio_at("");
        let outcome = app.dispatch(Event::Click(Role::PageLink("missing".into())));
        assert_eq!(outcome, Outcome::Ignored);
        assert!(!outcome.is_handled());
        assert_eq!(app.state().current_section.as_deref(), Some("home"));
    }

    #[test]
    fn test_project_trigger_opens_modal() {
        let mut app = portfolio_at("#projects");
        let outcome = app.dispatch(Event::Click(Role::ProjectTrigger(
            "unieuro-forecasting".into(),
        )));
        assert_eq!(outcome, Outcome::ModalOpened("unieuro-forecasting".into()));
        assert_eq!(
            app.document().modal_field(ModalField::Title),
            Some("Unieuro Retail Sales Forecasting")
        );
        assert_eq!(app.document().workflow_items().len(), 4);
        assert!(app.document().body_scroll_locked());
    }

    #[test]
    fn test_unknown_project_card_ignored() {
        let mut app = portfolio_at("");
        let outcome = app.dispatch(Event::Click(Role::ProjectCard("nope".into())));
        assert_eq!(outcome, Outcome::Ignored);
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_every_close_trigger_unlocks_scroll() {
        let closers = [
            Event::Click(Role::ModalClose),
            Event::Click(Role::ModalOverlay),
            Event::KeyDown(Key::Escape),
        ];
        for closer in closers {
            let mut app = portfolio_at("");
            app.dispatch(Event::Click(Role::ProjectCard("multi-agent-system".into())));
            assert!(app.document().body_scroll_locked());

            assert_eq!(app.dispatch(closer), Outcome::ModalClosed);
            assert!(!app.document().body_scroll_locked());
            assert!(!app.document().modal_visible());
        }
    }

    #[test]
    fn test_click_inside_modal_content_keeps_it_open() {
        let mut app = portfolio_at("");
        app.dispatch(Event::Click(Role::ProjectCard("multi-agent-system".into())));
        assert_eq!(
            app.dispatch(Event::Click(Role::ModalContent)),
            Outcome::Ignored
        );
        assert!(app.modal().is_open());
    }

    #[test]
    fn test_escape_when_closed_is_ignored() {
        let mut app = portfolio_at("");
        assert_eq!(app.dispatch(Event::KeyDown(Key::Escape)), Outcome::Ignored);
        assert!(!app.document().body_scroll_locked());
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let mut app = portfolio_at("");
        assert_eq!(
            app.dispatch(Event::KeyDown(Key::ArrowRight)),
            Outcome::Navigated("about".into())
        );
        assert_eq!(
            app.dispatch(Event::KeyDown(Key::ArrowLeft)),
            Outcome::Navigated("home".into())
        );
        assert_eq!(app.dispatch(Event::KeyDown(Key::ArrowLeft)), Outcome::Ignored);
    }

    #[test]
    fn test_arrow_right_from_last_link_is_noop() {
        let mut app = portfolio_at("#contact");
        assert_eq!(
            app.dispatch(Event::KeyDown(Key::ArrowRight)),
            Outcome::Ignored
        );
        assert_eq!(app.state().current_section.as_deref(), Some("contact"));
    }

    #[test]
    fn test_arrow_keys_suppressed_while_modal_open() {
        let mut app = portfolio_at("#projects");
        app.dispatch(Event::Click(Role::ProjectTrigger("tv-movies-analysis".into())));

        assert_eq!(
            app.dispatch(Event::KeyDown(Key::ArrowRight)),
            Outcome::Ignored
        );
        assert_eq!(app.dispatch(Event::KeyDown(Key::ArrowLeft)), Outcome::Ignored);
        assert_eq!(app.state().current_section.as_deref(), Some("projects"));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut app = portfolio_at("");
        assert_eq!(
            app.dispatch(Event::KeyDown(Key::Other("Enter".into()))),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_reveal_once_through_dispatch() {
        let mut app = portfolio_at("");
        let entries = vec![RevealIntersection {
            element: "card-1".to_string(),
            is_intersecting: true,
        }];

        assert_eq!(
            app.dispatch(Event::RevealIntersections(entries.clone())),
            Outcome::Revealed(vec!["card-1".to_string()])
        );
        assert_eq!(app.document().style("card-1", "opacity"), Some("1"));
        assert_eq!(
            app.dispatch(Event::RevealIntersections(entries)),
            Outcome::Ignored
        );
        assert_eq!(app.state().revealed, 1);
    }

    #[test]
    fn test_reveal_disabled() {
        let mut config = Config::default();
        config.reveal.enabled = false;
        let layout = PageLayout {
            reveal_targets: vec!["card-1".to_string()],
            ..PageLayout::with_sections(&config.site.sections)
        };
        let mut app = Portfolio::new(
            MemoryDocument::new(&layout),
            MemoryHistory::default(),
            Catalog::builtin(),
            &config,
        );
        app.start();

        assert_eq!(app.document().style("card-1", "opacity"), None);
        let outcome = app.dispatch(Event::RevealIntersections(vec![RevealIntersection {
            element: "card-1".to_string(),
            is_intersecting: true,
        }]));
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_scroll_spy_session() {
        let mut config = Config::default();
        config.site.mode = NavigationMode::ScrollSpy;
        let mut app = Portfolio::new(
            MemoryDocument::new(&PageLayout::with_sections(&config.site.sections)),
            MemoryHistory::default(),
            Catalog::builtin(),
            &config,
        );
        app.start();
        assert_eq!(app.history().writes(), 0);

        let outcome = app.dispatch(Event::SectionIntersections(vec![SectionIntersection {
            section: "skills".to_string(),
            is_intersecting: true,
        }]));
        assert_eq!(outcome, Outcome::Highlighted("skills".into()));
        assert_eq!(app.document().active_sections(), vec!["skills"]);
        assert_eq!(app.history().writes(), 0);
    }

    #[test]
    fn test_section_intersections_ignored_when_hash_routed() {
        let mut app = portfolio_at("#about");

        let outcome = app.dispatch(Event::SectionIntersections(vec![SectionIntersection {
            section: "contact".to_string(),
            is_intersecting: true,
        }]));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(app.document().active_sections(), vec!["about"]);
        assert_eq!(app.state().current_section.as_deref(), Some("about"));
        assert_eq!(app.history().fragment(), "about");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&Outcome::ModalOpened("p".into())).unwrap();
        assert_eq!(json, r#"{"outcome":"modal_opened","target":"p"}"#);
        let json = serde_json::to_string(&Outcome::Ignored).unwrap();
        assert_eq!(json, r#"{"outcome":"ignored"}"#);
    }
}
