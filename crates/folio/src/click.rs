//! Click classification.
//!
//! The browser binding resolves a click target against a handful of
//! selectors and reports every match as a [`Hit`]. [`classify`] picks the
//! [`Role`] from those matches with a fixed precedence, so nested elements
//! (a details button inside a project card, a close button inside the
//! overlay) resolve to the innermost control the user meant.

use crate::app::Role;

/// A selector matched by the click target or one of its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// A project's details button, with its `data-project`.
    DetailsButton(Option<String>),
    /// A project card, with its `data-project`.
    ProjectCard(Option<String>),
    /// The overlay's close control.
    ModalClose,
    /// The overlay backdrop itself. Descendants do not count.
    ModalOverlay,
    /// Anything inside the overlay.
    ModalContent,
    /// A navigation bar link, with its target section.
    NavLink(Option<String>),
    /// Any other element naming a target section.
    PageLink(Option<String>),
}

impl Hit {
    fn precedence(&self) -> u8 {
        match self {
            Self::DetailsButton(_) => 0,
            Self::ProjectCard(_) => 1,
            Self::ModalClose => 2,
            Self::ModalOverlay => 3,
            Self::ModalContent => 4,
            Self::NavLink(_) => 5,
            Self::PageLink(_) => 6,
        }
    }

    fn into_role(self) -> Role {
        match self {
            Self::DetailsButton(id) => id.map_or(Role::Other, Role::ProjectTrigger),
            Self::ProjectCard(id) => id.map_or(Role::Other, Role::ProjectCard),
            Self::ModalClose => Role::ModalClose,
            Self::ModalOverlay => Role::ModalOverlay,
            Self::ModalContent => Role::ModalContent,
            Self::NavLink(target) => target.map_or(Role::Other, Role::NavLink),
            Self::PageLink(target) => target.map_or(Role::Other, Role::PageLink),
        }
    }
}

/// Role of a click from the selectors it matched, in any order.
///
/// The highest-precedence match decides, even when it carries no id or
/// target; such a click is [`Role::Other`].
#[must_use]
pub fn classify(hits: impl IntoIterator<Item = Hit>) -> Role {
    hits.into_iter()
        .min_by_key(Hit::precedence)
        .map_or(Role::Other, Hit::into_role)
}

/// Target section of a navigation element: its `data-page` attribute, else
/// the fragment of an in-page `href`.
#[must_use]
pub fn link_target(data_page: Option<String>, href: Option<&str>) -> Option<String> {
    data_page.or_else(|| {
        href.and_then(|href| href.strip_prefix('#'))
            .filter(|fragment| !fragment.is_empty())
            .map(String::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_no_hits_is_other() {
        assert_eq!(classify(Vec::<Hit>::new()), Role::Other);
    }

    #[test]
    fn test_details_button_beats_card() {
        let hits = vec![
            Hit::ProjectCard(id("card-project")),
            Hit::DetailsButton(id("button-project")),
        ];
        assert_eq!(
            classify(hits),
            Role::ProjectTrigger("button-project".to_string())
        );
    }

    #[test]
    fn test_card_without_button() {
        assert_eq!(
            classify(vec![Hit::ProjectCard(id("unieuro-forecasting"))]),
            Role::ProjectCard("unieuro-forecasting".to_string())
        );
    }

    #[test]
    fn test_modal_precedence() {
        assert_eq!(
            classify(vec![Hit::ModalContent, Hit::ModalClose]),
            Role::ModalClose
        );
        assert_eq!(
            classify(vec![Hit::ModalContent, Hit::ModalOverlay]),
            Role::ModalOverlay
        );
        assert_eq!(classify(vec![Hit::ModalContent]), Role::ModalContent);
    }

    #[test]
    fn test_modal_wins_over_links_inside_it() {
        let hits = vec![Hit::PageLink(id("contact")), Hit::ModalContent];
        assert_eq!(classify(hits), Role::ModalContent);
    }

    #[test]
    fn test_nav_link_beats_page_link() {
        let hits = vec![Hit::PageLink(id("about")), Hit::NavLink(id("projects"))];
        assert_eq!(classify(hits), Role::NavLink("projects".to_string()));
        assert_eq!(
            classify(vec![Hit::PageLink(id("about"))]),
            Role::PageLink("about".to_string())
        );
    }

    #[test]
    fn test_missing_id_does_not_fall_through() {
        let hits = vec![Hit::DetailsButton(None), Hit::ProjectCard(id("p"))];
        assert_eq!(classify(hits), Role::Other);
        assert_eq!(classify(vec![Hit::NavLink(None)]), Role::Other);
    }

    #[test]
    fn test_link_target_prefers_data_page() {
        assert_eq!(link_target(id("about"), Some("#contact")), id("about"));
    }

    #[test]
    fn test_link_target_href_fallback() {
        assert_eq!(link_target(None, Some("#skills")), id("skills"));
        assert_eq!(link_target(None, Some("https://example.com/cv.pdf")), None);
        assert_eq!(link_target(None, Some("#")), None);
        assert_eq!(link_target(None, None), None);
    }
}
