//! One-shot scroll-reveal effect.
//!
//! Observed elements start transparent and shifted down. The first time one
//! of them becomes sufficiently visible it fades and slides into place, and
//! is then dropped from observation for the rest of the page session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dom::{Document, ElementRect};

/// Tunables for the reveal effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Fraction of an element that must be visible to trigger.
    pub threshold: f64,
    /// Pixels trimmed from the bottom of the viewport before testing.
    pub bottom_margin_px: u32,
    /// Initial downward offset in pixels.
    pub offset_px: u32,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin_px: 50,
            offset_px: 20,
            duration_ms: 600,
        }
    }
}

impl RevealOptions {
    /// Observer root margin.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }

    /// Transform applied before the element is revealed.
    #[must_use]
    pub fn initial_transform(&self) -> String {
        format!("translateY({}px)", self.offset_px)
    }

    /// CSS transition shorthand for the effect.
    #[must_use]
    pub fn transition(&self) -> String {
        let secs = f64::from(self.duration_ms) / 1000.0;
        format!("opacity {secs}s ease, transform {secs}s ease")
    }

    /// Fraction of an element of height `height` whose top sits `top` pixels
    /// below the viewport top that lies inside the trimmed viewport.
    #[must_use]
    pub fn visible_ratio(&self, top: f64, height: f64, viewport_height: f64) -> f64 {
        if height <= 0.0 {
            return 0.0;
        }
        let visible_bottom = viewport_height - f64::from(self.bottom_margin_px);
        let overlap = (top + height).min(visible_bottom) - top.max(0.0);
        (overlap / height).clamp(0.0, 1.0)
    }

    /// Whether a visible ratio is enough to trigger the effect.
    #[must_use]
    pub fn triggers(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Reveal observations for elements at the given positions.
    #[must_use]
    pub fn intersections(
        &self,
        rects: &[ElementRect],
        viewport_height: f64,
    ) -> Vec<RevealIntersection> {
        rects
            .iter()
            .map(|rect| RevealIntersection {
                element: rect.id.clone(),
                is_intersecting: self.triggers(self.visible_ratio(
                    rect.top,
                    rect.height(),
                    viewport_height,
                )),
            })
            .collect()
    }
}

/// One reveal observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealIntersection {
    /// Key of the observed element.
    pub element: String,
    /// Whether the element crossed the threshold into view.
    pub is_intersecting: bool,
}

/// Lifecycle of one observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Waiting to enter the viewport.
    Hidden,
    /// Transition applied; no longer observed.
    Revealed,
}

/// Tracks which elements are still waiting to be revealed.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    options: RevealOptions,
    elements: BTreeMap<String, RevealState>,
}

impl ScrollReveal {
    /// Create an effect with the given options.
    #[must_use]
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            elements: BTreeMap::new(),
        }
    }

    /// The effect's options.
    #[must_use]
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Start observing every reveal target on the page.
    /// Returns the number of newly observed elements.
    pub fn observe_all<D: Document>(&mut self, doc: &mut D) -> usize {
        doc.reveal_targets()
            .into_iter()
            .filter(|element| self.observe(doc, element))
            .count()
    }

    /// Put an element in its initial state and start observing it.
    /// Elements seen before (revealed or not) are left alone.
    pub fn observe<D: Document>(&mut self, doc: &mut D, element: &str) -> bool {
        if self.elements.contains_key(element) {
            return false;
        }
        doc.set_style(element, "opacity", "0");
        doc.set_style(element, "transform", &self.options.initial_transform());
        doc.set_style(element, "transition", &self.options.transition());
        self.elements.insert(element.to_string(), RevealState::Hidden);
        true
    }

    /// Apply observations. Returns the elements revealed by this batch.
    pub fn on_intersections<D: Document>(
        &mut self,
        doc: &mut D,
        entries: &[RevealIntersection],
    ) -> Vec<String> {
        let mut revealed = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(state) = self.elements.get_mut(&entry.element) else {
                continue;
            };
            if *state == RevealState::Revealed {
                continue;
            }
            doc.set_style(&entry.element, "opacity", "1");
            doc.set_style(&entry.element, "transform", "translateY(0)");
            *state = RevealState::Revealed;
            trace!(element = %entry.element, "Element revealed");
            revealed.push(entry.element.clone());
        }
        revealed
    }

    /// State of an element, if it was ever observed.
    #[must_use]
    pub fn state(&self, element: &str) -> Option<RevealState> {
        self.elements.get(element).copied()
    }

    /// Number of elements revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.elements
            .values()
            .filter(|s| **s == RevealState::Revealed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, PageLayout};

    fn doc_with(targets: &[&str]) -> MemoryDocument {
        let layout = PageLayout {
            reveal_targets: targets.iter().map(|t| (*t).to_string()).collect(),
            ..PageLayout::with_sections(&["home"])
        };
        MemoryDocument::new(&layout)
    }

    fn entered(element: &str) -> RevealIntersection {
        RevealIntersection {
            element: element.to_string(),
            is_intersecting: true,
        }
    }

    #[test]
    fn test_default_options() {
        let options = RevealOptions::default();
        assert_eq!(options.root_margin(), "0px 0px -50px 0px");
        assert_eq!(options.initial_transform(), "translateY(20px)");
        assert_eq!(
            options.transition(),
            "opacity 0.6s ease, transform 0.6s ease"
        );
    }

    #[test]
    fn test_observe_all_sets_initial_styles() {
        let mut doc = doc_with(&["card-1", "card-2"]);
        let mut reveal = ScrollReveal::default();

        assert_eq!(reveal.observe_all(&mut doc), 2);
        assert_eq!(doc.style("card-1", "opacity"), Some("0"));
        assert_eq!(doc.style("card-2", "transform"), Some("translateY(20px)"));
        assert_eq!(reveal.state("card-1"), Some(RevealState::Hidden));

        assert_eq!(reveal.observe_all(&mut doc), 0);
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut doc = doc_with(&["card-1"]);
        let mut reveal = ScrollReveal::default();
        reveal.observe_all(&mut doc);

        let first = reveal.on_intersections(&mut doc, &[entered("card-1")]);
        assert_eq!(first, vec!["card-1"]);
        assert_eq!(doc.style("card-1", "opacity"), Some("1"));
        assert_eq!(doc.style("card-1", "transform"), Some("translateY(0)"));
        assert_eq!(reveal.state("card-1"), Some(RevealState::Revealed));

        let second = reveal.on_intersections(&mut doc, &[entered("card-1")]);
        assert!(second.is_empty());
        assert_eq!(reveal.revealed_count(), 1);
    }

    #[test]
    fn test_revealed_element_is_not_reobserved() {
        let mut doc = doc_with(&["card-1"]);
        let mut reveal = ScrollReveal::default();
        reveal.observe_all(&mut doc);
        reveal.on_intersections(&mut doc, &[entered("card-1")]);

        assert!(!reveal.observe(&mut doc, "card-1"));
        assert_eq!(doc.style("card-1", "opacity"), Some("1"));
    }

    #[test]
    fn test_non_intersecting_and_unknown_entries_ignored() {
        let mut doc = doc_with(&["card-1"]);
        let mut reveal = ScrollReveal::default();
        reveal.observe_all(&mut doc);

        let entries = vec![
            RevealIntersection {
                element: "card-1".to_string(),
                is_intersecting: false,
            },
            entered("unobserved"),
        ];
        assert!(reveal.on_intersections(&mut doc, &entries).is_empty());
        assert_eq!(doc.style("card-1", "opacity"), Some("0"));
    }

    #[test]
    fn test_visible_ratio() {
        let options = RevealOptions::default();
        // viewport 800px, trimmed to 750px
        assert!((options.visible_ratio(700.0, 100.0, 800.0) - 0.5).abs() < f64::EPSILON);
        assert!((options.visible_ratio(0.0, 100.0, 800.0) - 1.0).abs() < f64::EPSILON);
        assert!(options.visible_ratio(760.0, 100.0, 800.0).abs() < f64::EPSILON);
        assert!(options.visible_ratio(10.0, 0.0, 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intersections_from_geometry() {
        let options = RevealOptions::default();
        let rect = |id: &str, top: f64| ElementRect {
            id: id.to_string(),
            top,
            bottom: top + 100.0,
        };
        // 800px viewport trimmed to 750px: 5% of "low" is visible, 60% of "mid"
        let entries = options.intersections(&[rect("low", 745.0), rect("mid", 690.0)], 800.0);
        assert!(!entries[0].is_intersecting);
        assert!(entries[1].is_intersecting);
        assert_eq!(entries[1].element, "mid");
    }

    #[test]
    fn test_triggers_at_threshold() {
        let options = RevealOptions::default();
        assert!(options.triggers(0.1));
        assert!(options.triggers(0.5));
        assert!(!options.triggers(0.05));
        assert!(!options.triggers(0.0));
    }
}
