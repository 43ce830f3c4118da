//! Per-page fallback heading.
//!
//! A page whose headings are only marginally larger than body text (a title
//! page, say) produces no candidate. Its largest line is promoted instead
//! so every page with content still gets a navigable entry.

use super::aggregate::HeadingCandidate;
use super::classify::HeadingClassifier;
use super::text::{has_alphabetic, normalize_title};

#[derive(Debug, Clone)]
struct BestLine {
    text: String,
    size: f32,
    y_mid: f32,
}

/// Tracks the largest line of a page.
#[derive(Debug, Clone, Default)]
pub struct FallbackTracker {
    best: Option<BestLine>,
}

impl FallbackTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a content line. The first of several equally large lines wins.
    pub fn observe(&mut self, text: &str, max_size: f32, y_mid: f32) {
        if max_size <= 0.0 {
            return;
        }
        if self.best.as_ref().is_some_and(|best| max_size <= best.size) {
            return;
        }
        self.best = Some(BestLine {
            text: text.to_string(),
            size: max_size,
            y_mid,
        });
    }

    /// Size of the largest line seen.
    pub fn best_size(&self) -> Option<f32> {
        self.best.as_ref().map(|best| best.size)
    }

    /// Promote the largest line to a heading candidate.
    pub fn promote(
        self,
        classifier: &HeadingClassifier<'_>,
        page: u32,
        normalize_titles: bool,
    ) -> Option<HeadingCandidate> {
        let best = self.best?;
        let title = if normalize_titles {
            normalize_title(&best.text)
        } else {
            best.text.trim().to_string()
        };
        if title.is_empty() || !has_alphabetic(&title) {
            return None;
        }
        Some(HeadingCandidate {
            level: classifier.fallback_level(best.size),
            title,
            page,
            y_mid: best.y_mid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::{FontStatistics, SizeLadder};
    use crate::engine::OutlineOptions;
    use crate::model::Color;

    fn stats() -> FontStatistics {
        FontStatistics {
            body_size: 10.0,
            body_color: Some(Color::BLACK),
            quantized_sizes: vec![10.0, 18.0, 24.0],
            ladder: SizeLadder::new(vec![24.0, 18.0]),
            run_count: 50,
        }
    }

    #[test]
    fn test_tracks_largest_line() {
        let mut tracker = FallbackTracker::new();
        tracker.observe("body", 10.0, 200.0);
        tracker.observe("Annual Report", 15.0, 100.0);
        tracker.observe("Also fifteen", 15.0, 300.0);
        tracker.observe("small print", 8.0, 700.0);

        assert_eq!(tracker.best_size(), Some(15.0));

        let stats = stats();
        let classifier = HeadingClassifier::new(&stats, &OutlineOptions::default());
        let candidate = tracker.promote(&classifier, 4, true).unwrap();
        assert_eq!(candidate.title, "Annual Report");
        assert_eq!(candidate.page, 4);
        // Below every tier: deepest level
        assert_eq!(candidate.level, 2);
        assert_eq!(candidate.y_mid, 100.0);
    }

    #[test]
    fn test_promote_uses_ladder_level() {
        let mut tracker = FallbackTracker::new();
        tracker.observe("Big Title", 25.0, 100.0);

        let stats = stats();
        let classifier = HeadingClassifier::new(&stats, &OutlineOptions::default());
        assert_eq!(tracker.promote(&classifier, 1, true).unwrap().level, 1);
    }

    #[test]
    fn test_empty_tracker() {
        let stats = stats();
        let classifier = HeadingClassifier::new(&stats, &OutlineOptions::default());
        assert!(FallbackTracker::new()
            .promote(&classifier, 1, true)
            .is_none());
    }
}
