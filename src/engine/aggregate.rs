//! Merging of consecutive heading lines into single titles.
//!
//! Headings that wrap over several lines, or that the extraction layer
//! splits across blocks, arrive as consecutive lines of the same level.
//! State lives for a whole page, so block boundaries do not break a run.

use super::text::{has_alphabetic, normalize_title};

/// A heading found on a page, before structural normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Provisional level (1 = top)
    pub level: u8,
    /// Heading title
    pub title: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Vertical centre of the first line, for ordering within the page
    pub y_mid: f32,
}

#[derive(Debug, Clone)]
struct Pending {
    level: u8,
    title: String,
    y_mid: f32,
}

/// Accumulates heading lines of one page into candidates.
#[derive(Debug, Clone)]
pub struct LineAggregator {
    page: u32,
    normalize_titles: bool,
    pending: Option<Pending>,
    candidates: Vec<HeadingCandidate>,
}

impl LineAggregator {
    /// Create an aggregator for a page (1-indexed).
    pub fn new(page: u32, normalize_titles: bool) -> Self {
        Self {
            page,
            normalize_titles,
            pending: None,
            candidates: Vec::new(),
        }
    }

    /// Feed a heading line in reading order.
    ///
    /// A line at the level of the pending heading extends its title;
    /// any other level closes it and starts a new one.
    pub fn push(&mut self, level: u8, text: &str, y_mid: f32) {
        if let Some(pending) = self.pending.as_mut() {
            if pending.level == level {
                pending.title.push(' ');
                pending.title.push_str(text);
                return;
            }
        }
        self.flush();
        self.pending = Some(Pending {
            level,
            title: text.to_string(),
            y_mid,
        });
    }

    /// Close the pending heading, if any.
    pub fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let title = if self.normalize_titles {
            normalize_title(&pending.title)
        } else {
            pending.title.trim().to_string()
        };
        if title.is_empty() || !has_alphabetic(&title) {
            return;
        }
        self.candidates.push(HeadingCandidate {
            level: pending.level,
            title,
            page: self.page,
            y_mid: pending.y_mid,
        });
    }

    /// Close the page and return its candidates.
    pub fn finish(mut self) -> Vec<HeadingCandidate> {
        self.flush();
        self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_level_lines_merge() {
        let mut agg = LineAggregator::new(3, true);
        agg.push(2, "Integration with Other", 100.0);
        agg.push(2, "Cloud Services", 120.0);

        let candidates = agg.finish();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Integration with Other Cloud Services");
        assert_eq!(candidates[0].level, 2);
        assert_eq!(candidates[0].page, 3);
        assert_eq!(candidates[0].y_mid, 100.0);
    }

    #[test]
    fn test_level_change_splits() {
        let mut agg = LineAggregator::new(1, true);
        agg.push(1, "User Guide", 80.0);
        agg.push(2, "Installation", 150.0);
        agg.push(2, "Requirements", 170.0);

        let candidates = agg.finish();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "User Guide");
        assert_eq!(candidates[1].title, "Installation Requirements");
    }

    #[test]
    fn test_flush_is_a_boundary() {
        let mut agg = LineAggregator::new(1, true);
        agg.push(2, "Overview", 100.0);
        agg.flush();
        agg.push(2, "Scope", 200.0);

        let titles: Vec<String> = agg.finish().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Overview", "Scope"]);
    }

    #[test]
    fn test_non_alphabetic_title_dropped() {
        let mut agg = LineAggregator::new(1, false);
        agg.push(1, "  2.1  ", 100.0);
        assert!(agg.finish().is_empty());
    }

    #[test]
    fn test_title_normalization_toggle() {
        let mut agg = LineAggregator::new(1, false);
        agg.push(1, "Getting  Started", 100.0);
        assert_eq!(agg.finish()[0].title, "Getting  Started");

        let mut agg = LineAggregator::new(1, true);
        agg.push(1, "Getting  Started", 100.0);
        assert_eq!(agg.finish()[0].title, "Getting Started");
    }
}
