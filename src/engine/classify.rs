//! Per-line heading classification.

use super::options::OutlineOptions;
use super::stats::FontStatistics;
use super::text::quantize;
use crate::model::Color;

/// Decides whether a line is a heading, and at which level.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier<'a> {
    stats: &'a FontStatistics,
    quantum: f32,
    tolerance: f32,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over document statistics.
    pub fn new(stats: &'a FontStatistics, options: &OutlineOptions) -> Self {
        Self {
            stats,
            quantum: options.size_quantum,
            tolerance: options.color_size_tolerance,
        }
    }

    /// Heading level for a line with the given largest run size and
    /// dominant colour, or `None` for body text.
    ///
    /// Size decides first. A line that reaches no tier still counts when its
    /// colour differs from the body colour and it is not noticeably smaller
    /// than body text; it then takes the first tier it reaches within the
    /// tolerance, or the deepest level.
    pub fn classify(&self, max_size: f32, color: Option<Color>) -> Option<u8> {
        let size = quantize(max_size, self.quantum);
        let ladder = &self.stats.ladder;

        if let Some(level) = ladder.level_for(size) {
            return Some(level);
        }

        let body_color = self.stats.body_color?;
        let color = color?;
        if color != body_color && size >= self.stats.body_size * self.tolerance {
            let level = ladder
                .level_with_tolerance(size, self.tolerance)
                .unwrap_or_else(|| ladder.deepest());
            return Some(level);
        }

        None
    }

    /// Level for a promoted fallback line: its tier, or the deepest level.
    pub fn fallback_level(&self, max_size: f32) -> u8 {
        self.stats
            .ladder
            .level_or_deepest(quantize(max_size, self.quantum))
    }
}
