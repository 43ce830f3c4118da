//! Document-wide font statistics.
//!
//! The only pass that needs every page: body size, body colour and the
//! heading size ladder are global and must exist before any page is
//! classified.

use serde::{Deserialize, Serialize};

use super::options::OutlineOptions;
use super::text::quantize;
use crate::model::{Color, Page};

/// Heading sizes ranked largest first; a tier's level is its index + 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeLadder {
    tiers: Vec<f32>,
}

impl SizeLadder {
    /// Build a ladder from heading sizes in any order.
    pub fn new(mut sizes: Vec<f32>) -> Self {
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();
        Self { tiers: sizes }
    }

    /// Tier sizes, largest first.
    pub fn sizes(&self) -> &[f32] {
        &self.tiers
    }

    /// Check if the ladder has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Deepest level on the ladder (at least 1).
    pub fn deepest(&self) -> u8 {
        self.tiers.len().clamp(1, u8::MAX as usize) as u8
    }

    /// Level of the largest tier that `size` reaches.
    pub fn level_for(&self, size: f32) -> Option<u8> {
        self.level_with_tolerance(size, 1.0)
    }

    /// Level of the largest tier that `size` reaches at `tolerance` × tier size.
    pub fn level_with_tolerance(&self, size: f32, tolerance: f32) -> Option<u8> {
        self.tiers
            .iter()
            .position(|&tier| size >= tier * tolerance)
            .map(|i| (i + 1) as u8)
    }

    /// Level for `size`, or the deepest level if it reaches no tier.
    pub fn level_or_deepest(&self, size: f32) -> u8 {
        self.level_for(size).unwrap_or_else(|| self.deepest())
    }
}

/// Font statistics for heading detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStatistics {
    /// Median size of all runs that carry letters
    pub body_size: f32,
    /// Most frequent colour among body-sized runs
    pub body_color: Option<Color>,
    /// Distinct quantized sizes, ascending
    pub quantized_sizes: Vec<f32>,
    /// Heading tiers
    pub ladder: SizeLadder,
    /// Number of runs that contributed
    pub run_count: usize,
}

impl FontStatistics {
    /// Scan every run of every page.
    ///
    /// Returns `None` when no run carries a letter: the document has no
    /// text to build an outline from.
    pub fn analyze<'a, I>(pages: I, options: &OutlineOptions) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Page>,
    {
        let samples: Vec<(f32, Color)> = pages
            .into_iter()
            .flat_map(|page| page.lines())
            .filter(|line| line.is_usable())
            .flat_map(|line| line.runs.iter())
            .filter(|run| run.has_alphabetic())
            .map(|run| (run.size, run.color))
            .collect();

        if samples.is_empty() {
            return None;
        }

        let mut sizes: Vec<f32> = samples.iter().map(|(size, _)| *size).collect();
        sizes.sort_by(f32::total_cmp);
        let body_size = median(&sizes);

        let mut quantized_sizes: Vec<f32> = sizes
            .iter()
            .map(|&s| quantize(s, options.size_quantum))
            .collect();
        quantized_sizes.dedup();

        let threshold = body_size.max(options.font_threshold);
        let max_levels = options.max_levels as usize;
        let mut heading_sizes: Vec<f32> = quantized_sizes
            .iter()
            .copied()
            .filter(|&s| s > threshold)
            .collect();
        if heading_sizes.is_empty() {
            let skip = quantized_sizes.len().saturating_sub(max_levels);
            heading_sizes = quantized_sizes[skip..].to_vec();
        }
        let mut ladder = SizeLadder::new(heading_sizes);
        ladder.tiers.truncate(max_levels);

        let body_color = mode(
            samples
                .iter()
                .filter(|(size, _)| {
                    (quantize(*size, options.size_quantum) - body_size).abs()
                        <= options.body_color_window
                })
                .map(|(_, color)| *color),
        );

        log::debug!(
            "Font statistics: body {:.1}pt, body colour {:?}, ladder {:?} ({} runs)",
            body_size,
            body_color,
            ladder.sizes(),
            samples.len()
        );

        Some(Self {
            body_size,
            body_color,
            quantized_sizes,
            ladder,
            run_count: samples.len(),
        })
    }
}

/// Median of a sorted, non-empty slice.
fn median(sorted: &[f32]) -> f32 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value; ties go to the value seen first.
fn mode<I: IntoIterator<Item = Color>>(values: I) -> Option<Color> {
    let mut counts: Vec<(Color, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(c, _)| *c == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
        .iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(c, _)| *c)
}
