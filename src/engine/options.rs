//! Engine options and configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for outline generation.
///
/// Every numeric heuristic is tunable; the defaults were calibrated on
/// technical manuals and may need adjusting for other document families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Minimum size, combined with the body size, above which a size is a heading tier
    pub font_threshold: f32,

    /// Maximum hierarchy depth and number of heading tiers
    pub max_levels: u8,

    /// Promote the largest line of a page that has no heading
    pub force_page_heading: bool,

    /// Fraction of page height excluded at top and bottom
    pub header_footer_margin_fraction: f32,

    /// Font size quantization step in points
    pub size_quantum: f32,

    /// Size tolerance (relative to body and tier sizes) for colour-highlighted headings
    pub color_size_tolerance: f32,

    /// Maximum distance from the body size for runs that vote on the body colour
    pub body_color_window: f32,

    /// Upper bound for levels produced by same-level demotion
    pub demotion_ceiling: DemotionCeiling,

    /// NFC-normalize titles and collapse internal whitespace
    pub normalize_titles: bool,

    /// Classify pages in parallel
    pub parallel: bool,

    /// Whether an embedded outline takes precedence over inference
    pub native_outline: NativeOutlinePolicy,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading font threshold.
    pub fn with_font_threshold(mut self, threshold: f32) -> Self {
        self.font_threshold = threshold;
        self
    }

    /// Set the maximum number of levels.
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.max_levels = levels;
        self
    }

    /// Enable or disable the per-page fallback heading.
    pub fn with_force_page_heading(mut self, force: bool) -> Self {
        self.force_page_heading = force;
        self
    }

    /// Set the header/footer margin as a fraction of page height.
    pub fn with_margin_fraction(mut self, fraction: f32) -> Self {
        self.header_footer_margin_fraction = fraction;
        self
    }

    /// Set the size quantization step.
    pub fn with_size_quantum(mut self, quantum: f32) -> Self {
        self.size_quantum = quantum;
        self
    }

    /// Set the colour heading size tolerance.
    pub fn with_color_tolerance(mut self, tolerance: f32) -> Self {
        self.color_size_tolerance = tolerance;
        self
    }

    /// Set the body colour size window.
    pub fn with_body_color_window(mut self, window: f32) -> Self {
        self.body_color_window = window;
        self
    }

    /// Set the demotion ceiling.
    pub fn with_demotion_ceiling(mut self, ceiling: DemotionCeiling) -> Self {
        self.demotion_ceiling = ceiling;
        self
    }

    /// Enable or disable title normalization.
    pub fn with_title_normalization(mut self, normalize: bool) -> Self {
        self.normalize_titles = normalize;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the native outline policy.
    pub fn with_native_outline(mut self, policy: NativeOutlinePolicy) -> Self {
        self.native_outline = policy;
        self
    }

    /// Always infer, ignoring any embedded outline.
    pub fn always_infer(mut self) -> Self {
        self.native_outline = NativeOutlinePolicy::AlwaysInfer;
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that every option is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_levels < 1 {
            return Err(Error::InvalidConfiguration(
                "max_levels must be at least 1".to_string(),
            ));
        }
        if !self.font_threshold.is_finite() || self.font_threshold < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "font_threshold must be a non-negative number, got {}",
                self.font_threshold
            )));
        }
        if !(0.0..0.5).contains(&self.header_footer_margin_fraction) {
            return Err(Error::InvalidConfiguration(format!(
                "header_footer_margin_fraction must be in [0, 0.5), got {}",
                self.header_footer_margin_fraction
            )));
        }
        if !self.size_quantum.is_finite() || self.size_quantum <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "size_quantum must be positive, got {}",
                self.size_quantum
            )));
        }
        if !self.color_size_tolerance.is_finite() || self.color_size_tolerance <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "color_size_tolerance must be positive, got {}",
                self.color_size_tolerance
            )));
        }
        if !self.body_color_window.is_finite() || self.body_color_window < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "body_color_window must be a non-negative number, got {}",
                self.body_color_window
            )));
        }
        Ok(())
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            font_threshold: 14.0,
            max_levels: 3,
            force_page_heading: true,
            header_footer_margin_fraction: 0.06,
            size_quantum: 0.5,
            color_size_tolerance: 0.9,
            body_color_window: 1.0,
            demotion_ceiling: DemotionCeiling::MaxLevels,
            normalize_titles: true,
            parallel: true,
            native_outline: NativeOutlinePolicy::PreferNative,
        }
    }
}

/// Upper bound applied when a heading is demoted below its page anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemotionCeiling {
    /// Clamp to `max_levels`
    #[default]
    MaxLevels,
    /// Clamp to the deepest level of the heading size ladder
    Ladder,
}

/// How an embedded outline interacts with inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeOutlinePolicy {
    /// Use the embedded outline when it is present and usable
    #[default]
    PreferNative,
    /// Ignore the embedded outline
    AlwaysInfer,
}
