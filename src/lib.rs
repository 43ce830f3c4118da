//! # autotoc
//!
//! Table-of-contents inference for documents that carry no usable outline.
//!
//! The engine reads the text layout of a document (pages of blocks, lines
//! and styled runs, as produced by any PDF text extraction layer) and
//! reconstructs a hierarchical outline of `(level, title, page)` entries
//! from font size, colour and position.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autotoc::{generate_outline_from_file, render};
//!
//! fn main() -> autotoc::Result<()> {
//!     // Load a layout dump and infer its outline
//!     let outline = generate_outline_from_file("layout.json")?;
//!
//!     // Render as an indented list
//!     let options = render::RenderOptions::default();
//!     println!("{}", render::to_text(&outline, &options)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font statistics**: body size, body colour and heading tiers per document
//! - **Noise suppression**: running headers, footers and page stamps are ignored
//! - **Wrapped headings**: consecutive heading lines merge into one title
//! - **Per-page fallback**: every page with content gets an anchor
//! - **Native outlines**: an embedded outline is preferred when it is usable
//! - **Parallel processing**: uses Rayon to classify pages concurrently

pub mod engine;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use engine::{
    DemotionCeiling, FontStatistics, NativeOutlinePolicy, OutlineEngine, OutlineOptions,
};
pub use error::{Error, Result};
pub use model::{
    BBox, Block, Color, LayoutDocument, LayoutSource, Line, Outline, OutlineEntry, OutlineItem,
    OutlineResult, OutlineSource, OutlineStats, Page, PageLayout, TextRun,
};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Infer the outline of a layout document with default options.
///
/// Any embedded outline is ignored; see [`resolve_outline`].
///
/// # Example
///
/// ```
/// use autotoc::{generate_outline, LayoutDocument};
///
/// let outline = generate_outline(&LayoutDocument::new()).unwrap();
/// assert_eq!(outline.count, 0);
/// ```
pub fn generate_outline(doc: &LayoutDocument) -> Result<OutlineResult> {
    generate_outline_with_options(doc, OutlineOptions::default())
}

/// Infer the outline of a layout document with custom options.
///
/// # Example
///
/// ```no_run
/// use autotoc::{generate_outline_with_options, LayoutDocument, OutlineOptions};
///
/// let doc = LayoutDocument::from_path("layout.json").unwrap();
/// let options = OutlineOptions::new()
///     .with_max_levels(4)
///     .with_force_page_heading(false);
/// let outline = generate_outline_with_options(&doc, options).unwrap();
/// ```
pub fn generate_outline_with_options(
    doc: &LayoutDocument,
    options: OutlineOptions,
) -> Result<OutlineResult> {
    let engine = OutlineEngine::new(options)?;
    Ok(engine.generate(doc))
}

/// Produce an outline, using the document's embedded outline when it is
/// present and usable, and inferring one otherwise.
pub fn resolve_outline(doc: &LayoutDocument, options: OutlineOptions) -> Result<OutlineResult> {
    let engine = OutlineEngine::new(options)?;
    Ok(engine.resolve(doc))
}

/// Parse a JSON layout document and resolve its outline with default options.
pub fn generate_outline_from_json(json: &str) -> Result<OutlineResult> {
    let doc = LayoutDocument::from_json(json)?;
    resolve_outline(&doc, OutlineOptions::default())
}

/// Load a JSON layout file and resolve its outline with default options.
pub fn generate_outline_from_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    let doc = LayoutDocument::from_path(path)?;
    resolve_outline(&doc, OutlineOptions::default())
}

/// Builder-style API for outline generation.
///
/// # Example
///
/// ```no_run
/// use autotoc::AutoToc;
///
/// let markdown = AutoToc::new()
///     .with_max_levels(4)
///     .with_margin_fraction(0.08)
///     .always_infer()
///     .generate_file("layout.json")?
///     .to_markdown()?;
/// # Ok::<(), autotoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoToc {
    options: OutlineOptions,
    render_options: RenderOptions,
}

impl AutoToc {
    /// Create a new AutoToc builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all engine options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the font size threshold for heading tiers.
    pub fn with_font_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_font_threshold(threshold);
        self
    }

    /// Set the maximum outline depth.
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.options = self.options.with_max_levels(levels);
        self
    }

    /// Disable the per-page fallback heading.
    pub fn without_page_fallback(mut self) -> Self {
        self.options = self.options.with_force_page_heading(false);
        self
    }

    /// Set the header/footer band as a fraction of page height.
    pub fn with_margin_fraction(mut self, fraction: f32) -> Self {
        self.options = self.options.with_margin_fraction(fraction);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Ignore embedded outlines.
    pub fn always_infer(mut self) -> Self {
        self.options = self.options.always_infer();
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Generate the outline of a layout document.
    pub fn generate(self, doc: &LayoutDocument) -> Result<AutoTocResult> {
        let engine = OutlineEngine::new(self.options)?;
        Ok(AutoTocResult {
            outline: engine.resolve(doc),
            render_options: self.render_options,
        })
    }

    /// Generate the outline of a layout source.
    pub fn generate_source<S: LayoutSource + ?Sized>(self, source: &S) -> Result<AutoTocResult> {
        self.generate(&LayoutDocument::from_source(source))
    }

    /// Generate the outline of a JSON layout document.
    pub fn generate_json(self, json: &str) -> Result<AutoTocResult> {
        self.generate(&LayoutDocument::from_json(json)?)
    }

    /// Generate the outline of a JSON layout file.
    pub fn generate_file<P: AsRef<Path>>(self, path: P) -> Result<AutoTocResult> {
        self.generate(&LayoutDocument::from_path(path)?)
    }
}

/// Result of outline generation with its render settings.
#[derive(Debug, Clone)]
pub struct AutoTocResult {
    /// The generated outline
    pub outline: OutlineResult,
    /// Render options to use
    render_options: RenderOptions,
}

impl AutoTocResult {
    /// Convert to a nested Markdown list.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.outline, &self.render_options)
    }

    /// Convert to indented plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.outline, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.outline, format)
    }

    /// Entries as `(level, title, page)` triples.
    pub fn triples(&self) -> Vec<(u8, String, u32)> {
        self.outline.to_triples()
    }

    /// Get the outline.
    pub fn outline(&self) -> &OutlineResult {
        &self.outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"{
        "page_count": 1,
        "pages": [{
            "status": "extracted",
            "index": 0,
            "height": 792.0,
            "blocks": [{ "lines": [
                { "runs": [{ "text": "Release Notes", "size": 20.0 }],
                  "bbox": { "x0": 72.0, "y0": 100.0, "x1": 300.0, "y1": 120.0 } },
                { "runs": [{ "text": "Fixed several bugs.", "size": 10.0 }],
                  "bbox": { "x0": 72.0, "y0": 140.0, "x1": 300.0, "y1": 150.0 } },
                { "runs": [{ "text": "Improved startup time.", "size": 10.0 }],
                  "bbox": { "x0": 72.0, "y0": 160.0, "x1": 300.0, "y1": 170.0 } }
            ]}]
        }]
    }"#;

    #[test]
    fn test_autotoc_builder() {
        let autotoc = AutoToc::new()
            .with_max_levels(4)
            .without_page_fallback()
            .sequential()
            .always_infer();

        assert_eq!(autotoc.options.max_levels, 4);
        assert!(!autotoc.options.force_page_heading);
        assert!(!autotoc.options.parallel);
        assert_eq!(autotoc.options.native_outline, NativeOutlinePolicy::AlwaysInfer);
    }

    #[test]
    fn test_generate_json() {
        let result = AutoToc::new().generate_json(LAYOUT).unwrap();
        assert_eq!(result.triples(), vec![(1, "Release Notes".to_string(), 1)]);
        assert_eq!(result.to_text().unwrap(), "Release Notes (p. 1)");
        assert_eq!(result.to_markdown().unwrap(), "- Release Notes (p. 1)");
    }

    #[test]
    fn test_generate_outline_from_json() {
        let outline = generate_outline_from_json(LAYOUT).unwrap();
        assert_eq!(outline.count, 1);
        assert_eq!(outline.source, OutlineSource::Inferred);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = AutoToc::new().with_max_levels(0).generate(&LayoutDocument::new());
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

        let options = OutlineOptions::new().with_font_threshold(-2.0);
        let result = generate_outline_with_options(&LayoutDocument::new(), options);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = generate_outline_from_json("{ \"page_count\": ");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
