//! Layout records delivered by the text extraction layer.
//!
//! Coordinates use a top-left origin with y growing downward, in the same
//! unit as font sizes (points).

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::OutlineEntry;
use crate::error::{Error, Result};

/// Opaque, comparable text colour token (packed sRGB, `0xRRGGBB`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Plain black, the usual body text colour.
    pub const BLACK: Color = Color(0x000000);

    /// Build a colour from its components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Split into `(r, g, b)` components.
    pub fn components(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xFF_FFFF)
    }
}

/// A styled run of text within a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Text colour
    #[serde(default)]
    pub color: Color,
}

impl TextRun {
    /// Create a validated text run.
    pub fn new(text: impl Into<String>, size: f32, color: Color) -> Result<Self> {
        let run = Self {
            text: text.into(),
            size,
            color,
        };
        if !run.is_usable() {
            return Err(Error::MalformedRecord(format!(
                "text run has invalid font size {}",
                size
            )));
        }
        Ok(run)
    }

    /// Check that the font size is a finite, positive number.
    pub fn is_usable(&self) -> bool {
        self.size.is_finite() && self.size > 0.0
    }

    /// Check if the run carries at least one letter.
    pub fn has_alphabetic(&self) -> bool {
        self.text.chars().any(char::is_alphabetic)
    }
}

/// Axis-aligned bounding box `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Vertical centre.
    pub fn y_mid(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }

    /// Finite coordinates, non-inverted.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }
}

/// A text line composed of styled runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Runs in reading order
    pub runs: Vec<TextRun>,
    /// Line bounding box
    pub bbox: BBox,
}

impl Line {
    /// Create a validated line.
    pub fn new(runs: Vec<TextRun>, bbox: BBox) -> Result<Self> {
        let line = Self { runs, bbox };
        if line.runs.is_empty() {
            return Err(Error::MalformedRecord("line has no text runs".to_string()));
        }
        if !line.bbox.is_valid() {
            return Err(Error::MalformedRecord(format!(
                "line has invalid bounding box {:?}",
                line.bbox
            )));
        }
        if let Some(run) = line.runs.iter().find(|r| !r.is_usable()) {
            return Err(Error::MalformedRecord(format!(
                "line contains run with invalid font size {}",
                run.size
            )));
        }
        Ok(line)
    }

    /// Check the invariants enforced by [`Line::new`].
    ///
    /// Deserialized records bypass the constructor, so the engine re-checks.
    pub fn is_usable(&self) -> bool {
        !self.runs.is_empty() && self.bbox.is_valid() && self.runs.iter().all(TextRun::is_usable)
    }

    fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(|r| !r.text.is_empty())
    }

    /// Space-joined text of all non-empty runs.
    pub fn text(&self) -> String {
        self.text_runs()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Largest run size (0.0 for a line without text).
    pub fn max_size(&self) -> f32 {
        self.text_runs().map(|r| r.size).fold(0.0, f32::max)
    }

    /// Most frequent run colour by run count; ties go to the earliest run.
    pub fn dominant_color(&self) -> Option<Color> {
        let mut counts: Vec<(Color, usize)> = Vec::new();
        for run in self.text_runs() {
            match counts.iter_mut().find(|(c, _)| *c == run.color) {
                Some((_, n)) => *n += 1,
                None => counts.push((run.color, 1)),
            }
        }
        // max_by_key returns the last maximum, so walk in reverse.
        counts
            .iter()
            .rev()
            .max_by_key(|(_, n)| *n)
            .map(|(c, _)| *c)
    }

    /// Vertical centre of the line.
    pub fn y_mid(&self) -> f32 {
        self.bbox.y_mid()
    }
}

/// A layout block: a group of consecutive lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Lines in reading order
    pub lines: Vec<Line>,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from lines.
    pub fn with_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Add a line to the block.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }
}

/// A single page of extracted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-indexed)
    pub index: u32,
    /// Page height in points
    pub height: f32,
    /// Layout blocks in reading order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: u32, height: f32) -> Self {
        Self {
            index,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty US Letter page (792pt tall).
    pub fn letter(index: u32) -> Self {
        Self::new(index, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate lines in block-then-line order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Total number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    /// Check that the page height is usable for margin computation.
    pub fn is_usable(&self) -> bool {
        self.height.is_finite() && self.height > 0.0
    }
}

/// A page reported by the extraction layer, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageLayout {
    /// Layout was extracted
    Extracted(Page),
    /// Extraction failed for this page
    Failed(PageFailure),
}

impl PageLayout {
    /// Page index (0-indexed).
    pub fn index(&self) -> u32 {
        match self {
            PageLayout::Extracted(page) => page.index,
            PageLayout::Failed(failure) => failure.index,
        }
    }

    /// Get the extracted page, if any.
    pub fn as_page(&self) -> Option<&Page> {
        match self {
            PageLayout::Extracted(page) => Some(page),
            PageLayout::Failed(_) => None,
        }
    }
}

/// A per-page extraction failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFailure {
    /// Page index (0-indexed)
    pub index: u32,
    /// Reason given by the extraction layer
    pub reason: String,
}

/// The extraction layer, seen from the engine.
///
/// Implementations wrap whatever turns document pages into layout records.
pub trait LayoutSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract one page (0-indexed).
    fn load_page(&self, index: u32) -> Result<Page>;

    /// The document's embedded outline, if it has one.
    fn native_outline(&self) -> Option<Vec<OutlineEntry>> {
        None
    }
}

/// Layout of a whole document: the engine's only input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Number of pages in the source document
    pub page_count: u32,

    /// Per-page extraction results
    #[serde(default)]
    pub pages: Vec<PageLayout>,

    /// Embedded outline of the source document, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_outline: Option<Vec<OutlineEntry>>,
}

impl LayoutDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a known page count.
    pub fn with_page_count(page_count: u32) -> Self {
        Self {
            page_count,
            ..Self::default()
        }
    }

    /// Add an extracted page, growing the page count if needed.
    pub fn add_page(&mut self, page: Page) {
        self.page_count = self.page_count.max(page.index + 1);
        self.pages.push(PageLayout::Extracted(page));
    }

    /// Record a page the extraction layer failed to deliver.
    pub fn add_failed_page(&mut self, index: u32, reason: impl Into<String>) {
        self.page_count = self.page_count.max(index + 1);
        self.pages.push(PageLayout::Failed(PageFailure {
            index,
            reason: reason.into(),
        }));
    }

    /// Attach the document's native outline.
    pub fn with_native_outline(mut self, outline: Vec<OutlineEntry>) -> Self {
        self.native_outline = Some(outline);
        self
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if a non-empty native outline is attached.
    pub fn has_native_outline(&self) -> bool {
        self.native_outline
            .as_ref()
            .is_some_and(|outline| !outline.is_empty())
    }

    /// Get an extracted page by index (0-indexed).
    pub fn page(&self, index: u32) -> Result<&Page> {
        if index >= self.page_count {
            return Err(Error::PageOutOfRange(index + 1, self.page_count));
        }
        match self.pages.iter().find(|record| record.index() == index) {
            Some(PageLayout::Extracted(page)) => Ok(page),
            Some(PageLayout::Failed(failure)) => {
                Err(Error::PageExtraction(index + 1, failure.reason.clone()))
            }
            None => Err(Error::PageExtraction(index + 1, "page not delivered".to_string())),
        }
    }

    /// Iterate successfully extracted pages.
    pub fn extracted_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter_map(PageLayout::as_page)
    }

    /// Collect every page from a layout source.
    ///
    /// A page the source fails to load is kept as [`PageLayout::Failed`].
    pub fn from_source<S: LayoutSource + ?Sized>(source: &S) -> Self {
        let page_count = source.page_count();
        let pages = (0..page_count)
            .map(|index| match source.load_page(index) {
                Ok(page) => PageLayout::Extracted(page),
                Err(e) => {
                    log::warn!("Failed to extract layout for page {}: {}", index + 1, e);
                    PageLayout::Failed(PageFailure {
                        index,
                        reason: e.to_string(),
                    })
                }
            })
            .collect();

        Self {
            page_count,
            pages,
            native_outline: source.native_outline(),
        }
    }

    /// Parse a layout document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a layout document from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a layout document from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
