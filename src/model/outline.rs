//! Outline (table of contents) types produced by the engine.

use serde::{Deserialize, Serialize};

use super::Color;

/// One entry of a reconstructed table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Hierarchy level (1 = top)
    pub level: u8,
    /// Entry title
    pub title: String,
    /// Target page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: u8, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }

    /// `(level, title, page)` form used by bookmark writers.
    pub fn as_triple(&self) -> (u8, &str, u32) {
        (self.level, self.title.as_str(), self.page)
    }
}

/// Which path produced an outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineSource {
    /// Reconstructed from text layout
    #[default]
    Inferred,
    /// Taken from the document's embedded outline
    Native,
}

/// Statistics collected while building an outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineStats {
    /// Pages that went through classification
    pub pages_scanned: u32,

    /// Pages the extraction layer failed to deliver
    pub pages_failed: u32,

    /// Pages dropped for an unusable height or an index past the page count
    pub pages_skipped: u32,

    /// Lines skipped for missing bounding box or run data
    pub lines_malformed: u32,

    /// Lines removed by the header/footer band or pagination filter
    pub lines_filtered: u32,

    /// Headings promoted by the per-page fallback
    pub fallback_headings: u32,

    /// Headings demoted below their page anchor
    pub demoted: u32,

    /// Entries dropped as exact duplicates
    pub duplicates_dropped: u32,

    /// Median font size of the document
    pub body_size: Option<f32>,

    /// Dominant colour of body-sized text
    pub body_color: Option<Color>,

    /// Heading size ladder, largest first (index + 1 = level)
    pub heading_sizes: Vec<f32>,
}

/// Result of outline generation: the entries plus their count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Entries ordered by page, then vertical position
    pub entries: Vec<OutlineEntry>,

    /// Number of entries
    pub count: usize,

    /// Which path produced the entries
    pub source: OutlineSource,

    /// Generation statistics
    pub stats: OutlineStats,
}

impl OutlineResult {
    /// Create a result from ordered entries.
    pub fn new(entries: Vec<OutlineEntry>, source: OutlineSource, stats: OutlineStats) -> Self {
        Self {
            count: entries.len(),
            entries,
            source,
            stats,
        }
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as `(level, title, page)` triples.
    pub fn to_triples(&self) -> Vec<(u8, String, u32)> {
        self.entries
            .iter()
            .map(|e| (e.level, e.title.clone(), e.page))
            .collect()
    }

    /// Nest the flat entries into a tree.
    pub fn to_tree(&self) -> Outline {
        Outline::from_entries(&self.entries)
    }
}

/// Nested outline (bookmark tree).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level outline items
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Nest flat entries by level.
    ///
    /// Each entry becomes a child of the closest preceding entry with a
    /// smaller level. An entry with no such predecessor becomes a root.
    pub fn from_entries(entries: &[OutlineEntry]) -> Self {
        let mut items = Vec::new();
        let mut open: Vec<u8> = Vec::new();

        for entry in entries {
            while open.last().is_some_and(|&level| level >= entry.level) {
                open.pop();
            }
            let item = OutlineItem::new(entry.title.clone(), entry.page, entry.level);
            attach(&mut items, open.len(), item);
            open.push(entry.level);
        }

        Self { items }
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of items (including nested).
    pub fn total_items(&self) -> usize {
        fn count_items(items: &[OutlineItem]) -> usize {
            items
                .iter()
                .map(|item| 1 + count_items(&item.children))
                .sum()
        }
        count_items(&self.items)
    }

    /// Get the nesting depth of the tree.
    pub fn depth(&self) -> usize {
        fn depth_of(items: &[OutlineItem]) -> usize {
            items
                .iter()
                .map(|item| 1 + depth_of(&item.children))
                .max()
                .unwrap_or(0)
        }
        depth_of(&self.items)
    }
}

fn attach(siblings: &mut Vec<OutlineItem>, depth: usize, item: OutlineItem) {
    if depth > 0 {
        if let Some(parent) = siblings.last_mut() {
            return attach(&mut parent.children, depth - 1, item);
        }
    }
    siblings.push(item);
}

/// A single outline item (bookmark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Item title
    pub title: String,

    /// Target page number (1-indexed)
    pub page: u32,

    /// Level of the source entry (1 = top)
    pub level: u8,

    /// Child items
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(title: impl Into<String>, page: u32, level: u8) -> Self {
        Self {
            title: title.into(),
            page,
            level,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    pub fn add_child(&mut self, child: OutlineItem) {
        self.children.push(child);
    }
}
