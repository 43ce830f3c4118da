//! Data model for outline inference.
//!
//! Layout records come in from the text extraction layer; outline types go
//! out to whatever stores or displays bookmarks. Neither side is tied to a
//! particular PDF library.

mod layout;
mod outline;

pub use layout::{
    BBox, Block, Color, LayoutDocument, LayoutSource, Line, Page, PageFailure, PageLayout,
    TextRun,
};
pub use outline::{Outline, OutlineEntry, OutlineItem, OutlineResult, OutlineSource, OutlineStats};
