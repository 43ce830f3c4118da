//! Error types for autotoc library.

use std::io;
use thiserror::Error;

/// Result type alias for autotoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline inference.
///
/// Most irregular input is not an error: documents without text, malformed
/// lines and pages the extraction layer could not deliver are skipped and
/// counted in [`OutlineStats`](crate::model::OutlineStats) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading layout or config files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Engine options are out of range. Raised before any page is scanned.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A layout record failed validation at construction.
    #[error("Malformed layout record: {0}")]
    MalformedRecord(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The extraction layer could not deliver a page.
    #[error("Layout extraction failed for page {0}: {1}")]
    PageExtraction(u32, String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
