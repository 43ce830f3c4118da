//! Embedded (native) outline handling.
//!
//! Documents that already carry a bookmark tree are usually better served by
//! it than by inference. It is only trusted after cleanup.

use super::builder::OutlineBuilder;
use super::text::{has_alphabetic, normalize_title};
use crate::model::OutlineEntry;

/// Clean up a native outline.
///
/// Titles are trimmed (and normalized when `normalize_titles` is set),
/// entries without letters or with a page outside `1..=page_count` are
/// dropped, levels are clamped into `1..=max_levels`, exact duplicates are
/// removed. Returns `None` when nothing survives.
pub fn sanitize(
    entries: &[OutlineEntry],
    page_count: u32,
    max_levels: u8,
    normalize_titles: bool,
) -> Option<Vec<OutlineEntry>> {
    let mut builder = OutlineBuilder::new(page_count, max_levels);

    for entry in entries {
        let title = if normalize_titles {
            normalize_title(&entry.title)
        } else {
            entry.title.trim().to_string()
        };
        if title.is_empty() || !has_alphabetic(&title) {
            continue;
        }
        let level = entry.level.clamp(1, max_levels);
        builder.push(level, &title, entry.page);
    }

    let total = entries.len();
    let sanitized = builder.build();
    if sanitized.len() < total {
        log::debug!(
            "Native outline: kept {} of {} entries",
            sanitized.len(),
            total
        );
    }

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}
