//! Plain text rendering: one indented line per entry.

use crate::error::Result;
use crate::model::{OutlineItem, OutlineResult};

use super::RenderOptions;

/// Convert an outline to indented plain text.
///
/// ```text
/// Installation Guide (p. 1)
///   Requirements (p. 1)
/// ```
///
/// Indentation follows tree depth, matching the Markdown renderer.
pub fn to_text(result: &OutlineResult, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();
    for item in &result.to_tree().items {
        write_item(&mut output, item, 0, options);
    }
    Ok(output.trim_end().to_string())
}

fn write_item(output: &mut String, item: &OutlineItem, depth: usize, options: &RenderOptions) {
    if !options.includes_level(item.level) {
        return;
    }

    output.push_str(&" ".repeat(depth * options.indent_width));
    output.push_str(&item.title);
    if options.show_pages {
        output.push_str(&format!(" (p. {})", item.page));
    }
    output.push('\n');

    for child in &item.children {
        write_item(output, child, depth + 1, options);
    }
}
