//! Markdown rendering for outlines.

use crate::error::Result;
use crate::model::{OutlineItem, OutlineResult};

use super::RenderOptions;

/// Convert an outline to a nested Markdown list.
pub fn to_markdown(result: &OutlineResult, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(result)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render an outline to Markdown.
    ///
    /// Nesting follows the outline tree rather than raw levels, so a level
    /// that skips ahead of its parent does not produce an over-indented item.
    pub fn render(&self, result: &OutlineResult) -> Result<String> {
        let tree = result.to_tree();
        let mut output = String::new();
        for item in &tree.items {
            self.render_item(&mut output, item, 0);
        }
        Ok(output.trim_end().to_string())
    }

    fn render_item(&self, output: &mut String, item: &OutlineItem, depth: usize) {
        if !self.options.includes_level(item.level) {
            return;
        }

        output.push_str(&" ".repeat(depth * self.options.indent_width));
        output.push(self.options.list_marker);
        output.push(' ');
        if self.options.escape_special_chars {
            output.push_str(&escape_markdown(&item.title));
        } else {
            output.push_str(&item.title);
        }
        if self.options.show_pages {
            output.push_str(&format!(" (p. {})", item.page));
        }
        output.push('\n');

        for child in &item.children {
            self.render_item(output, child, depth + 1);
        }
    }
}

/// Escape characters that Markdown would read as inline formatting.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
