//! Rendering options and configuration.

/// Options for rendering an outline.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Spaces per nesting level
    pub indent_width: usize,

    /// Append page numbers to titles
    pub show_pages: bool,

    /// Deepest level to render (`None` = all levels)
    pub max_level: Option<u8>,

    /// Character to use for list markers in Markdown
    pub list_marker: char,

    /// Escape special Markdown characters in titles
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Show or hide page numbers.
    pub fn with_pages(mut self, show: bool) -> Self {
        self.show_pages = show;
        self
    }

    /// Limit rendering to levels `1..=level`.
    pub fn with_max_level(mut self, level: u8) -> Self {
        self.max_level = Some(level.max(1));
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Check if a level should be rendered.
    pub fn includes_level(&self, level: u8) -> bool {
        self.max_level.map_or(true, |max| level <= max)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_pages: true,
            max_level: None,
            list_marker: '-',
            escape_special_chars: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.indent_width, 2);
        assert!(options.show_pages);
        assert!(options.includes_level(9));
    }

    #[test]
    fn test_max_level() {
        let options = RenderOptions::new().with_max_level(2);
        assert!(options.includes_level(2));
        assert!(!options.includes_level(3));

        // Clamped to at least one level
        assert_eq!(RenderOptions::new().with_max_level(0).max_level, Some(1));
    }
}
