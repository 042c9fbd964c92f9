//! Markdown to HTML conversion.
//!
//! [`CommonMarkConverter`] is the default [`MarkupConverter`], backed by
//! `pulldown-cmark`.

use mdview_core::{MarkupConverter, Result};
use pulldown_cmark::{Options, Parser, html};

/// `pulldown-cmark` backed converter.
///
/// Tables and strikethrough are enabled by default.
///
/// # Example
///
/// ```
/// use mdview::CommonMarkConverter;
/// use mdview_core::MarkupConverter;
///
/// let html = CommonMarkConverter::new().to_html("# Title\n\nBody text\n").unwrap();
/// assert!(html.contains("<h1>Title</h1>"));
/// assert!(html.contains("<p>Body text</p>"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkConverter {
    options: Options,
}

impl CommonMarkConverter {
    /// Create a converter with the default extensions.
    pub fn new() -> Self {
        Self::with_options(Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
    }

    /// Create a converter with an explicit extension set.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// The extension set in use.
    pub fn options(&self) -> Options {
        self.options
    }
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for CommonMarkConverter {
    fn to_html(&self, text: &str) -> Result<String> {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_heading_and_paragraph() {
        let html = CommonMarkConverter::new()
            .to_html("# Title\n\nBody text\n")
            .unwrap();
        assert_eq!(html, "<h1>Title</h1>\n<p>Body text</p>\n");
    }

    #[test]
    fn test_converter_list() {
        let html = CommonMarkConverter::new()
            .to_html("* one\n* two\n")
            .unwrap();
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn test_converter_tables_enabled_by_default() {
        let html = CommonMarkConverter::new()
            .to_html("| a | b |\n|---|---|\n| 1 | 2 |\n")
            .unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_converter_without_extensions() {
        let converter = CommonMarkConverter::with_options(Options::empty());
        assert!(converter.options().is_empty());
        let html = converter.to_html("~~gone~~\n").unwrap();
        assert!(!html.contains("<del>"));
    }

    #[test]
    fn test_converter_strikethrough() {
        let html = CommonMarkConverter::new().to_html("~~gone~~\n").unwrap();
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_converter_empty_input() {
        let html = CommonMarkConverter::new().to_html("").unwrap();
        assert!(html.is_empty());
    }
}
