//! Markdown to HTML conversion.

use pulldown_cmark::{Event, Options, Parser, html};

/// Markdown parsing options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown extensions.
    ///
    /// Off by default, which gives plain `CommonMark` rendering. When on, the
    /// parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    pub gfm: bool,
}

impl MarkdownOptions {
    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Render markdown to an HTML fragment.
///
/// Raw HTML in the source is emitted as escaped text rather than passed
/// through, so the result is always safe to feed to the rewriter.
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn basic(markdown: &str) -> String {
        render_markdown(markdown, &MarkdownOptions::default())
    }

    #[test]
    fn test_render_headings() {
        assert_eq!(basic("## Intro\n"), "<h2>Intro</h2>\n");
    }

    #[test]
    fn test_render_paragraph_with_emphasis() {
        assert_eq!(basic("Some *text*."), "<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = basic("<div>hi</div>\n\ntext <b>x</b>");
        assert!(!html.contains("<div>"));
        assert!(html.contains("&lt;div&gt;"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_tables_require_gfm() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(!basic(markdown).contains("<table>"));
        let gfm = render_markdown(markdown, &MarkdownOptions { gfm: true });
        assert!(gfm.contains("<table>"));
    }

    #[test]
    fn test_void_elements_self_close() {
        let html = basic("a  \nb\n\n---\n");
        assert!(html.contains("<br />"));
        assert!(html.contains("<hr />"));
    }
}
