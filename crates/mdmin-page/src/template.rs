//! HTML page template for single-file output.
//!
//! The page is a fixed layout with a floating menu panel on the left and the
//! document on the right. Template fields are exactly the template fields of
//! [`PageModel`]: `content`, `list_menu`, `content_style`, `menu_style`,
//! `menu_wrap_style`, `scroll_bar`, `menu_logo` and `content_logo`.

use std::path::Path;

use mdmin_renderer::PageModel;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Built-in page layout.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/page.html");

const TEMPLATE_NAME: &str = "page.html";

/// Error returned while assembling a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Substitutes a [`PageModel`] into a page template.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Renderer using [`DEFAULT_TEMPLATE`].
    pub fn new() -> Result<Self, PageError> {
        Self::from_template(DEFAULT_TEMPLATE)
    }

    /// Renderer using a custom template source.
    ///
    /// Fields are inserted without escaping. Referencing a field that is not
    /// part of the page model fails at render time.
    pub fn from_template(source: impl Into<String>) -> Result<Self, PageError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(TEMPLATE_NAME, source.into())?;
        Ok(Self { env })
    }

    /// Renderer using a template file.
    pub fn from_path(path: &Path) -> Result<Self, PageError> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded page template");
        Self::from_template(source)
    }

    /// Render the complete page.
    pub fn render(&self, page: &PageModel) -> Result<String, PageError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(page)?)
    }
}

#[cfg(test)]
mod tests {
    use mdmin_renderer::{ConvertOptions, Converter, MenuMode};
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(mode: &str, markdown: &str) -> PageModel {
        Converter::new(ConvertOptions {
            mode: mode.parse().unwrap(),
            ..ConvertOptions::default()
        })
        .convert(markdown)
        .unwrap()
    }

    #[test]
    fn test_render_contains_content_and_menu() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer
            .render(&page("h2", "## Intro\n\nHello world\n"))
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<h2 id="id-h2-1">Intro</h2>"#));
        assert!(html.contains(r##"<a href="#id-h2-1">Intro</a>"##));
        assert!(html.contains("<p>Hello world</p>"));
    }

    #[test]
    fn test_render_enabled_styles() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render(&page("h3", "### A\n")).unwrap();
        assert!(html.contains("float: right;"));
        assert!(html.contains("::-webkit-scrollbar"));
        assert!(html.contains("top: 625px"));
    }

    #[test]
    fn test_render_disabled_styles() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render(&page("none", "### A\n")).unwrap();
        assert!(html.contains("margin: 0 auto;"));
        assert!(!html.contains("::-webkit-scrollbar"));
        assert!(!html.contains("<ul>"));
        assert!(html.contains(r#"<div class="logo">Generated by"#));
    }

    #[test]
    fn test_render_does_not_escape_fields() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render(&page("h2", "## a & b\n")).unwrap();
        assert!(html.contains(">a &amp; b</h2>"));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn test_custom_template() {
        let renderer = PageRenderer::from_template("[{{ list_menu }}]{{ content }}").unwrap();
        let model = PageModel {
            mode: MenuMode::Disabled,
            content: "<p>x</p>".to_owned(),
            ..PageModel::default()
        };
        assert_eq!(renderer.render(&model).unwrap(), "[]<p>x</p>");
    }

    #[test]
    fn test_non_template_fields_rejected() {
        for field in ["{{ mode }}", "{{ headings }}"] {
            let renderer = PageRenderer::from_template(field).unwrap();
            let result = renderer.render(&PageModel::default());
            assert!(matches!(result, Err(PageError::Template(_))));
        }
    }

    #[test]
    fn test_unknown_field_is_error() {
        let renderer = PageRenderer::from_template("{{ title }}").unwrap();
        assert!(renderer.render(&PageModel::default()).is_err());
    }

    #[test]
    fn test_syntax_error_reported() {
        assert!(matches!(
            PageRenderer::from_template("{{ content "),
            Err(PageError::Template(_))
        ));
    }

    #[test]
    fn test_missing_template_file() {
        let result = PageRenderer::from_path(Path::new("/nonexistent/page.html"));
        assert!(matches!(result, Err(PageError::Io(_))));
    }
}
