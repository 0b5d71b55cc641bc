//! Document-level result handed to page templating.

use crate::error::RewriteError;
use crate::markdown::{MarkdownOptions, render_markdown};
use crate::mode::MenuMode;
use crate::rewriter::{TokenPolicy, rewrite_html};

const ATTRIBUTION: &str =
    r#"Generated by <a href="https://github.com/fairlyblank/md2min">md2min</a>"#;

const SCROLL_BAR_CSS: &str = "::-webkit-scrollbar {\twidth: 4px;\theight: 8px; } \
    ::-webkit-scrollbar-track-piece {\tbackground-color: #ffffff;\tborder-radius: 4px; } \
    ::-webkit-scrollbar-thumb {\tbackground-color: #cfcfcf;\tborder-radius: 4px; }";

/// Rewritten content, serialized menu and mode-dependent styling.
///
/// Every field except `mode` is a template field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageModel {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub mode: MenuMode,
    /// Number of tracked headings found.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub headings: usize,
    /// Rewritten document HTML.
    pub content: String,
    /// Serialized `<ul>` menu; empty when the menu is disabled.
    pub list_menu: String,
    pub content_style: String,
    pub menu_style: String,
    pub menu_wrap_style: String,
    pub scroll_bar: String,
    pub menu_logo: String,
    pub content_logo: String,
}

impl PageModel {
    /// Model with styling for `mode` and no content yet.
    #[must_use]
    pub fn styled(mode: MenuMode) -> Self {
        match mode {
            MenuMode::Disabled => Self {
                mode,
                content_style: "margin: 0 auto;".to_owned(),
                menu_style: "background: #ffffff; overflow: hidden;".to_owned(),
                content_logo: format!(r#"<div class="logo">{ATTRIBUTION}</div>"#),
                ..Self::default()
            },
            MenuMode::Track(_) => Self {
                mode,
                content_style: "float: right;".to_owned(),
                menu_style: "background: #ffffff; overflow-x: hidden; overflow-y: scroll; \
                             width: 200px; height: 550px;"
                    .to_owned(),
                menu_wrap_style: "width: 200px;".to_owned(),
                menu_logo: format!(
                    r#"<div class="logo" style="font: 10px Helvetica, arial, freesans, clean, sans-serif; display: block; width: 200px; position: relative; top: 625px; right: 10px;">{ATTRIBUTION}</div>"#
                ),
                scroll_bar: SCROLL_BAR_CSS.to_owned(),
                ..Self::default()
            },
        }
    }
}

/// Settings for one conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mode: MenuMode,
    pub markdown: MarkdownOptions,
    pub policy: TokenPolicy,
}

/// Converts one markdown document into a [`PageModel`].
///
/// Each call to [`convert`](Self::convert) runs with fresh identifier,
/// title and menu state, so documents never influence each other.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Render markdown, rewrite the HTML and assemble the page model.
    pub fn convert(&self, markdown: &str) -> Result<PageModel, RewriteError> {
        let html = render_markdown(markdown, &self.options.markdown);
        self.convert_html(html.as_bytes())
    }

    /// Rewrite already-rendered HTML and assemble the page model.
    pub fn convert_html(&self, html: &[u8]) -> Result<PageModel, RewriteError> {
        let mode = self.options.mode;
        let rewritten = rewrite_html(html, mode, self.options.policy)?;

        let mut page = PageModel::styled(mode);
        page.headings = rewritten.menu.len();
        page.content = rewritten.content;
        if mode.is_enabled() {
            page.list_menu = rewritten.menu.serialize();
        }
        Ok(page)
    }
}
