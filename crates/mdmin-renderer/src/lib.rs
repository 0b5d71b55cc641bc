//! Markdown to HTML rendering with a heading-anchored navigation menu.
//!
//! The core is [`TokenRewriter`]: a forward-only pass over an HTML token
//! stream that gives every heading of one configured level a stable `id`,
//! collects the heading text, and emits a matching [`MenuList`].
//!
//! # Architecture
//!
//! - [`render_markdown`]: markdown → HTML via `pulldown-cmark`
//! - [`HtmlTokenizer`]: HTML → [`Token`]s via `quick-xml`
//! - [`TokenRewriter`]: tokens → rewritten HTML + menu, using
//!   [`IdAllocator`] and [`HeadingText`]
//! - [`Converter`]: runs all of the above and returns a [`PageModel`]
//!
//! # Example
//!
//! ```
//! use mdmin_renderer::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions {
//!     mode: "h2".parse().unwrap(),
//!     ..ConvertOptions::default()
//! });
//! let page = converter.convert("## Intro\n\nHello").unwrap();
//! assert!(page.content.contains(r#"<h2 id="id-h2-1">Intro</h2>"#));
//! assert!(page.list_menu.contains(r##"<a href="#id-h2-1">Intro</a>"##));
//! ```

mod entities;
mod error;
mod ids;
mod markdown;
mod menu;
mod mode;
mod page;
mod rewriter;
mod title;
mod token;
mod util;

pub use error::RewriteError;
pub use ids::IdAllocator;
pub use markdown::{MarkdownOptions, render_markdown};
pub use menu::{MenuEntry, MenuList};
pub use mode::{DISABLED_MODE, HeadingTag, MenuMode, ModeError};
pub use page::{ConvertOptions, Converter, PageModel};
pub use rewriter::{
    INVALID_TOKEN_PLACEHOLDER, RewriteState, Rewritten, TokenPolicy, TokenRewriter, rewrite_html,
};
pub use title::HeadingText;
pub use token::{Attribute, HtmlTokenizer, Token, TokenSource};
pub use util::escape_html;
