//! Single-pass HTML rewriter that anchors tracked headings.
//!
//! Walks a [`TokenSource`] once, re-serializing every token with escaping.
//! Start tags of the tracked heading level get a generated `id` attribute,
//! and the text between start and end tag becomes a [`MenuEntry`].

use std::fmt::Write;

use crate::error::RewriteError;
use crate::ids::IdAllocator;
use crate::menu::{MenuEntry, MenuList};
use crate::mode::{HeadingTag, MenuMode};
use crate::title::HeadingText;
use crate::token::{Attribute, HtmlTokenizer, Token, TokenSource};
use crate::util::push_escaped;

/// Placeholder written for tokens with no serialization rule.
pub const INVALID_TOKEN_PLACEHOLDER: &str = "INVALID TOKEN";

/// What to do with a token the rewriter cannot serialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Write [`INVALID_TOKEN_PLACEHOLDER`] and keep going.
    #[default]
    Lenient,
    /// Abort with [`RewriteError::UnrecognizedToken`].
    Strict,
}

/// Position of the scan relative to tracked headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteState {
    Outside,
    InsideHeading,
}

/// Output of a rewrite pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rewritten {
    /// Re-serialized HTML with anchors injected.
    pub content: String,
    /// One entry per tracked heading, in document order.
    pub menu: MenuList,
}

/// Heading-anchoring rewriter for one document.
pub struct TokenRewriter {
    mode: MenuMode,
    policy: TokenPolicy,
    state: RewriteState,
    ids: Option<IdAllocator>,
    title: HeadingText,
    menu: MenuList,
    out: String,
}

impl TokenRewriter {
    #[must_use]
    pub fn new(mode: MenuMode) -> Self {
        Self {
            mode,
            policy: TokenPolicy::default(),
            state: RewriteState::Outside,
            ids: mode.tracked().map(IdAllocator::new),
            title: HeadingText::new(),
            menu: MenuList::new(),
            out: String::new(),
        }
    }

    /// Set the policy for unrecognized tokens.
    #[must_use]
    pub fn with_policy(mut self, policy: TokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pre-size the output buffer.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.out.reserve(capacity);
        self
    }

    #[must_use]
    pub fn state(&self) -> RewriteState {
        self.state
    }

    /// Consume `source` to the end and return the rewritten document.
    pub fn rewrite<S: TokenSource>(mut self, source: &mut S) -> Result<Rewritten, RewriteError> {
        loop {
            match source.next_token()? {
                Token::Eof => break,
                token => self.process(token)?,
            }
        }

        if self.state == RewriteState::InsideHeading {
            return Err(RewriteError::UnclosedHeading {
                tag: self.tracked_name(),
            });
        }

        tracing::debug!(
            mode = %self.mode,
            headings = self.menu.len(),
            bytes = self.out.len(),
            "Rewrote HTML"
        );

        Ok(Rewritten {
            content: self.out,
            menu: self.menu,
        })
    }

    /// Handle a single token.
    pub fn process(&mut self, token: Token) -> Result<(), RewriteError> {
        match token {
            Token::Start { name, mut attrs } => {
                if self.is_tracked(&name) {
                    let id = self.open_heading()?;
                    attrs.push(Attribute::new("id", id));
                }
                self.write_tag(&name, &attrs, false);
            }
            Token::Empty { name, mut attrs } => {
                if self.is_tracked(&name) {
                    let id = self.open_heading()?;
                    attrs.push(Attribute::new("id", id));
                    self.close_heading()?;
                }
                if is_void_element(&name) {
                    self.write_tag(&name, &attrs, true);
                } else {
                    // `<h2 />` does not close a normal element in HTML.
                    self.write_tag(&name, &attrs, false);
                    self.write_end_tag(&name);
                }
            }
            Token::End { name } => {
                if self.is_tracked(&name) {
                    self.close_heading()?;
                }
                self.write_end_tag(&name);
            }
            Token::Text(text) => {
                if self.state == RewriteState::InsideHeading {
                    self.title.append(&text);
                }
                push_escaped(&mut self.out, &text);
            }
            Token::ProcessingInstruction(content) => {
                write!(self.out, "<?{content}?>").unwrap();
            }
            Token::Directive(content) => write!(self.out, "<!{content}>").unwrap(),
            Token::Comment(content) => write!(self.out, "<!--{content}-->").unwrap(),
            Token::Unrecognized(kind) => match self.policy {
                TokenPolicy::Lenient => {
                    tracing::warn!(%kind, "Unrecognized token replaced with placeholder");
                    self.out.push_str(INVALID_TOKEN_PLACEHOLDER);
                }
                TokenPolicy::Strict => return Err(RewriteError::UnrecognizedToken(kind)),
            },
            Token::Eof => {}
        }
        Ok(())
    }

    fn is_tracked(&self, name: &str) -> bool {
        self.mode.tracked().is_some_and(|tag| tag.matches(name))
    }

    fn tracked_name(&self) -> &'static str {
        self.mode.tracked().map_or("", HeadingTag::tag_name)
    }

    /// Enter a heading: start a fresh title and allocate its identifier.
    fn open_heading(&mut self) -> Result<String, RewriteError> {
        let ids = self.ids.as_mut().ok_or(RewriteError::AllocatorMisuse)?;
        self.title.reset();
        self.state = RewriteState::InsideHeading;
        Ok(ids.allocate().to_owned())
    }

    /// Leave a heading and record its menu entry.
    fn close_heading(&mut self) -> Result<(), RewriteError> {
        if self.state == RewriteState::Outside {
            return Err(RewriteError::UnopenedHeading {
                tag: self.tracked_name(),
            });
        }
        let id = self
            .ids
            .as_ref()
            .and_then(IdAllocator::last_allocated)
            .ok_or(RewriteError::AllocatorMisuse)?;
        self.menu.push(MenuEntry::new(id, self.title.snapshot()));
        self.title.reset();
        self.state = RewriteState::Outside;
        Ok(())
    }

    fn write_tag(&mut self, name: &str, attrs: &[Attribute], self_closing: bool) {
        self.out.push('<');
        push_escaped(&mut self.out, name);
        for attr in attrs {
            write!(self.out, " {}=\"{}\"", attr.name, attr.value).unwrap();
        }
        self.out.push_str(if self_closing { " />" } else { ">" });
    }

    fn write_end_tag(&mut self, name: &str) {
        self.out.push_str("</");
        push_escaped(&mut self.out, name);
        self.out.push('>');
    }
}

/// Elements that never have content and may be written as `<name />`.
fn is_void_element(name: &str) -> bool {
    const VOID_ELEMENTS: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}

/// Rewrite an HTML fragment in one call.
///
/// # Example
///
/// ```
/// use mdmin_renderer::{MenuMode, TokenPolicy, rewrite_html};
///
/// let mode = "h2".parse::<MenuMode>().unwrap();
/// let result = rewrite_html(b"<h2>Intro</h2>", mode, TokenPolicy::Lenient).unwrap();
/// assert_eq!(result.content, r#"<h2 id="id-h2-1">Intro</h2>"#);
/// assert_eq!(result.menu.entries()[0].anchor, "#id-h2-1");
/// ```
pub fn rewrite_html(
    html: &[u8],
    mode: MenuMode,
    policy: TokenPolicy,
) -> Result<Rewritten, RewriteError> {
    let mut tokenizer = HtmlTokenizer::from_bytes(html);
    TokenRewriter::new(mode)
        .with_policy(policy)
        .with_capacity(html.len() * 2)
        .rewrite(&mut tokenizer)
}
