//! Error types for the HTML rewrite pass.

use std::str::Utf8Error;

/// Error that aborts a conversion.
///
/// Every variant is fatal: no partial [`PageModel`](crate::PageModel) is
/// produced once one of these is returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// The HTML could not be tokenized.
    #[error("HTML decode error: {0}")]
    Decode(#[from] quick_xml::Error),

    /// Malformed attribute in a start tag.
    #[error("HTML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Tag name or text could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input bytes are not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// Numeric character reference that does not name a character.
    #[error("invalid character reference &{0};")]
    CharRef(String),

    /// The stream ended inside a tracked heading.
    #[error("unclosed <{tag}> element at end of input")]
    UnclosedHeading {
        /// Tracked heading tag name.
        tag: &'static str,
    },

    /// A tracked heading was closed without being opened.
    #[error("unexpected </{tag}> without matching start tag")]
    UnopenedHeading {
        /// Tracked heading tag name.
        tag: &'static str,
    },

    /// An anchor was requested before any identifier was allocated.
    #[error("no anchor identifier has been allocated")]
    AllocatorMisuse,

    /// Token kind the rewriter does not know how to serialize (strict mode only).
    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
}

impl RewriteError {
    /// Whether the error comes from tokenizing the input rather than from
    /// heading bookkeeping.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Decode(_)
                | Self::Attribute(_)
                | Self::Encoding(_)
                | Self::Utf8(_)
                | Self::CharRef(_)
                | Self::UnclosedHeading { .. }
                | Self::UnopenedHeading { .. }
        )
    }
}
