//! Menu mode: which heading level becomes a menu anchor point.

use std::fmt;
use std::str::FromStr;

/// Value that switches menu generation off.
pub const DISABLED_MODE: &str = "none";

/// Heading tag that can be tracked by the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    /// Lower-case HTML tag name (`h1`..`h6`).
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    /// Check whether a raw element name refers to this tag.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.tag_name())
    }
}

/// Error returned when parsing a [`MenuMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    /// Value is neither a heading tag nor the disabled sentinel.
    #[error("unknown menu level '{0}' (expected one of h1-h6 or 'none')")]
    Unknown(String),
}

/// Menu generation mode, fixed for the lifetime of one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuMode {
    /// No menu; headings pass through untouched.
    Disabled,
    /// Headings with this tag receive anchors and menu entries.
    Track(HeadingTag),
}

impl MenuMode {
    /// Tracked heading tag, if any.
    #[must_use]
    pub fn tracked(self) -> Option<HeadingTag> {
        match self {
            Self::Disabled => None,
            Self::Track(tag) => Some(tag),
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Track(_))
    }
}

impl Default for MenuMode {
    fn default() -> Self {
        Self::Track(HeadingTag::H3)
    }
}

impl fmt::Display for MenuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str(DISABLED_MODE),
            Self::Track(tag) => f.write_str(tag.tag_name()),
        }
    }
}

impl FromStr for MenuMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let tag = match value.as_str() {
            DISABLED_MODE => return Ok(Self::Disabled),
            "h1" => HeadingTag::H1,
            "h2" => HeadingTag::H2,
            "h3" => HeadingTag::H3,
            "h4" => HeadingTag::H4,
            "h5" => HeadingTag::H5,
            "h6" => HeadingTag::H6,
            _ => return Err(ModeError::Unknown(s.to_owned())),
        };
        Ok(Self::Track(tag))
    }
}
