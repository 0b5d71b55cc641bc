//! Navigation menu built from tracked headings.

use std::fmt::Write;

use crate::util::{escape_html, push_escaped_inline, trim_title};

/// One menu link: an in-page anchor and the heading text it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MenuEntry {
    /// Link target, `#` followed by the heading identifier.
    pub anchor: String,
    /// Heading text with surrounding whitespace removed (unescaped).
    pub title: String,
}

impl MenuEntry {
    /// Build an entry from a heading identifier and its raw captured text.
    #[must_use]
    pub fn new(id: &str, raw_title: &str) -> Self {
        Self {
            anchor: format!("#{id}"),
            title: trim_title(raw_title).to_owned(),
        }
    }
}

/// Menu entries in document order.
///
/// Append-only: entries are never reordered, merged or removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuList {
    entries: Vec<MenuEntry>,
}

impl MenuList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as an indented `<ul>` of anchor links.
    ///
    /// ```text
    /// <ul>
    ///   <li>
    ///     <a href="#id-h3-1">Intro</a>
    ///   </li>
    /// </ul>
    /// ```
    #[must_use]
    pub fn serialize(&self) -> String {
        if self.entries.is_empty() {
            return "<ul></ul>".to_owned();
        }

        let mut out = String::with_capacity(64 * self.entries.len() + 16);
        out.push_str("<ul>");
        for entry in &self.entries {
            write!(
                out,
                "\n  <li>\n    <a href=\"{}\">",
                escape_html(&entry.anchor)
            )
            .unwrap();
            push_escaped_inline(&mut out, &entry.title);
            out.push_str("</a>\n  </li>");
        }
        out.push_str("\n</ul>");
        out
    }
}
