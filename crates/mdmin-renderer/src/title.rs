//! Text captured between the start and end tag of a tracked heading.

/// Growable buffer for heading text.
///
/// Holds raw (unescaped) text; escaping happens when the menu is serialized.
#[derive(Debug, Default)]
pub struct HeadingText {
    buf: String,
}

impl HeadingText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn append(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.buf.push_str(fragment);
        }
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Accumulated text, untrimmed.
    #[must_use]
    pub fn snapshot(&self) -> &str {
        &self.buf
    }
}
