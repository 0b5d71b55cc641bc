//! Sequential anchor identifiers for tracked headings.

use crate::mode::HeadingTag;

/// Hands out `id-<tag>-<n>` identifiers, `n` starting at 1.
///
/// Owned by a single conversion; two allocators never share a counter.
#[derive(Debug)]
pub struct IdAllocator {
    prefix: String,
    counter: u64,
    last: Option<String>,
}

impl IdAllocator {
    #[must_use]
    pub fn new(tag: HeadingTag) -> Self {
        Self {
            prefix: format!("id-{}-", tag.tag_name()),
            counter: 0,
            last: None,
        }
    }

    /// Generate the next identifier.
    pub fn allocate(&mut self) -> &str {
        self.counter += 1;
        let id = format!("{}{}", self.prefix, self.counter);
        self.last.insert(id).as_str()
    }

    /// Most recently generated identifier, `None` before the first
    /// [`allocate`](Self::allocate).
    #[must_use]
    pub fn last_allocated(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Number of identifiers generated so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequential() {
        let mut ids = IdAllocator::new(HeadingTag::H3);
        assert_eq!(ids.allocate(), "id-h3-1");
        assert_eq!(ids.allocate(), "id-h3-2");
        assert_eq!(ids.allocate(), "id-h3-3");
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn test_last_allocated_tracks_latest() {
        let mut ids = IdAllocator::new(HeadingTag::H2);
        ids.allocate();
        ids.allocate();
        assert_eq!(ids.last_allocated(), Some("id-h2-2"));
    }

    #[test]
    fn test_last_allocated_before_allocate() {
        let ids = IdAllocator::new(HeadingTag::H1);
        assert_eq!(ids.last_allocated(), None);
        assert_eq!(ids.allocated(), 0);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = IdAllocator::new(HeadingTag::H2);
        let mut second = IdAllocator::new(HeadingTag::H2);
        first.allocate();
        first.allocate();
        assert_eq!(second.allocate(), "id-h2-1");
    }
}
