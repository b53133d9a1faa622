//! Byte ranges into the template source.

use text_size::{TextRange, TextSize};

/// A half-open byte range `[start, end)` into the parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Inclusive start offset.
    pub start: TextSize,
    /// Exclusive end offset.
    pub end: TextSize,
}

impl Span {
    /// Creates a span from two offsets.
    #[inline]
    pub fn new(start: impl Into<TextSize>, end: impl Into<TextSize>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from `usize` byte offsets as produced by string searches.
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(to_size(start), to_size(end))
    }

    /// A zero-width span at `offset`.
    #[inline]
    pub fn empty(offset: impl Into<TextSize>) -> Self {
        let offset = offset.into();
        Self::new(offset, offset)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Start offset as a `usize` index.
    #[inline]
    pub fn start_offset(&self) -> usize {
        u32::from(self.start) as usize
    }

    /// End offset as a `usize` index.
    #[inline]
    pub fn end_offset(&self) -> usize {
        u32::from(self.end) as usize
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the text this span covers in `source`, or `""` when out of bounds.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start_offset()..self.end_offset())
            .unwrap_or_default()
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(span.start, span.end)
    }
}

pub(crate) fn to_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let span = Span::from_offsets(5, 8);
        assert_eq!(span.slice("<div>abc</div>"), "abc");
        assert_eq!(Span::from_offsets(10, 40).slice("short"), "");
    }

    #[test]
    fn test_cover() {
        let covered = Span::from_offsets(4, 9).cover(Span::from_offsets(2, 6));
        assert_eq!(covered, Span::from_offsets(2, 9));
        assert!(Span::empty(TextSize::from(3)).is_empty());
    }
}
