//! Byte ranges into type-expression source.

use std::fmt;

/// Half-open byte range `start..end` into the source a token came from.
///
/// Offsets are `u32`; sources longer than that are rejected when a span is
/// built from `usize` offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span of synthesized types that have no source.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Convert a lexer byte range.
    ///
    /// # Panics
    /// Panics if either offset does not fit in `u32`.
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        Span::new(offset(range.start), offset(range.end))
    }

    /// Empty span at `offset`, used for end of input.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span::new(offset, offset)
    }

    /// Smallest span covering `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

fn offset(byte: usize) -> u32 {
    u32::try_from(byte).unwrap_or_else(|_| panic!("source offset {byte} exceeds u32::MAX"))
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}
