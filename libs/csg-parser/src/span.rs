//! # Source Spans
//!
//! Positions and ranges in the source text, used for error reporting.
//! Both line and column are zero-based internally; diagnostics render
//! them one-based.

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column number.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A range in the source text.
///
/// ## Example
///
/// ```rust
/// use csg_parser::span::{Position, Span};
///
/// // For source "cube(10);" the span of "cube" would be:
/// let span = Span::new(Position::new(0, 0, 0), Position::new(4, 0, 4));
/// assert_eq!(span.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Create a new span from start and end positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a zero-width span at the start of the source.
    pub const fn zero() -> Self {
        Self::new(Position::new(0, 0, 0), Position::new(0, 0, 0))
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge two spans into one covering both.
    pub fn merge(self, other: Span) -> Span {
        let start = if self.start.byte <= other.start.byte {
            self.start
        } else {
            other.start
        };
        let end = if self.end.byte >= other.end.byte {
            self.end
        } else {
            other.end
        };
        Span::new(start, end)
    }
}

/// Types that carry a source span.
pub trait Spanned {
    /// The source span of this item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================
