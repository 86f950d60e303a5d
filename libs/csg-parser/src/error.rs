//! # Parse Errors
//!
//! Error types for the scene-description parser.

use crate::span::Span;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
///
/// The stored span is zero-indexed; the rendered message is one-indexed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {}, column {}", .span.start.line + 1, .span.start.column + 1)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of the error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an unexpected-token error.
    pub fn unexpected_token(found: &str, expected: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            span,
        )
    }

    /// Create an unexpected-EOF error.
    pub fn unexpected_eof(expected: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            span,
        )
    }
}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// Found a token that does not fit the grammar.
    #[error("unexpected `{found}`, expected {expected}")]
    UnexpectedToken {
        /// Token text that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// A number literal that does not parse as f32.
    #[error("invalid number literal `{text}`")]
    InvalidNumber {
        /// Offending literal text.
        text: String,
    },

    /// Material tags must be non-negative integers.
    #[error("material must be a non-negative integer, got `{text}`")]
    InvalidMaterial {
        /// Offending literal text.
        text: String,
    },

    /// A character the lexer does not recognize.
    #[error("unrecognized character `{text}`")]
    UnrecognizedCharacter {
        /// Offending character text.
        text: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
