//! # Tokens
//!
//! Token types for the scene-description lexer.

use crate::span::{Span, Spanned};

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if token is an error.
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens in the scene-description grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Number literal like `10` or `3.14`
    Number,
    /// Identifier like `sphere` or `ball`
    Identifier,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `=`
    Eq,
    /// `;`
    Semicolon,
    /// `-` (unary minus before a number)
    Minus,

    // Special
    /// End of file
    Eof,
    /// Unrecognized character
    Error,
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub fn display(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Eq => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Minus => "'-'",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "invalid character",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
