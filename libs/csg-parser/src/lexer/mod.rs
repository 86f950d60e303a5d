//! # Scene-Description Lexer
//!
//! Tokenizes scene-description source text.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("cube(10);").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// Scene-description lexer.
///
/// Converts source text into a stream of tokens. Whitespace, `//` line
/// comments, and `/* */` block comments are skipped.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens, always terminated by an EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(eof, eof), String::new()));

        self.tokens
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.bump_while(char::is_whitespace);

            // Line comments
            if self.cursor.peek() == Some('/') && self.cursor.peek_second() == Some('/') {
                self.cursor.bump_while(|c| c != '\n');
                continue;
            }

            // Block comments
            if self.cursor.peek() == Some('/') && self.cursor.peek_second() == Some('*') {
                self.cursor.bump(); // /
                self.cursor.bump(); // *
                while !self.cursor.is_eof() {
                    if self.cursor.peek() == Some('*') && self.cursor.peek_second() == Some('/') {
                        self.cursor.bump(); // *
                        self.cursor.bump(); // /
                        break;
                    }
                    self.cursor.bump();
                }
                continue;
            }

            break;
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.bump() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Eq,
            ';' => TokenKind::Semicolon,
            '-' => TokenKind::Minus,
            '0'..='9' | '.' => return self.scan_number(start),
            'a'..='z' | 'A'..='Z' | '_' => return self.scan_identifier(start),
            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Scan a number literal: digits, optional fraction, optional exponent.
    fn scan_number(&mut self, start: Position) {
        self.cursor.bump_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_second().map_or(false, |c| c.is_ascii_digit())
        {
            self.cursor.bump(); // .
            self.cursor.bump_while(|c| c.is_ascii_digit());
        }

        match (self.cursor.peek(), self.cursor.peek_second()) {
            (Some('e') | Some('E'), Some(c)) if c.is_ascii_digit() => {
                self.cursor.bump(); // e
                self.cursor.bump_while(|c| c.is_ascii_digit());
            }
            (Some('e') | Some('E'), Some('+') | Some('-')) => {
                self.cursor.bump(); // e
                self.cursor.bump(); // sign
                self.cursor.bump_while(|c| c.is_ascii_digit());
            }
            _ => {}
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan an identifier.
    fn scan_identifier(&mut self, start: Position) {
        self.cursor
            .bump_while(|c| c.is_ascii_alphanumeric() || c == '_');
        self.push(TokenKind::Identifier, start);
    }

    /// Push a token spanning from `start` to the current position.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let text = self.cursor.slice_from(start).to_string();
        let span = Span::new(start, self.cursor.position());
        self.tokens.push(Token::new(kind, span, text));
    }
}

// =============================================================================
// TESTS
// =============================================================================
