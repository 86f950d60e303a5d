//! # Scene-Description Parser
//!
//! Recursive descent parser producing [`Statement`] values.
//!
//! The parser is streaming: [`Parser::next_statement`] returns one
//! statement at a time and stops at the first error, so a consumer can
//! materialize each construct as soon as it parses.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::parser::Parser;
//!
//! let mut parser = Parser::new("ball = sphere(2.0);");
//! let statement = parser.next_statement().unwrap();
//! assert!(statement.is_some());
//! assert!(parser.next_statement().unwrap().is_none());
//! ```

use crate::ast::{Expr, Statement};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::{Span, Spanned};

// =============================================================================
// PARSER
// =============================================================================

/// Streaming recursive descent parser.
pub struct Parser {
    /// Token stream (always ends with EOF).
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
}

impl Parser {
    /// Create a parser over source text.
    pub fn new(source: &str) -> Self {
        Self {
            tokens: Lexer::new(source).tokenize(),
            current: 0,
        }
    }

    /// Parse the next statement.
    ///
    /// ## Returns
    ///
    /// - `Ok(Some(statement))` when a statement parsed
    /// - `Ok(None)` at end of input
    /// - `Err(error)` at the first syntax error; the parser stops there
    pub fn next_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        if self.is_at_end() {
            return Ok(None);
        }
        self.parse_statement().map(Some)
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Parse one statement: `name = expr;` or `toplevel(expr, material);`
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let name_token = self.expect(TokenKind::Identifier, "identifier or `toplevel`")?;
        let name = name_token.text.clone();
        let start = name_token.span;

        if name == "toplevel" && self.check(TokenKind::LParen) {
            return self.parse_toplevel(start);
        }

        self.expect(TokenKind::Eq, "'='")?;
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon, "';'")?.span;

        Ok(Statement::Assign {
            name,
            value,
            span: start.merge(end),
        })
    }

    /// Parse the tail of `toplevel(expr, material);` after the name.
    fn parse_toplevel(&mut self, start: Span) -> Result<Statement, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let child = self.parse_expr()?;
        self.expect(TokenKind::Comma, "','")?;
        let material = self.parse_material()?;
        self.expect(TokenKind::RParen, "')'")?;
        let end = self.expect(TokenKind::Semicolon, "';'")?.span;

        Ok(Statement::Toplevel {
            child,
            material,
            span: start.merge(end),
        })
    }

    /// Parse a material tag: a non-negative integer literal.
    fn parse_material(&mut self) -> Result<u32, ParseError> {
        let token = self.expect(TokenKind::Number, "material tag")?;
        let text = token.text.clone();
        let span = token.span;

        let value: f64 = text.parse().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidNumber { text: text.clone() }, span)
        })?;

        if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
            return Err(ParseError::new(
                ParseErrorKind::InvalidMaterial { text },
                span,
            ));
        }

        Ok(value as u32)
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    /// Parse an expression: number, vector, reference, or call.
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number | TokenKind::Minus => self.parse_number(),
            TokenKind::LBracket => self.parse_vector(),
            TokenKind::Identifier => self.parse_ref_or_call(),
            TokenKind::Eof => Err(ParseError::unexpected_eof("expression", self.peek().span)),
            TokenKind::Error => Err(ParseError::new(
                ParseErrorKind::UnrecognizedCharacter {
                    text: self.peek().text.clone(),
                },
                self.peek().span,
            )),
            _ => Err(ParseError::unexpected_token(
                &self.peek().text,
                "expression",
                self.peek().span,
            )),
        }
    }

    /// Parse a number literal with optional leading minus.
    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let negative = self.match_token(TokenKind::Minus);
        let start = self.previous_span();
        let token = self.expect(TokenKind::Number, "number")?;
        let span = if negative {
            start.merge(token.span)
        } else {
            token.span
        };
        let text = token.text.clone();

        let mut value: f32 = text.parse().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidNumber { text }, span)
        })?;
        if negative {
            value = -value;
        }

        Ok(Expr::Number { value, span })
    }

    /// Parse a 3-vector literal: `[x, y, z]`.
    fn parse_vector(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(TokenKind::LBracket, "'['")?.span;

        let x = self.parse_component()?;
        self.expect(TokenKind::Comma, "','")?;
        let y = self.parse_component()?;
        self.expect(TokenKind::Comma, "','")?;
        let z = self.parse_component()?;

        let end = self.expect(TokenKind::RBracket, "']'")?.span;

        Ok(Expr::Vector {
            value: [x, y, z],
            span: start.merge(end),
        })
    }

    /// Parse a single numeric vector component.
    fn parse_component(&mut self) -> Result<f32, ParseError> {
        match self.parse_number()? {
            Expr::Number { value, .. } => Ok(value),
            _ => unreachable!("parse_number only returns Expr::Number"),
        }
    }

    /// Parse an identifier followed by an optional argument list.
    fn parse_ref_or_call(&mut self) -> Result<Expr, ParseError> {
        let token = self.expect(TokenKind::Identifier, "identifier")?;
        let name = token.text.clone();
        let start = token.span;

        if !self.match_token(TokenKind::LParen) {
            return Ok(Expr::Ref { name, span: start });
        }

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RParen, "')'")?.span;

        Ok(Expr::Call {
            name,
            args,
            span: start.merge(end),
        })
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Current token.
    fn peek(&self) -> &Token {
        // The token stream always ends with EOF, so `current` stays in range.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.current == 0 {
            self.peek().span
        } else {
            self.tokens[self.current - 1].span()
        }
    }

    /// Whether the current token matches a kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Whether all input has been consumed.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Consume the current token unconditionally.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    /// Consume the current token if it matches, reporting what was expected.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        let token = self.peek();
        if token.is_eof() {
            Err(ParseError::unexpected_eof(expected, token.span))
        } else if token.is_error() {
            Err(ParseError::new(
                ParseErrorKind::UnrecognizedCharacter {
                    text: token.text.clone(),
                },
                token.span,
            ))
        } else {
            Err(ParseError::unexpected_token(&token.text, expected, token.span))
        }
    }

    /// Consume the current token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
