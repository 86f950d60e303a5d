//! # CSG Scene-Description Parser (Pure Rust)
//!
//! A pure Rust parser for the textual CSG scene-description language.
//! No C dependencies.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Statements
//! ```
//!
//! The parser is *streaming*: statements come out one at a time through
//! [`Parser::next_statement`], so the consumer can materialize each
//! construct as soon as it parses and keep everything built before the
//! first error.
//!
//! ## Language
//!
//! ```text
//! ball  = sphere(2.0);
//! box   = cube(4.0);
//! shape = subtract(box, ball);
//! moved = translate(shape, [1, 0, 0]);
//! toplevel(moved, 5);
//! ```
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::parse;
//!
//! let statements = parse("ball = sphere(2.0); toplevel(ball, 1);").unwrap();
//! assert_eq!(statements.len(), 2);
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the first layer in the CSG pipeline:
//!
//! ```text
//! csg-parser → csg-scene → octree voxelizer / mesh extractor
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export public API
pub use ast::{Expr, Statement};
pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use span::{Position, Span, Spanned};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse a complete scene description into statements.
///
/// Convenience wrapper around the streaming [`Parser`] that collects every
/// statement up front. Consumers that need the no-rollback materialization
/// contract should drive [`Parser::next_statement`] directly instead.
///
/// ## Parameters
///
/// - `source`: Scene-description source text
///
/// ## Returns
///
/// All statements in declaration order, or the first parse error.
///
/// ## Example
///
/// ```rust
/// use csg_parser::parse;
///
/// let statements = parse("ball = sphere(2.0);").unwrap();
/// assert_eq!(statements.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::new(source);
    let mut statements = Vec::new();

    while let Some(statement) = parser.next_statement()? {
        statements.push(statement);
    }

    Ok(statements)
}

// =============================================================================
// TESTS
// =============================================================================
