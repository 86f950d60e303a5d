//! # Statements and Expressions
//!
//! Value types produced by the parser. All literals are resolved to
//! concrete numbers; the consumer only has to resolve names and call
//! dispatch.

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// STATEMENT
// =============================================================================

/// One scene-description statement.
///
/// Statements come in exactly two forms: name bindings and root
/// declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// A name binding: `ball = sphere(2.0);`
    Assign {
        /// Bound name.
        name: String,
        /// Right-hand side expression.
        value: Expr,
        /// Source span of the whole statement.
        span: Span,
    },

    /// A root declaration: `toplevel(ball, 5);`
    Toplevel {
        /// Solid to register as a root object.
        child: Expr,
        /// Opaque material tag.
        material: u32,
        /// Source span of the whole statement.
        span: Span,
    },
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Assign { span, .. } => *span,
            Statement::Toplevel { span, .. } => *span,
        }
    }
}

// =============================================================================
// EXPRESSION
// =============================================================================

/// A scene-description expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A number literal like `2.5` or `-1`.
    Number {
        /// Literal value.
        value: f32,
        /// Source span.
        span: Span,
    },

    /// A 3-vector literal like `[1, 0, -2.5]`.
    Vector {
        /// Component values.
        value: [f32; 3],
        /// Source span.
        span: Span,
    },

    /// A reference to a previously bound name.
    Ref {
        /// Referenced name.
        name: String,
        /// Source span.
        span: Span,
    },

    /// A call like `sphere(2.0)` or `unite(a, b, c)`.
    Call {
        /// Called name.
        name: String,
        /// Arguments in declaration order.
        args: Vec<Expr>,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Number of arguments for calls, 0 otherwise.
    pub fn arg_count(&self) -> usize {
        match self {
            Expr::Call { args, .. } => args.len(),
            _ => 0,
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Number { span, .. } => *span,
            Expr::Vector { span, .. } => *span,
            Expr::Ref { span, .. } => *span,
            Expr::Call { span, .. } => *span,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
