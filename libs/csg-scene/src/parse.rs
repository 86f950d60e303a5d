//! # Scene Population from Text
//!
//! [`Scene::parse`] drives the streaming scene-description parser and
//! materializes each statement into the arena as soon as it parses.
//!
//! There is no rollback: on the first error, syntactic or semantic,
//! parsing stops and the scene keeps every construct materialized before
//! the failure. Callers inspect the returned [`ParseResult`] and decide
//! whether a partially populated scene is usable.

use crate::builder;
use crate::error::SceneError;
use crate::node::{Material, NodeId};
use crate::scene::Scene;
use csg_parser::{Expr, Parser, Span, Spanned, Statement};
use glam::Vec3;
use std::collections::HashMap;

// =============================================================================
// PARSE RESULT
// =============================================================================

/// Outcome of populating a scene from text.
///
/// Immutable after construction: a success flag plus a diagnostic that is
/// empty exactly when the flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    ok: bool,
    error: String,
}

impl ParseResult {
    /// A successful outcome with an empty diagnostic.
    pub fn success() -> Self {
        Self {
            ok: true,
            error: String::new(),
        }
    }

    /// A failed outcome carrying a diagnostic.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }

    /// Whether parsing succeeded.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// The diagnostic message. Empty on success.
    pub fn error(&self) -> &str {
        &self.error
    }
}

// =============================================================================
// SCENE PARSING
// =============================================================================

impl Scene {
    /// Populate this scene from a textual description.
    ///
    /// Statements materialize left-to-right: `name = expr;` builds the
    /// expression's nodes and binds the name, `toplevel(expr, material);`
    /// additionally registers the solid as a root. On failure the scene
    /// keeps everything built before the failing statement.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use csg_scene::Scene;
    ///
    /// let mut scene = Scene::new();
    /// let result = scene.parse("ball = sphere(2.0); toplevel(ball, 5);");
    /// assert!(result.ok());
    /// assert_eq!(scene.size(), 1);
    /// ```
    pub fn parse(&mut self, source: &str) -> ParseResult {
        let mut parser = Parser::new(source);
        let mut materializer = Materializer::new(self);

        loop {
            match parser.next_statement() {
                Ok(Some(statement)) => {
                    if let Err(message) = materializer.statement(&statement) {
                        return ParseResult::failure(message);
                    }
                }
                Ok(None) => return ParseResult::success(),
                Err(error) => return ParseResult::failure(error.to_string()),
            }
        }
    }
}

// =============================================================================
// MATERIALIZER
// =============================================================================

/// Turns parsed statements into arena nodes.
///
/// Semantic errors are reported as formatted diagnostics carrying the
/// source location of the offending expression.
struct Materializer<'a> {
    scene: &'a mut Scene,
    /// Names bound so far, in this parse run.
    names: HashMap<String, NodeId>,
}

impl<'a> Materializer<'a> {
    fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            names: HashMap::new(),
        }
    }

    /// Materialize one statement.
    fn statement(&mut self, statement: &Statement) -> Result<(), String> {
        match statement {
            Statement::Assign { name, value, .. } => {
                let node = self.solid(value)?;
                self.names.insert(name.clone(), node);
                Ok(())
            }
            Statement::Toplevel {
                child,
                material,
                span,
            } => {
                let node = self.solid(child)?;
                self.scene
                    .toplevel(node, Material(*material))
                    .map_err(|e| located(*span, &e.to_string()))
            }
        }
    }

    /// Evaluate an expression that must denote a solid.
    fn solid(&mut self, expr: &Expr) -> Result<NodeId, String> {
        match expr {
            Expr::Ref { name, span } => self
                .names
                .get(name)
                .copied()
                .ok_or_else(|| located(*span, &format!("undefined name `{}`", name))),
            Expr::Call { name, args, span } => self.call(name, args, *span),
            Expr::Number { span, .. } | Expr::Vector { span, .. } => {
                Err(located(*span, "expected a solid expression"))
            }
        }
    }

    /// Dispatch a call by name.
    fn call(&mut self, name: &str, args: &[Expr], span: Span) -> Result<NodeId, String> {
        match name {
            "sphere" => {
                let radius = self.one_number(name, args, span)?;
                self.scene.sphere(radius).map_err(|e| scene_err(span, e))
            }
            "cube" => {
                let side = self.one_number(name, args, span)?;
                self.scene.cube(side).map_err(|e| scene_err(span, e))
            }

            "unite" | "intersect" | "subtract" => {
                if args.len() < 2 {
                    return Err(located(
                        span,
                        &format!("`{}` takes at least 2 arguments, got {}", name, args.len()),
                    ));
                }
                let mut operands = Vec::with_capacity(args.len());
                for arg in args {
                    operands.push(self.solid(arg)?);
                }
                let result = match name {
                    "unite" => builder::unite_all(self.scene, &operands),
                    "intersect" => builder::intersect_all(self.scene, operands[0], &operands[1..]),
                    _ => builder::subtract_all(self.scene, operands[0], &operands[1..]),
                };
                result.map_err(|e| scene_err(span, e))
            }

            "translate" => {
                let (node, offset) = self.solid_and_vector(name, args, span)?;
                builder::translate(self.scene, node, offset).map_err(|e| scene_err(span, e))
            }
            "scale" => {
                self.arity(name, args, 2, span)?;
                let node = self.solid(&args[0])?;
                let factors = match &args[1] {
                    Expr::Number { value, .. } => Vec3::splat(*value),
                    Expr::Vector { value, .. } => Vec3::from_array(*value),
                    other => {
                        return Err(located(
                            other.span(),
                            "expected a number or a vector of scale factors",
                        ))
                    }
                };
                builder::scale(self.scene, node, factors).map_err(|e| scene_err(span, e))
            }
            "rotate" => {
                self.arity(name, args, 3, span)?;
                let node = self.solid(&args[0])?;
                let angle = self.number(&args[1])?;
                let axis = self.vector(&args[2])?;
                builder::rotate(self.scene, node, angle, axis).map_err(|e| scene_err(span, e))
            }

            "xscale" | "yscale" | "zscale" | "xrotate" | "yrotate" | "zrotate" | "xtranslate"
            | "ytranslate" | "ztranslate" => {
                let (node, value) = self.solid_and_number(name, args, span)?;
                let result = match name {
                    "xscale" => builder::xscale(self.scene, node, value),
                    "yscale" => builder::yscale(self.scene, node, value),
                    "zscale" => builder::zscale(self.scene, node, value),
                    "xrotate" => builder::xrotate(self.scene, node, value),
                    "yrotate" => builder::yrotate(self.scene, node, value),
                    "zrotate" => builder::zrotate(self.scene, node, value),
                    "xtranslate" => builder::xtranslate(self.scene, node, value),
                    "ytranslate" => builder::ytranslate(self.scene, node, value),
                    _ => builder::ztranslate(self.scene, node, value),
                };
                result.map_err(|e| scene_err(span, e))
            }

            _ => Err(located(span, &format!("unknown function `{}`", name))),
        }
    }

    // =========================================================================
    // ARGUMENT HELPERS
    // =========================================================================

    fn arity(&self, name: &str, args: &[Expr], expected: usize, span: Span) -> Result<(), String> {
        if args.len() != expected {
            return Err(located(
                span,
                &format!(
                    "`{}` takes {} argument{}, got {}",
                    name,
                    expected,
                    if expected == 1 { "" } else { "s" },
                    args.len()
                ),
            ));
        }
        Ok(())
    }

    fn one_number(&self, name: &str, args: &[Expr], span: Span) -> Result<f32, String> {
        self.arity(name, args, 1, span)?;
        self.number(&args[0])
    }

    fn solid_and_number(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<(NodeId, f32), String> {
        self.arity(name, args, 2, span)?;
        let node = self.solid(&args[0])?;
        let value = self.number(&args[1])?;
        Ok((node, value))
    }

    fn solid_and_vector(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<(NodeId, Vec3), String> {
        self.arity(name, args, 2, span)?;
        let node = self.solid(&args[0])?;
        let vector = self.vector(&args[1])?;
        Ok((node, vector))
    }

    fn number(&self, expr: &Expr) -> Result<f32, String> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            other => Err(located(other.span(), "expected a number")),
        }
    }

    fn vector(&self, expr: &Expr) -> Result<Vec3, String> {
        match expr {
            Expr::Vector { value, .. } => Ok(Vec3::from_array(*value)),
            other => Err(located(other.span(), "expected a vector like [x, y, z]")),
        }
    }
}

/// Prefix a message with its one-indexed source location.
fn located(span: Span, message: &str) -> String {
    format!(
        "line {}, column {}: {}",
        span.start.line + 1,
        span.start.column + 1,
        message
    )
}

fn scene_err(span: Span, error: SceneError) -> String {
    located(span, &error.to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_success() {
        let result = ParseResult::success();
        assert!(result.ok());
        assert!(result.error().is_empty());
    }

    #[test]
    fn test_parse_result_failure() {
        let result = ParseResult::failure("bad input");
        assert!(!result.ok());
        assert_eq!(result.error(), "bad input");
    }

    #[test]
    fn test_parse_single_root() {
        let mut scene = Scene::new();
        let result = scene.parse("ball = sphere(2.0); toplevel(ball, 5);");
        assert!(result.ok(), "diagnostic: {}", result.error());

        assert_eq!(scene.size(), 1);
        let root = scene.roots().next().unwrap();
        assert_eq!(root.material, Material(5));
        assert_eq!(scene.distance(root.node, Vec3::ZERO).unwrap(), -2.0);
    }

    #[test]
    fn test_parse_full_pipeline() {
        let source = r#"
            // A cube with a spherical cavity, shifted up.
            box    = cube(4.0);
            cavity = sphere(1.0);
            shape  = subtract(box, cavity);
            lifted = translate(shape, [0, 0, 2]);
            toplevel(lifted, 1);
        "#;
        let mut scene = Scene::new();
        let result = scene.parse(source);
        assert!(result.ok(), "diagnostic: {}", result.error());

        let root = scene.roots().next().unwrap();
        // At the lifted center, the cavity dominates: max(-4, 1) = 1.
        assert_eq!(
            scene.distance(root.node, Vec3::new(0.0, 0.0, 2.0)).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_parse_roots_in_declaration_order() {
        let source = "a = sphere(1); b = cube(2); toplevel(a, 10); toplevel(b, 20);";
        let mut scene = Scene::new();
        assert!(scene.parse(source).ok());

        let materials: Vec<u32> = scene.roots().map(|r| r.material.0).collect();
        assert_eq!(materials, vec![10, 20]);
    }

    #[test]
    fn test_parse_variadic_and_axis_wrappers() {
        let source = r#"
            a = sphere(1);
            b = xtranslate(sphere(1), 3);
            c = ytranslate(sphere(1), 3);
            all = unite(a, b, c);
            spun = zrotate(all, 1.5707964);
            toplevel(spun, 0);
        "#;
        let mut scene = Scene::new();
        let result = scene.parse(source);
        assert!(result.ok(), "diagnostic: {}", result.error());
        assert_eq!(scene.size(), 1);
    }

    #[test]
    fn test_parse_syntax_error_keeps_prior_constructs() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1); toplevel(a, 1); b = ;");

        assert!(!result.ok());
        assert!(!result.error().is_empty());
        // Everything before the failing statement is still there.
        assert_eq!(scene.size(), 1);
        assert!(scene.node_count() >= 2);
    }

    #[test]
    fn test_parse_semantic_error_keeps_prior_constructs() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1); toplevel(a, 1); b = grow(a, 2);");

        assert!(!result.ok());
        assert!(result.error().contains("unknown function `grow`"));
        assert_eq!(scene.size(), 1);
    }

    #[test]
    fn test_parse_undefined_name() {
        let mut scene = Scene::new();
        let result = scene.parse("toplevel(ghost, 1);");
        assert!(!result.ok());
        assert!(result.error().contains("undefined name `ghost`"));
        assert_eq!(scene.size(), 0);
    }

    #[test]
    fn test_parse_wrong_arity() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1, 2);");
        assert!(!result.ok());
        assert!(result.error().contains("takes 1 argument"));
    }

    #[test]
    fn test_parse_unite_needs_two_operands() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1); b = unite(a);");
        assert!(!result.ok());
        assert!(result.error().contains("at least 2"));
    }

    #[test]
    fn test_parse_degenerate_scale_reported() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1); b = scale(a, [1, 0, 1]);");
        assert!(!result.ok());
        assert!(result.error().contains("non-zero"));
        assert!(result.error().starts_with("line 1"));
    }

    #[test]
    fn test_parse_uniform_scale_number() {
        let mut scene = Scene::new();
        let result = scene.parse("a = scale(sphere(1), 2); toplevel(a, 0);");
        assert!(result.ok(), "diagnostic: {}", result.error());

        let root = scene.roots().next().unwrap();
        assert_eq!(
            scene.distance(root.node, Vec3::new(2.0, 0.0, 0.0)).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_parse_rebinding_a_name() {
        let mut scene = Scene::new();
        let result = scene.parse(
            "a = sphere(1); a = cube(2); toplevel(a, 0);",
        );
        assert!(result.ok());
        let root = scene.roots().next().unwrap();
        // `a` refers to the cube after rebinding.
        assert_eq!(scene.distance(root.node, Vec3::ZERO).unwrap(), -2.0);
    }

    #[test]
    fn test_parse_error_location_in_diagnostic() {
        let mut scene = Scene::new();
        let result = scene.parse("a = sphere(1);\nb = cube(oops);");
        assert!(!result.ok());
        assert!(result.error().contains("line 2"), "got: {}", result.error());
    }

    #[test]
    fn test_collected_statements_agree_with_materialization() {
        // The non-streaming entry point sees the same statements the
        // materializer consumes one at a time.
        let source = "a = sphere(1); b = cube(2); toplevel(a, 3);";
        let statements = csg_parser::parse(source).unwrap();
        assert_eq!(statements.len(), 3);

        let mut scene = Scene::new();
        assert!(scene.parse(source).ok());
        assert_eq!(scene.size(), 1);
        assert_eq!(scene.roots().next().unwrap().material, Material(3));
    }

    #[test]
    fn test_parse_empty_source() {
        let mut scene = Scene::new();
        let result = scene.parse("");
        assert!(result.ok());
        assert_eq!(scene.size(), 0);
        assert_eq!(scene.node_count(), 0);
    }
}
