//! # Scene Dump
//!
//! Deterministic textual rendering of scene trees, one root per line.
//! Used for diagnostics and golden-output tests: identical trees render
//! byte-identically.

use crate::error::SceneError;
use crate::node::{Node, NodeId};
use crate::scene::Scene;
use std::fmt;
use std::fmt::Write;

impl Scene {
    /// Render every root binding's subtree, one per line, in registry
    /// order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            self.dump_at(root.node.index, &mut out);
            out.push('\n');
        }
        out
    }

    /// Render a single subtree.
    pub fn dump_node(&self, id: NodeId) -> Result<String, SceneError> {
        self.check_member(id)?;
        let mut out = String::new();
        self.dump_at(id.index, &mut out);
        Ok(out)
    }

    /// Recursive renderer by arena index.
    fn dump_at(&self, index: u32, out: &mut String) {
        match self.node_at(index) {
            Node::Sphere { radius } => {
                let _ = write!(out, "sphere({})", radius);
            }
            Node::Cube { side } => {
                let _ = write!(out, "cube({})", side);
            }
            Node::Union { left, right } => {
                out.push_str("union(");
                self.dump_at(left.index, out);
                out.push_str(", ");
                self.dump_at(right.index, out);
                out.push(')');
            }
            Node::Intersection { left, right } => {
                out.push_str("intersection(");
                self.dump_at(left.index, out);
                out.push_str(", ");
                self.dump_at(right.index, out);
                out.push(')');
            }
            Node::Difference { left, right } => {
                out.push_str("difference(");
                self.dump_at(left.index, out);
                out.push_str(", ");
                self.dump_at(right.index, out);
                out.push(')');
            }
            Node::Transform { child, matrix, .. } => {
                out.push_str("transform([");
                for (i, value) in matrix.to_cols_array().into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}", value);
                }
                out.push_str("], ");
                self.dump_at(child.index, out);
                out.push(')');
            }
            Node::Toplevel { child, material } => {
                out.push_str("toplevel(");
                self.dump_at(child.index, out);
                let _ = write!(out, ", {})", material.0);
            }
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

// =============================================================================
// TESTS
// =============================================================================
