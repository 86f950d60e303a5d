//! # Node Model
//!
//! The closed set of CSG node kinds plus the handle types that refer to
//! them. Nodes live in a [`Scene`](crate::Scene) arena and reference each
//! other through [`NodeId`] handles; the arena index alone never leaves
//! the owning scene.
//!
//! Adding a new solid or combinator means adding a variant here and
//! updating every `match` over [`Node`] (distance, dump); the compiler
//! flags each dispatch site.

use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SCENE ID
// =============================================================================

/// Identity of a scene, drawn from a process-global counter.
///
/// Stored in every [`NodeId`] so that "does this handle belong to this
/// scene" is a plain comparison, even after the scene value has moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub(crate) u64);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// NODE ID
// =============================================================================

/// Non-owning handle to a node stored in a scene's arena.
///
/// Valid exactly as long as the owning scene is alive. Handles survive
/// moves of the scene value: they address by scene id + arena index, not
/// by memory location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Owning scene.
    pub(crate) scene: SceneId,
    /// Index into the scene's arena. Bounds the arena at `u32::MAX` nodes.
    pub(crate) index: u32,
}

impl NodeId {
    /// The scene this handle belongs to.
    pub fn scene(&self) -> SceneId {
        self.scene
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Opaque material tag attached to root objects.
///
/// Supplied by an external voxel/material subsystem and never interpreted
/// here; it is stored on the root binding and handed back to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material(pub u32);

impl From<u32> for Material {
    fn from(tag: u32) -> Self {
        Material(tag)
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A CSG node.
///
/// The variant set is closed: exactly these seven kinds exist. Child
/// links are handles into the same scene's arena; the builders guarantee
/// same-scene membership and acyclicity by construction (children always
/// exist before their parent, and nodes are never re-parented).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A sphere of the given radius, centered at the local origin.
    /// Negative inside, positive outside.
    Sphere {
        /// Radius (finite; non-positive values are structurally valid).
        radius: f32,
    },

    /// An axis-aligned cube centered at the local origin.
    Cube {
        /// Half-extent along each axis.
        side: f32,
    },

    /// Boolean union of two solids: `min(left, right)`.
    Union {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },

    /// Boolean intersection of two solids: `max(left, right)`.
    Intersection {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },

    /// Boolean difference, left minus right: `max(left, -right)`.
    Difference {
        /// Solid to carve from.
        left: NodeId,
        /// Solid carved away.
        right: NodeId,
    },

    /// An affine transform applied to a child solid.
    Transform {
        /// Transformed solid.
        child: NodeId,
        /// Object→world matrix.
        matrix: Mat4,
        /// Precomputed world→object inverse, applied to query points.
        inverse: Mat4,
    },

    /// A root binding: a solid registered in the scene's root registry
    /// together with its material.
    Toplevel {
        /// Bound solid.
        child: NodeId,
        /// Opaque material tag.
        material: Material,
    },
}

impl Node {
    /// Whether this node is a leaf primitive.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Node::Sphere { .. } | Node::Cube { .. })
    }

    /// Whether this node is a binary boolean operation.
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            Node::Union { .. } | Node::Intersection { .. } | Node::Difference { .. }
        )
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match self {
            Node::Sphere { .. } | Node::Cube { .. } => 0,
            Node::Transform { .. } | Node::Toplevel { .. } => 1,
            Node::Union { .. } | Node::Intersection { .. } | Node::Difference { .. } => 2,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
