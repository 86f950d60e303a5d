//! # Scene
//!
//! Exclusive owner of every CSG node. The scene is an arena: nodes are
//! appended, never individually destroyed, and all of them go away
//! together when the scene is dropped. Handles ([`NodeId`]) stay valid
//! across moves of the scene value because they address by scene id and
//! arena index.
//!
//! The scene is deliberately *not* `Clone`: duplicating it would either
//! deep-copy the graph or alias node identities across two owners. Only
//! moves transfer ownership, and they transfer the whole arena intact.

use crate::error::SceneError;
use crate::node::{Material, Node, NodeId, SceneId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique scene identities.
static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// ROOT
// =============================================================================

/// One entry of the root registry: a registered solid plus its material.
///
/// This is the unit a downstream voxelizer consumes: it walks the roots
/// in order and samples [`Scene::distance`] on each `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    /// Handle of the root's `Toplevel` node.
    pub node: NodeId,
    /// Opaque material tag supplied at registration.
    pub material: Material,
}

// =============================================================================
// SCENE
// =============================================================================

/// Arena owner and factory for CSG nodes, keeper of the root registry.
///
/// ## Example
///
/// ```rust
/// use csg_scene::{Material, Scene};
///
/// let mut scene = Scene::new();
/// let ball = scene.sphere(2.0).unwrap();
/// scene.toplevel(ball, Material(5)).unwrap();
///
/// assert_eq!(scene.size(), 1);
/// let root = scene.roots().next().unwrap();
/// assert_eq!(scene.distance(root.node, glam::Vec3::ZERO).unwrap(), -2.0);
/// ```
#[derive(Debug)]
pub struct Scene {
    /// Unique identity, stamped into every handle this scene issues.
    id: SceneId,
    /// Node arena. Grow-only.
    nodes: Vec<Node>,
    /// Root registry: handles of `Toplevel` nodes, in insertion order.
    toplevels: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed)),
            nodes: Vec::new(),
            toplevels: Vec::new(),
        }
    }

    /// This scene's identity.
    pub fn id(&self) -> SceneId {
        self.id
    }

    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// Create a sphere node.
    ///
    /// The radius must be finite. Non-positive radii are accepted
    /// structurally; the distance field is still well defined.
    pub fn sphere(&mut self, radius: f32) -> Result<NodeId, SceneError> {
        require_finite("sphere radius", radius)?;
        Ok(self.make(Node::Sphere { radius }))
    }

    /// Create a cube node. `side` is the half-extent along each axis.
    ///
    /// The side must be finite. Non-positive sides are accepted
    /// structurally.
    pub fn cube(&mut self, side: f32) -> Result<NodeId, SceneError> {
        require_finite("cube side", side)?;
        Ok(self.make(Node::Cube { side }))
    }

    // =========================================================================
    // ROOT REGISTRY
    // =========================================================================

    /// Register a solid as a root object with its material.
    ///
    /// Wraps `node` in a `Toplevel` node and appends it to the root
    /// registry. Appending is the only mutation the registry undergoes;
    /// iteration order equals registration order.
    pub fn toplevel(&mut self, node: NodeId, material: Material) -> Result<(), SceneError> {
        self.check_member(node)?;
        let root = self.make(Node::Toplevel {
            child: node,
            material,
        });
        self.toplevels.push(root);
        Ok(())
    }

    /// Iterate the root registry in registration order.
    pub fn roots(&self) -> impl Iterator<Item = Root> + '_ {
        self.toplevels.iter().map(move |&id| {
            let material = match self.node_at(id.index) {
                Node::Toplevel { material, .. } => *material,
                // The registry only ever holds Toplevel handles.
                _ => unreachable!("root registry holds non-toplevel node"),
            };
            Root { node: id, material }
        })
    }

    /// Number of root objects (not total node count).
    pub fn size(&self) -> usize {
        self.toplevels.len()
    }

    /// Whether the scene has no root objects.
    pub fn is_empty(&self) -> bool {
        self.toplevels.is_empty()
    }

    /// Total number of nodes in the arena. Monotonic.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // =========================================================================
    // NODE ACCESS
    // =========================================================================

    /// Read a node through its handle.
    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.check_member(id)?;
        Ok(self.node_at(id.index))
    }

    /// Verify a handle belongs to this scene and addresses a stored node.
    ///
    /// Handles issued here are in range by construction, but handles can
    /// also arrive through deserialization; those get the same typed
    /// rejection instead of an out-of-bounds panic.
    pub(crate) fn check_member(&self, id: NodeId) -> Result<(), SceneError> {
        if id.scene != self.id {
            return Err(SceneError::ForeignNode {
                handle: id.scene,
                scene: self.id,
            });
        }
        if id.index as usize >= self.nodes.len() {
            return Err(SceneError::InvalidHandle {
                index: id.index,
                count: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Arena lookup by index. Indices in stored nodes are valid by
    /// construction: children exist before parents and nothing is removed.
    pub(crate) fn node_at(&self, index: u32) -> &Node {
        &self.nodes[index as usize]
    }

    /// Store a node and issue its handle.
    ///
    /// The single choke point every factory and builder funnels through;
    /// membership validation happens in front of it. Handles index with
    /// `u32`, capping the arena at `u32::MAX` nodes.
    pub(crate) fn make(&mut self, node: Node) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize);
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeId {
            scene: self.id,
            index,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject NaN and infinite geometric parameters.
pub(crate) fn require_finite(param: &'static str, value: f32) -> Result<(), SceneError> {
    if !value.is_finite() {
        return Err(SceneError::NonFinite { param, value });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
