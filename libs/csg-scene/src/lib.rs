//! # CSG Scene
//!
//! A constructive-solid-geometry scene graph: solids are signed distance
//! functions (SDFs) composed through boolean operations and affine
//! transforms, owned by a [`Scene`] arena, and exposed to downstream
//! voxel/mesh generators through an ordered root registry.
//!
//! ## Architecture
//!
//! ```text
//! Source → csg-parser (statements) → csg-scene (node arena + SDF)
//!                                         ↓
//!                        octree voxelizer / mesh extractor
//! ```
//!
//! ## Distance semantics
//!
//! `distance(point)` is negative inside a solid, zero on its boundary,
//! and positive outside. Evaluation is a pure read: once construction is
//! done, any number of readers may sample the tree concurrently.
//!
//! ## Ownership
//!
//! The [`Scene`] exclusively owns every node. Builders return non-owning
//! [`NodeId`] handles that stay valid for the scene's lifetime, across
//! moves of the scene value. Composing handles from different scenes is
//! rejected with a typed [`SceneError`].
//!
//! ## Example
//!
//! ```rust
//! use csg_scene::{builder, Material, Scene};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let block = scene.cube(4.0).unwrap();
//! let hole = scene.sphere(1.0).unwrap();
//! let carved = builder::subtract(&mut scene, block, hole).unwrap();
//! scene.toplevel(carved, Material(5)).unwrap();
//!
//! for root in scene.roots() {
//!     // Sample anywhere; the origin sits inside the carved-out sphere.
//!     let d = scene.distance(root.node, Vec3::ZERO).unwrap();
//!     assert_eq!(d, 1.0);
//! }
//! ```

pub mod builder;
pub mod dump;
pub mod error;
pub mod eval;
pub mod node;
pub mod parse;
pub mod scene;

// Re-export public API
pub use error::SceneError;
pub use node::{Material, Node, NodeId, SceneId};
pub use parse::ParseResult;
pub use scene::{Root, Scene};

// =============================================================================
// TESTS
// =============================================================================
