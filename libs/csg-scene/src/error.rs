//! # Scene Errors
//!
//! Error types for scene construction.
//!
//! These report contract violations (composing nodes across scenes,
//! degenerate geometric parameters). They are deterministic across build
//! configurations: no check here is an assertion that release builds
//! compile out.

use crate::node::SceneId;
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A handle from one scene was passed to another.
    #[error("node handle belongs to scene {handle}, not scene {scene}")]
    ForeignNode {
        /// Owner recorded in the handle.
        handle: SceneId,
        /// Scene the handle was used with.
        scene: SceneId,
    },

    /// A handle's arena index is out of range for its scene.
    ///
    /// Reachable through deserialized or otherwise forged handles; handles
    /// issued by the scene itself are always in range.
    #[error("node handle index {index} is out of range, scene has {count} nodes")]
    InvalidHandle {
        /// Index recorded in the handle.
        index: u32,
        /// Number of nodes in the arena.
        count: usize,
    },

    /// A geometric parameter was NaN or infinite.
    #[error("{param} must be finite, got {value}")]
    NonFinite {
        /// Which parameter was rejected.
        param: &'static str,
        /// Offending value.
        value: f32,
    },

    /// A scale factor of zero cannot be inverted back to local space.
    #[error("scale factors must be non-zero, got [{x}, {y}, {z}]")]
    DegenerateScale {
        /// X factor.
        x: f32,
        /// Y factor.
        y: f32,
        /// Z factor.
        z: f32,
    },

    /// Rotation requires a non-zero axis.
    #[error("rotation axis must be non-zero")]
    ZeroAxis,

    /// The transform matrix cannot be inverted.
    #[error("transform matrix is singular (determinant {determinant})")]
    SingularMatrix {
        /// Determinant that failed the invertibility check.
        determinant: f32,
    },

    /// Folding operations need at least one operand.
    #[error("operand list must not be empty")]
    EmptyOperands,
}

// =============================================================================
// TESTS
// =============================================================================
