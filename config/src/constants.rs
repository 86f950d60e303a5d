//! # Configuration Constants
//!
//! Centralized constants for the CSG pipeline. Distance evaluation and
//! transform validation share these precision values.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Transforms**: Degeneracy thresholds for affine matrices

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two signed-distance values are "equal" within
/// numerical tolerance. Chosen for f32 coordinates in scene-scale units.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f32, b: f32) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-7));
/// ```
pub const EPSILON: f32 = 1e-5;

// =============================================================================
// TRANSFORM CONSTANTS
// =============================================================================

/// Determinant threshold below which an affine matrix is treated as singular.
///
/// Transform nodes must be invertible because distance evaluation maps the
/// query point back into the child's local space. Matrices whose determinant
/// falls under this threshold are rejected at construction time.
///
/// # Example
///
/// ```rust
/// use config::constants::MATRIX_EPSILON;
///
/// let det: f32 = 1e-9;
/// let singular = det.abs() < MATRIX_EPSILON;
/// assert!(singular);
/// ```
pub const MATRIX_EPSILON: f32 = 1e-8;
