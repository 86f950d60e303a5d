//! # Composition and Transform Builders
//!
//! Free functions that wire nodes into a scene's arena. They are free
//! functions rather than `Node` methods because they accept any solid as
//! a peer, regardless of variant.
//!
//! Every builder validates its operands (same-scene membership, finite
//! and non-degenerate parameters) and returns a typed error on a
//! contract violation; nothing here panics.
//!
//! ## Transform conventions
//!
//! Builders take intuitive parameters and produce the forward
//! object→world matrix: `scale(scene, node, Vec3::splat(2.0))` doubles
//! the solid, `translate(scene, node, v)` moves it by `v`. The inverse
//! needed at evaluation time is computed once here and stored on the
//! node. Angles are in radians.
//!
//! ## Example
//!
//! ```rust
//! use csg_scene::{builder, Scene};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let ball = scene.sphere(1.0).unwrap();
//! let moved = builder::translate(&mut scene, ball, Vec3::new(3.0, 0.0, 0.0)).unwrap();
//!
//! // The moved sphere is centered at (3, 0, 0).
//! assert_eq!(scene.distance(moved, Vec3::new(3.0, 0.0, 0.0)).unwrap(), -1.0);
//! ```

use crate::error::SceneError;
use crate::node::{Node, NodeId};
use crate::scene::{require_finite, Scene};
use config::constants::MATRIX_EPSILON;
use glam::{Mat4, Vec3};

// =============================================================================
// BOOLEAN COMPOSITION
// =============================================================================

/// Boolean union of two solids.
pub fn unite(scene: &mut Scene, left: NodeId, right: NodeId) -> Result<NodeId, SceneError> {
    scene.check_member(left)?;
    scene.check_member(right)?;
    Ok(scene.make(Node::Union { left, right }))
}

/// Boolean intersection of two solids.
pub fn intersect(scene: &mut Scene, left: NodeId, right: NodeId) -> Result<NodeId, SceneError> {
    scene.check_member(left)?;
    scene.check_member(right)?;
    Ok(scene.make(Node::Intersection { left, right }))
}

/// Boolean difference: `left` minus `right`.
pub fn subtract(scene: &mut Scene, left: NodeId, right: NodeId) -> Result<NodeId, SceneError> {
    scene.check_member(left)?;
    scene.check_member(right)?;
    Ok(scene.make(Node::Difference { left, right }))
}

/// Union of a whole operand list, right-folded into nested pairwise
/// unions: `unite_all(&[a, b, c])` builds `unite(a, unite(b, c))`.
///
/// A single operand is returned unchanged; an empty list is an error.
pub fn unite_all(scene: &mut Scene, nodes: &[NodeId]) -> Result<NodeId, SceneError> {
    let (&last, rest) = nodes.split_last().ok_or(SceneError::EmptyOperands)?;
    let mut acc = last;
    for &node in rest.iter().rev() {
        acc = unite(scene, node, acc)?;
    }
    Ok(acc)
}

/// Intersect `node` with the union of `rest`.
///
/// Expresses "A and (B or C or D)" in one call.
pub fn intersect_all(
    scene: &mut Scene,
    node: NodeId,
    rest: &[NodeId],
) -> Result<NodeId, SceneError> {
    let union = unite_all(scene, rest)?;
    intersect(scene, node, union)
}

/// Subtract the union of `rest` from `node`.
///
/// Expresses "A minus (B or C or D)" in one call.
pub fn subtract_all(
    scene: &mut Scene,
    node: NodeId,
    rest: &[NodeId],
) -> Result<NodeId, SceneError> {
    let union = unite_all(scene, rest)?;
    subtract(scene, node, union)
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// Wrap a solid in an arbitrary affine transform.
///
/// `matrix` maps object space to world space and must be finite and
/// invertible. Prefer the named wrappers below unless a custom matrix is
/// genuinely needed.
pub fn transform(scene: &mut Scene, node: NodeId, matrix: Mat4) -> Result<NodeId, SceneError> {
    scene.check_member(node)?;

    for (i, value) in matrix.to_cols_array().into_iter().enumerate() {
        if !value.is_finite() {
            return Err(SceneError::NonFinite {
                param: MATRIX_PARAMS[i],
                value,
            });
        }
    }

    let determinant = matrix.determinant();
    if determinant.abs() < MATRIX_EPSILON {
        return Err(SceneError::SingularMatrix { determinant });
    }

    let inverse = matrix.inverse();
    Ok(scene.make(Node::Transform {
        child: node,
        matrix,
        inverse,
    }))
}

/// Scale a solid by per-axis factors. Every factor must be non-zero.
pub fn scale(scene: &mut Scene, node: NodeId, factors: Vec3) -> Result<NodeId, SceneError> {
    require_finite("scale factor", factors.x)?;
    require_finite("scale factor", factors.y)?;
    require_finite("scale factor", factors.z)?;
    if factors.x == 0.0 || factors.y == 0.0 || factors.z == 0.0 {
        return Err(SceneError::DegenerateScale {
            x: factors.x,
            y: factors.y,
            z: factors.z,
        });
    }
    transform(scene, node, Mat4::from_scale(factors))
}

/// Scale a solid uniformly.
pub fn uniform_scale(scene: &mut Scene, node: NodeId, factor: f32) -> Result<NodeId, SceneError> {
    scale(scene, node, Vec3::splat(factor))
}

/// Scale along the x axis only.
pub fn xscale(scene: &mut Scene, node: NodeId, factor: f32) -> Result<NodeId, SceneError> {
    scale(scene, node, Vec3::new(factor, 1.0, 1.0))
}

/// Scale along the y axis only.
pub fn yscale(scene: &mut Scene, node: NodeId, factor: f32) -> Result<NodeId, SceneError> {
    scale(scene, node, Vec3::new(1.0, factor, 1.0))
}

/// Scale along the z axis only.
pub fn zscale(scene: &mut Scene, node: NodeId, factor: f32) -> Result<NodeId, SceneError> {
    scale(scene, node, Vec3::new(1.0, 1.0, factor))
}

/// Rotate a solid by `angle` radians around `axis`.
///
/// The axis must be non-zero; it is normalized before use.
pub fn rotate(
    scene: &mut Scene,
    node: NodeId,
    angle: f32,
    axis: Vec3,
) -> Result<NodeId, SceneError> {
    require_finite("rotation angle", angle)?;
    require_finite("rotation axis component", axis.x)?;
    require_finite("rotation axis component", axis.y)?;
    require_finite("rotation axis component", axis.z)?;
    if axis == Vec3::ZERO {
        return Err(SceneError::ZeroAxis);
    }
    transform(scene, node, Mat4::from_axis_angle(axis.normalize(), angle))
}

/// Rotate around the x axis.
pub fn xrotate(scene: &mut Scene, node: NodeId, angle: f32) -> Result<NodeId, SceneError> {
    rotate(scene, node, angle, Vec3::X)
}

/// Rotate around the y axis.
pub fn yrotate(scene: &mut Scene, node: NodeId, angle: f32) -> Result<NodeId, SceneError> {
    rotate(scene, node, angle, Vec3::Y)
}

/// Rotate around the z axis.
pub fn zrotate(scene: &mut Scene, node: NodeId, angle: f32) -> Result<NodeId, SceneError> {
    rotate(scene, node, angle, Vec3::Z)
}

/// Translate a solid by `offset`.
pub fn translate(scene: &mut Scene, node: NodeId, offset: Vec3) -> Result<NodeId, SceneError> {
    require_finite("translation offset", offset.x)?;
    require_finite("translation offset", offset.y)?;
    require_finite("translation offset", offset.z)?;
    transform(scene, node, Mat4::from_translation(offset))
}

/// Translate along the x axis.
pub fn xtranslate(scene: &mut Scene, node: NodeId, offset: f32) -> Result<NodeId, SceneError> {
    translate(scene, node, Vec3::new(offset, 0.0, 0.0))
}

/// Translate along the y axis.
pub fn ytranslate(scene: &mut Scene, node: NodeId, offset: f32) -> Result<NodeId, SceneError> {
    translate(scene, node, Vec3::new(0.0, offset, 0.0))
}

/// Translate along the z axis.
pub fn ztranslate(scene: &mut Scene, node: NodeId, offset: f32) -> Result<NodeId, SceneError> {
    translate(scene, node, Vec3::new(0.0, 0.0, offset))
}

/// Names for matrix entries in column-major order, for error reporting.
const MATRIX_PARAMS: [&str; 16] = [
    "matrix entry [0][0]",
    "matrix entry [0][1]",
    "matrix entry [0][2]",
    "matrix entry [0][3]",
    "matrix entry [1][0]",
    "matrix entry [1][1]",
    "matrix entry [1][2]",
    "matrix entry [1][3]",
    "matrix entry [2][0]",
    "matrix entry [2][1]",
    "matrix entry [2][2]",
    "matrix entry [2][3]",
    "matrix entry [3][0]",
    "matrix entry [3][1]",
    "matrix entry [3][2]",
    "matrix entry [3][3]",
];

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::constants::EPSILON;
    use std::f32::consts::FRAC_PI_2;

    fn sample_points() -> Vec<Vec3> {
        let coords = [-2.0f32, -0.5, 0.0, 0.5, 2.0];
        let mut points = Vec::new();
        for &x in &coords {
            for &y in &coords {
                for &z in &coords {
                    points.push(Vec3::new(x, y, z));
                }
            }
        }
        points
    }

    #[test]
    fn test_cross_scene_composition_rejected() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        let left = a.sphere(1.0).unwrap();
        let right = b.sphere(1.0).unwrap();

        assert!(matches!(
            unite(&mut a, left, right),
            Err(SceneError::ForeignNode { .. })
        ));
        assert!(matches!(
            intersect(&mut b, left, right),
            Err(SceneError::ForeignNode { .. })
        ));
        assert!(matches!(
            subtract(&mut a, right, left),
            Err(SceneError::ForeignNode { .. })
        ));

        // Nothing was added to either arena.
        assert_eq!(a.node_count(), 1);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn test_unite_all_fold_equivalence() {
        let mut scene = Scene::new();
        let a = scene.sphere(1.0).unwrap();
        let b = scene.cube(0.5).unwrap();
        let c = scene.sphere(2.0).unwrap();

        let folded = unite_all(&mut scene, &[a, b, c]).unwrap();
        let bc = unite(&mut scene, b, c).unwrap();
        let nested = unite(&mut scene, a, bc).unwrap();

        for p in sample_points() {
            assert_eq!(
                scene.distance(folded, p).unwrap(),
                scene.distance(nested, p).unwrap()
            );
        }
    }

    #[test]
    fn test_unite_all_single_operand() {
        let mut scene = Scene::new();
        let a = scene.sphere(1.0).unwrap();
        assert_eq!(unite_all(&mut scene, &[a]).unwrap(), a);
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_unite_all_empty_rejected() {
        let mut scene = Scene::new();
        assert_eq!(unite_all(&mut scene, &[]), Err(SceneError::EmptyOperands));
    }

    #[test]
    fn test_subtract_all_matches_union_of_subtrahends() {
        let mut scene = Scene::new();
        let base = scene.cube(3.0).unwrap();
        let h1 = scene.sphere(1.0).unwrap();
        let h2 = scene.sphere(0.5).unwrap();

        let carved = subtract_all(&mut scene, base, &[h1, h2]).unwrap();
        let union = unite(&mut scene, h1, h2).unwrap();
        let reference = subtract(&mut scene, base, union).unwrap();

        for p in sample_points() {
            assert_eq!(
                scene.distance(carved, p).unwrap(),
                scene.distance(reference, p).unwrap()
            );
        }
    }

    #[test]
    fn test_intersect_all_matches_union_of_rest() {
        let mut scene = Scene::new();
        let base = scene.cube(2.0).unwrap();
        let a = scene.sphere(1.0).unwrap();
        let b = scene.sphere(1.5).unwrap();

        let combined = intersect_all(&mut scene, base, &[a, b]).unwrap();
        let union = unite(&mut scene, a, b).unwrap();
        let reference = intersect(&mut scene, base, union).unwrap();

        for p in sample_points() {
            assert_eq!(
                scene.distance(combined, p).unwrap(),
                scene.distance(reference, p).unwrap()
            );
        }
    }

    #[test]
    fn test_translate_round_trip() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let v = Vec3::new(1.5, -2.0, 0.75);
        let moved = translate(&mut scene, ball, v).unwrap();

        for p in sample_points() {
            assert_relative_eq!(
                scene.distance(moved, p).unwrap(),
                scene.distance(ball, p - v).unwrap(),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_scale_round_trip() {
        let mut scene = Scene::new();
        let cube = scene.cube(1.0).unwrap();
        let factors = Vec3::new(2.0, 0.5, 4.0);
        let scaled = scale(&mut scene, cube, factors).unwrap();

        for p in sample_points() {
            assert_relative_eq!(
                scene.distance(scaled, p).unwrap(),
                scene.distance(cube, p / factors).unwrap(),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_scale_doubles_the_solid() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let doubled = uniform_scale(&mut scene, ball, 2.0).unwrap();
        // The doubled sphere's surface passes through x = 2.
        assert_relative_eq!(
            scene
                .distance(doubled, Vec3::new(2.0, 0.0, 0.0))
                .unwrap(),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_rotate_round_trip() {
        let mut scene = Scene::new();
        let cube = scene.cube(1.0).unwrap();
        let angle = 0.7f32;
        let rotated = rotate(&mut scene, cube, angle, Vec3::Z).unwrap();

        for p in sample_points() {
            let back = Mat4::from_axis_angle(Vec3::Z, -angle).transform_point3(p);
            assert_relative_eq!(
                scene.distance(rotated, p).unwrap(),
                scene.distance(cube, back).unwrap(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_zrotate_quarter_turn() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let off = xtranslate(&mut scene, ball, 3.0).unwrap();
        let turned = zrotate(&mut scene, off, FRAC_PI_2).unwrap();
        // The sphere moved to +x, then a quarter turn about z carries it to +y.
        assert_relative_eq!(
            scene.distance(turned, Vec3::new(0.0, 3.0, 0.0)).unwrap(),
            -1.0,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_axis_translate_wrappers() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let x = xtranslate(&mut scene, ball, 2.0).unwrap();
        let y = ytranslate(&mut scene, ball, 2.0).unwrap();
        let z = ztranslate(&mut scene, ball, 2.0).unwrap();

        assert_eq!(scene.distance(x, Vec3::new(2.0, 0.0, 0.0)).unwrap(), -1.0);
        assert_eq!(scene.distance(y, Vec3::new(0.0, 2.0, 0.0)).unwrap(), -1.0);
        assert_eq!(scene.distance(z, Vec3::new(0.0, 0.0, 2.0)).unwrap(), -1.0);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        assert!(matches!(
            scale(&mut scene, ball, Vec3::new(1.0, 0.0, 1.0)),
            Err(SceneError::DegenerateScale { .. })
        ));
        assert!(matches!(
            xscale(&mut scene, ball, 0.0),
            Err(SceneError::DegenerateScale { .. })
        ));
    }

    #[test]
    fn test_zero_axis_rejected() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        assert_eq!(
            rotate(&mut scene, ball, 1.0, Vec3::ZERO),
            Err(SceneError::ZeroAxis)
        );
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        assert!(matches!(
            transform(&mut scene, ball, Mat4::ZERO),
            Err(SceneError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_non_finite_matrix_rejected() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let mut matrix = Mat4::IDENTITY;
        matrix.x_axis.x = f32::NAN;
        assert!(matches!(
            transform(&mut scene, ball, matrix),
            Err(SceneError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_non_finite_translation_rejected() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        assert!(matches!(
            translate(&mut scene, ball, Vec3::new(f32::INFINITY, 0.0, 0.0)),
            Err(SceneError::NonFinite { .. })
        ));
    }
}
