//! # Distance Evaluation
//!
//! Signed-distance evaluation over the node arena. Negative inside, zero
//! on the boundary, positive outside.
//!
//! Evaluation is a pure read of the tree: no mutation, no allocation,
//! safe to run concurrently from any number of readers as long as the
//! scene is not being mutated at the same time.

use crate::error::SceneError;
use crate::node::{Node, NodeId};
use crate::scene::Scene;
use glam::Vec3;

impl Scene {
    /// Signed distance from `point` to the solid rooted at `node`.
    ///
    /// The handle is validated against this scene; the walk itself is
    /// infallible because stored child links are valid by construction.
    pub fn distance(&self, node: NodeId, point: Vec3) -> Result<f32, SceneError> {
        self.check_member(node)?;
        Ok(self.distance_at(node.index, point))
    }

    /// Recursive distance walk by arena index.
    pub(crate) fn distance_at(&self, index: u32, point: Vec3) -> f32 {
        match self.node_at(index) {
            Node::Sphere { radius } => sphere_distance(*radius, point),
            Node::Cube { side } => cube_distance(*side, point),
            Node::Union { left, right } => self
                .distance_at(left.index, point)
                .min(self.distance_at(right.index, point)),
            Node::Intersection { left, right } => self
                .distance_at(left.index, point)
                .max(self.distance_at(right.index, point)),
            Node::Difference { left, right } => self
                .distance_at(left.index, point)
                .max(-self.distance_at(right.index, point)),
            Node::Transform { child, inverse, .. } => {
                // The stored matrix maps object→world; evaluation walks
                // world→object, so the query point goes through the inverse.
                self.distance_at(child.index, inverse.transform_point3(point))
            }
            Node::Toplevel { child, .. } => self.distance_at(child.index, point),
        }
    }
}

/// Sphere SDF: distance to a sphere of `radius` centered at the origin.
fn sphere_distance(radius: f32, point: Vec3) -> f32 {
    point.length() - radius
}

/// Box SDF: distance to an axis-aligned cube with half-extent `side`,
/// centered at the origin.
///
/// Outside, the positive part of the per-axis face distances contributes
/// its Euclidean length; inside, the largest (least negative) face
/// distance is the signed depth.
fn cube_distance(side: f32, point: Vec3) -> f32 {
    let q = point.abs() - Vec3::splat(side);
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{intersect, subtract, unite};
    use crate::node::Material;
    use approx::assert_relative_eq;
    use config::constants::EPSILON;

    #[test]
    fn test_sphere_distance_at_origin() {
        let mut scene = Scene::new();
        let ball = scene.sphere(2.0).unwrap();
        assert_eq!(scene.distance(ball, Vec3::ZERO).unwrap(), -2.0);
    }

    #[test]
    fn test_sphere_distance_outside() {
        let mut scene = Scene::new();
        let ball = scene.sphere(2.0).unwrap();
        // A point at radius R + k is exactly k away from the surface.
        for k in [0.0f32, 0.5, 1.0, 10.0] {
            let p = Vec3::new(2.0 + k, 0.0, 0.0);
            assert_relative_eq!(scene.distance(ball, p).unwrap(), k, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_sphere_distance_on_diagonal() {
        let mut scene = Scene::new();
        let ball = scene.sphere(1.0).unwrap();
        let p = Vec3::splat(1.0); // length sqrt(3)
        assert_relative_eq!(
            scene.distance(ball, p).unwrap(),
            3.0f32.sqrt() - 1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_cube_distance_inside() {
        let mut scene = Scene::new();
        let cube = scene.cube(4.0).unwrap();
        assert_eq!(scene.distance(cube, Vec3::ZERO).unwrap(), -4.0);
        // One unit from the +x face, still inside.
        assert_eq!(
            scene.distance(cube, Vec3::new(3.0, 0.0, 0.0)).unwrap(),
            -1.0
        );
    }

    #[test]
    fn test_cube_distance_outside_face() {
        let mut scene = Scene::new();
        let cube = scene.cube(1.0).unwrap();
        assert_eq!(scene.distance(cube, Vec3::new(3.0, 0.0, 0.0)).unwrap(), 2.0);
    }

    #[test]
    fn test_cube_distance_outside_corner() {
        let mut scene = Scene::new();
        let cube = scene.cube(1.0).unwrap();
        // Past the (+,+,+) corner the distance is Euclidean to that corner.
        let p = Vec3::new(2.0, 2.0, 2.0);
        assert_relative_eq!(
            scene.distance(cube, p).unwrap(),
            3.0f32.sqrt(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_cube_distance_on_surface() {
        let mut scene = Scene::new();
        let cube = scene.cube(2.0).unwrap();
        assert_eq!(scene.distance(cube, Vec3::new(2.0, 0.0, 0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_union_is_min() {
        let mut scene = Scene::new();
        let a = scene.sphere(1.0).unwrap();
        let b = scene.cube(2.0).unwrap();
        let u = unite(&mut scene, a, b).unwrap();

        for p in sample_points() {
            let expected = scene
                .distance(a, p)
                .unwrap()
                .min(scene.distance(b, p).unwrap());
            assert_eq!(scene.distance(u, p).unwrap(), expected);
        }
    }

    #[test]
    fn test_intersection_is_max() {
        let mut scene = Scene::new();
        let a = scene.sphere(1.5).unwrap();
        let b = scene.cube(1.0).unwrap();
        let i = intersect(&mut scene, a, b).unwrap();

        for p in sample_points() {
            let expected = scene
                .distance(a, p)
                .unwrap()
                .max(scene.distance(b, p).unwrap());
            assert_eq!(scene.distance(i, p).unwrap(), expected);
        }
    }

    #[test]
    fn test_difference_is_max_of_negated() {
        let mut scene = Scene::new();
        let a = scene.cube(2.0).unwrap();
        let b = scene.sphere(1.0).unwrap();
        let d = subtract(&mut scene, a, b).unwrap();

        for p in sample_points() {
            let expected = scene
                .distance(a, p)
                .unwrap()
                .max(-scene.distance(b, p).unwrap());
            assert_eq!(scene.distance(d, p).unwrap(), expected);
        }
    }

    #[test]
    fn test_carved_cube_at_origin() {
        // The origin sits inside the carved-out sphere, so it lies outside
        // the difference: max(-4, -(-1)) = 1.
        let mut scene = Scene::new();
        let cube = scene.cube(4.0).unwrap();
        let hole = scene.sphere(1.0).unwrap();
        let carved = subtract(&mut scene, cube, hole).unwrap();
        assert_eq!(scene.distance(carved, Vec3::ZERO).unwrap(), 1.0);
    }

    #[test]
    fn test_toplevel_delegates_to_child() {
        let mut scene = Scene::new();
        let ball = scene.sphere(2.0).unwrap();
        scene.toplevel(ball, Material(9)).unwrap();

        let root = scene.roots().next().unwrap();
        for p in sample_points() {
            assert_eq!(
                scene.distance(root.node, p).unwrap(),
                scene.distance(ball, p).unwrap()
            );
        }
    }

    #[test]
    fn test_distance_rejects_foreign_handle() {
        let mut a = Scene::new();
        let b = Scene::new();
        let ball = a.sphere(1.0).unwrap();
        assert!(matches!(
            b.distance(ball, Vec3::ZERO),
            Err(SceneError::ForeignNode { .. })
        ));
    }

    #[test]
    fn test_distance_is_pure() {
        let mut scene = Scene::new();
        let ball = scene.sphere(2.0).unwrap();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let first = scene.distance(ball, p).unwrap();
        let second = scene.distance(ball, p).unwrap();
        assert_eq!(first, second);
        assert_eq!(scene.node_count(), 1);
    }

    /// Deterministic sample grid around the interesting region.
    fn sample_points() -> Vec<Vec3> {
        let coords = [-3.0f32, -1.5, -0.5, 0.0, 0.5, 1.5, 3.0];
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
}
