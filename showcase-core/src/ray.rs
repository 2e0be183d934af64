//! Rays and ray/geometry intersection

use crate::{mesh::TriangleMesh, point::*, transform::Transform3D};
use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f32 = 1e-7;
const MIN_HIT_DISTANCE: f32 = 1e-5;

/// A half-line in world space with a unit direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray from `from` through `to`
    pub fn through(from: Point3f, to: Point3f) -> Self {
        Self::new(from, to - from)
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }

    /// Ray/triangle intersection using the Möller–Trumbore algorithm.
    ///
    /// Returns the distance along the ray of the hit, only for hits in front
    /// of the origin. Both triangle faces are hittable.
    pub fn intersect_triangle(&self, v0: &Point3f, v1: &Point3f, v2: &Point3f) -> Option<f32> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let h = self.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * self.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        (t > MIN_HIT_DISTANCE).then_some(t)
    }

    /// Nearest hit distance against a mesh placed in the world by `transform`
    pub fn intersect_mesh(&self, mesh: &TriangleMesh, transform: &Transform3D) -> Option<f32> {
        let world: Vec<Point3f> = mesh
            .vertices
            .iter()
            .map(|v| transform.transform_point(v))
            .collect();

        mesh.faces
            .iter()
            .filter_map(|face| self.intersect_triangle(&world[face[0]], &world[face[1]], &world[face[2]]))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}
