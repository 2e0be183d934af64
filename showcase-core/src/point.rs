//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D point, used for normalized device coordinates
pub type Point2f = Point2<f32>;

/// A line vertex as submitted to the scene for connector rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

unsafe impl Pod for LineVertex {}
unsafe impl Zeroable for LineVertex {}

impl LineVertex {
    pub fn new(position: &Point3f, color: [f32; 3]) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }
}

/// Linearly interpolate between two points
pub fn lerp_point(a: &Point3f, b: &Point3f, t: f32) -> Point3f {
    a + (b - a) * t
}
