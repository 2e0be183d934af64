//! 3D transformation utilities

use nalgebra::{Isometry3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that places hotspot geometry in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Rotation that turns local +Z towards `direction`.
    ///
    /// Falls back to a half turn about +Y when `direction` is exactly -Z, and
    /// to the identity for a zero direction.
    pub fn facing(direction: &Vector3<f32>) -> UnitQuaternion<f32> {
        if direction.norm_squared() <= f32::EPSILON {
            return UnitQuaternion::identity();
        }
        UnitQuaternion::rotation_between(&Vector3::z(), direction).unwrap_or_else(|| {
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::PI)
        })
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }
}
