//! Camera utilities for the product viewer

use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::{point::*, ray::Ray, traits::Projector};

/// Constraints applied to orbit navigation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle bounds in radians, measured from +Y
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 20.0,
            min_polar_angle: 0.5,
            max_polar_angle: 1.5,
        }
    }
}

/// A perspective camera orbiting a target point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub limits: OrbitLimits,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
            limits: OrbitLimits::default(),
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Combined projection * view matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Rotate the camera around the target, respecting the orbit limits
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius < f32::EPSILON {
            return;
        }

        let mut azimuth = offset.z.atan2(offset.x);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth += horizontal;
        polar = (polar + vertical).clamp(self.limits.min_polar_angle, self.limits.max_polar_angle);

        self.position = self.target
            + Vector3::new(
                radius * polar.sin() * azimuth.cos(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.sin(),
            );
    }

    /// Move towards (positive) or away from (negative) the target
    pub fn zoom(&mut self, delta: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius < f32::EPSILON {
            return;
        }
        let new_radius = (radius * (1.0 - delta))
            .clamp(self.limits.min_distance, self.limits.max_distance);
        self.position = self.target + offset * (new_radius / radius);
    }
}

impl Projector for Camera {
    fn project_to_ndc(&self, point: &Point3f) -> Option<Point2f> {
        let clip = self.view_projection() * point.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(Point2f::new(clip.x / clip.w, clip.y / clip.w))
    }

    fn raycast_from(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let Some(inverse) = self.view_projection().try_inverse() else {
            return Ray::through(self.position, self.target);
        };

        let unproject = |z: f32| {
            let p = inverse * Vector4::new(ndc_x, ndc_y, z, 1.0);
            Point3f::from_homogeneous(p)
        };

        match (unproject(-1.0), unproject(1.0)) {
            (Some(near), Some(far)) => Ray::through(near, far),
            _ => Ray::through(self.position, self.target),
        }
    }

    fn eye(&self) -> Point3f {
        self.position
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(4.0, 6.0, 11.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            45.0_f32.to_radians(),
            16.0 / 9.0,
            1.0,
            1000.0,
        )
    }
}
