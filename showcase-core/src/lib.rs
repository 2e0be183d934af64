//! Core data structures and traits for showcase
//! 
//! This crate provides the fundamental types shared by the product viewer:
//! points and rays, hotspot marker meshes, transforms, the viewer camera and
//! the projection traits consumed by the annotation engine.

pub mod point;
pub mod ray;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod camera;
pub mod viewport;
pub mod error;

pub use point::*;
pub use ray::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use camera::*;
pub use viewport::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, UnitQuaternion};
