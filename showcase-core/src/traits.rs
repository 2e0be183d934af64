//! Core traits for showcase

use crate::{mesh::*, point::*, ray::Ray};

/// A camera-like collaborator able to map between world space and
/// normalized device coordinates
pub trait Projector {
    /// Project a world-space point to normalized device coordinates.
    ///
    /// Returns `None` when the point lies behind the eye.
    fn project_to_ndc(&self, point: &Point3f) -> Option<Point2f>;

    /// World-space ray from the eye through an NDC position
    fn raycast_from(&self, ndc_x: f32, ndc_y: f32) -> Ray;

    /// World-space eye position
    fn eye(&self) -> Point3f;
}

/// Trait for drawable/pickable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);
    
    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }

    /// Radius of a sphere around `center` enclosing the object
    fn bounding_radius(&self) -> f32 {
        let (min, max) = self.bounding_box();
        (max - min).norm() / 2.0
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }
        
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        
        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);
            
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }
        
        (min, max)
    }
}
