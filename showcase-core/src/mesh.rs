//! Mesh data structures for hotspot markers

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a flat disc of `radius` centered at the origin in the XY plane.
    ///
    /// The disc faces +Z, so rotating +Z towards the eye billboards it.
    pub fn disc(radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::new();
        let center = mesh.add_vertex(Point3f::origin());

        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            mesh.add_vertex(Point3f::new(radius * angle.cos(), radius * angle.sin(), 0.0));
        }
        for i in 0..segments {
            let a = 1 + i;
            let b = 1 + (i + 1) % segments;
            mesh.add_face([center, a, b]);
        }

        mesh
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check that every face references an existing vertex
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        self.faces.iter().all(|face| face.iter().all(|&i| i < n))
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
