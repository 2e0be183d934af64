//! Retained scene graph for connector lines

use std::collections::BTreeMap;

use showcase_annotations::{SceneHost, VisualId};
use showcase_core::LineVertex;

/// A polyline held by the scene
#[derive(Debug, Clone, PartialEq)]
pub struct LineObject {
    pub vertices: Vec<LineVertex>,
}

impl LineObject {
    /// Raw vertex data, ready for upload to a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of line segments in the strip
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// In-memory scene the annotation engine draws into
#[derive(Debug, Default)]
pub struct SceneGraph {
    next_id: u64,
    lines: BTreeMap<VisualId, LineObject>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, id: VisualId) -> Option<&LineObject> {
        self.lines.get(&id)
    }

    /// Lines in submission order
    pub fn lines(&self) -> impl Iterator<Item = (VisualId, &LineObject)> {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.lines.values().map(|l| l.vertices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl SceneHost for SceneGraph {
    fn submit_line(&mut self, vertices: &[LineVertex]) -> VisualId {
        self.next_id += 1;
        let id = VisualId(self.next_id);
        self.lines.insert(
            id,
            LineObject {
                vertices: vertices.to_vec(),
            },
        );
        id
    }

    fn remove(&mut self, visual: VisualId) {
        self.lines.remove(&visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::Point3f;

    fn segment() -> Vec<LineVertex> {
        vec![
            LineVertex::new(&Point3f::new(0.0, 0.0, 0.0), [1.0, 1.0, 1.0]),
            LineVertex::new(&Point3f::new(0.0, 1.0, 0.0), [1.0, 1.0, 1.0]),
        ]
    }

    #[test]
    fn test_submit_and_remove() {
        let mut scene = SceneGraph::new();
        let a = scene.submit_line(&segment());
        let b = scene.submit_line(&segment());
        assert_ne!(a, b);
        assert_eq!(scene.line_count(), 2);
        assert_eq!(scene.vertex_count(), 4);

        scene.remove(a);
        assert!(scene.line(a).is_none());
        assert_eq!(scene.line_count(), 1);

        // Removing twice is harmless
        scene.remove(a);
        assert_eq!(scene.line_count(), 1);
    }

    #[test]
    fn test_vertex_bytes_are_tightly_packed() {
        let mut scene = SceneGraph::new();
        let id = scene.submit_line(&segment());
        let line = scene.line(id).expect("line exists");
        assert_eq!(line.vertex_bytes().len(), 2 * 6 * std::mem::size_of::<f32>());
        assert_eq!(line.segment_count(), 1);
    }
}
