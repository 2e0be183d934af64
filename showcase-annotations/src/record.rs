//! Annotation records and hotspot layouts

use serde::{Deserialize, Serialize};
use showcase_core::{Point3f, Vector3f};

/// Identifier of a registered hotspot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HotspotId(pub u32);

impl std::fmt::Display for HotspotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hotspot#{}", self.0)
    }
}

/// Where an annotation's connector ends, relative to its hotspot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetOffset {
    /// Rise `height` above the anchor, then run `length` horizontally.
    ///
    /// `angle_degrees` is measured in the XZ plane from +X, counter-clockwise
    /// when seen from above, so negative angles swing towards +Z.
    Polar {
        angle_degrees: f32,
        length: f32,
        height: f32,
    },
    /// Fixed world-space endpoint
    Explicit { endpoint: Point3f },
}

impl TargetOffset {
    pub fn polar(angle_degrees: f32, length: f32, height: f32) -> Self {
        Self::Polar {
            angle_degrees,
            length,
            height,
        }
    }

    /// Waypoints of the connector path starting at `anchor`.
    ///
    /// Zero-length legs are dropped, so the result may hold a single point.
    pub fn waypoints(&self, anchor: &Point3f) -> Vec<Point3f> {
        let mut points = vec![*anchor];
        match *self {
            TargetOffset::Polar {
                angle_degrees,
                length,
                height,
            } => {
                let elbow = anchor + Vector3f::new(0.0, height, 0.0);
                let theta = angle_degrees.to_radians();
                let end = elbow + Vector3f::new(theta.cos(), 0.0, -theta.sin()) * length;
                push_distinct(&mut points, elbow);
                push_distinct(&mut points, end);
            }
            TargetOffset::Explicit { endpoint } => push_distinct(&mut points, endpoint),
        }
        points
    }

    /// Final point of the connector path
    pub fn endpoint(&self, anchor: &Point3f) -> Point3f {
        self.waypoints(anchor).last().copied().unwrap_or(*anchor)
    }
}

fn push_distinct(points: &mut Vec<Point3f>, p: Point3f) {
    if points.last().map_or(true, |last| (last - p).norm() > f32::EPSILON) {
        points.push(p);
    }
}

/// One callout attached to a hotspot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub highlight: Option<String>,
    pub target: TargetOffset,
}

impl AnnotationRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>, target: TargetOffset) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            highlight: None,
            target,
        }
    }

    pub fn with_highlight(mut self, highlight: impl Into<String>) -> Self {
        self.highlight = Some(highlight.into());
        self
    }

    /// Body length in characters, the unit of text reveal
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}

/// How a hotspot presents its records on activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// One growing connector per record, each revealing its own overlay
    #[default]
    Connectors,
    /// All records in one fixed panel, revealed with a per-record stagger
    StackedPanel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_target_rises_then_runs() {
        let anchor = Point3f::new(1.0, 2.0, 0.0);
        let points = TargetOffset::polar(0.0, 3.0, 0.5).waypoints(&anchor);
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[1], Point3f::new(1.0, 2.5, 0.0), epsilon = 1e-6);
        assert_relative_eq!(points[2], Point3f::new(4.0, 2.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_negative_polar_angle_swings_towards_positive_z() {
        let end = TargetOffset::polar(-90.0, 2.0, 0.0).endpoint(&Point3f::origin());
        assert_relative_eq!(end, Point3f::new(0.0, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_flat_polar_target_drops_elbow() {
        let points = TargetOffset::polar(45.0, 1.0, 0.0).waypoints(&Point3f::origin());
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_explicit_target_at_anchor_is_single_point() {
        let anchor = Point3f::new(0.0, 1.0, 0.0);
        let points = TargetOffset::Explicit { endpoint: anchor }.waypoints(&anchor);
        assert_eq!(points, vec![anchor]);
    }

    #[test]
    fn test_body_len_counts_characters() {
        let record = AnnotationRecord::new("Lens", "f/1.8 — 50mm", TargetOffset::polar(0.0, 1.0, 0.0));
        assert_eq!(record.body_len(), 12);
    }
}
