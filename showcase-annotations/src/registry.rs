//! Hotspot registry and ray hit testing

use nalgebra::UnitQuaternion;
use showcase_core::{Drawable, Error, Point3f, Ray, Result, Transform3D, TriangleMesh};

use crate::record::{AnnotationRecord, HotspotId, Layout};

/// Default radius of the marker disc drawn for a hotspot
pub const DEFAULT_MARKER_RADIUS: f32 = 0.15;

/// A fixed interactive anchor in the scene
#[derive(Debug, Clone)]
pub struct Hotspot {
    id: HotspotId,
    anchor: Point3f,
    marker: TriangleMesh,
    orientation: UnitQuaternion<f32>,
    layout: Layout,
    records: Vec<AnnotationRecord>,
}

impl Hotspot {
    /// Create a hotspot with the default disc marker and connector layout
    pub fn new(id: HotspotId, anchor: Point3f, records: Vec<AnnotationRecord>) -> Self {
        Self {
            id,
            anchor,
            marker: TriangleMesh::disc(DEFAULT_MARKER_RADIUS, 24),
            orientation: UnitQuaternion::identity(),
            layout: Layout::default(),
            records,
        }
    }

    /// Replace the marker geometry, given in the hotspot's local frame
    pub fn with_marker(mut self, marker: TriangleMesh) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn id(&self) -> HotspotId {
        self.id
    }

    pub fn anchor(&self) -> Point3f {
        self.anchor
    }

    pub fn marker(&self) -> &TriangleMesh {
        &self.marker
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Local-to-world transform of the marker
    pub fn transform(&self) -> Transform3D {
        Transform3D::from_translation_rotation(self.anchor.coords, self.orientation)
    }

    /// Distance along `ray` at which it enters the marker, if it does
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let transform = self.transform();

        // Broad phase against the marker's bounding sphere
        let center = transform.transform_point(&self.marker.center());
        let radius = self.marker.bounding_radius();
        let to_center = center - ray.origin;
        let along = to_center.dot(&ray.direction);
        let off_axis_sq = to_center.norm_squared() - along * along;
        if along + radius < 0.0 || off_axis_sq > radius * radius + f32::EPSILON {
            return None;
        }

        ray.intersect_mesh(&self.marker, &transform)
    }
}

/// The set of hotspots that can be picked
#[derive(Debug, Clone)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    max_distance: f32,
}

impl HotspotRegistry {
    /// Create an empty registry that ignores hits farther than `max_distance`
    pub fn new(max_distance: f32) -> Self {
        Self {
            hotspots: Vec::new(),
            max_distance,
        }
    }

    /// Add a hotspot; ids must be unique and the marker pickable
    pub fn register(&mut self, hotspot: Hotspot) -> Result<()> {
        if self.get(hotspot.id).is_some() {
            return Err(Error::InvalidData(format!("{} is already registered", hotspot.id)));
        }
        if hotspot.marker.is_empty() || !hotspot.marker.is_well_formed() {
            return Err(Error::InvalidData(format!("{} has no pickable marker", hotspot.id)));
        }
        self.hotspots.push(hotspot);
        Ok(())
    }

    pub fn get(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter()
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Nearest hotspot hit by `ray` within the distance bound.
    ///
    /// Equal distances resolve to the earliest registered hotspot.
    pub fn hit_test(&self, ray: &Ray) -> Option<&Hotspot> {
        let mut best: Option<(f32, &Hotspot)> = None;
        for hotspot in &self.hotspots {
            let Some(t) = hotspot.intersect(ray) else {
                continue;
            };
            if t > self.max_distance {
                continue;
            }
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, hotspot));
            }
        }
        best.map(|(_, hotspot)| hotspot)
    }

    /// Billboard every marker towards `eye`
    pub fn face_towards(&mut self, eye: &Point3f) {
        for hotspot in &mut self.hotspots {
            hotspot.orientation = Transform3D::facing(&(eye - hotspot.anchor));
        }
    }
}

impl Default for HotspotRegistry {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn spot(id: u32, anchor: Point3f) -> Hotspot {
        Hotspot::new(HotspotId(id), anchor, Vec::new())
    }

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Point3f::new(x, y, 10.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_hit_returns_registered_hotspot() {
        let mut registry = HotspotRegistry::default();
        registry.register(spot(1, Point3f::new(0.0, 1.0, 0.0))).unwrap();

        let hit = registry.hit_test(&down_z(0.05, 1.05)).unwrap();
        assert_eq!(hit.id(), HotspotId(1));
        assert!(registry.hit_test(&down_z(2.0, 1.0)).is_none());
    }

    #[test]
    fn test_nearest_overlapping_hotspot_wins() {
        let mut registry = HotspotRegistry::default();
        registry.register(spot(1, Point3f::new(0.0, 0.0, -1.0))).unwrap();
        registry.register(spot(2, Point3f::new(0.0, 0.0, 2.0))).unwrap();

        assert_eq!(registry.hit_test(&down_z(0.02, 0.03)).unwrap().id(), HotspotId(2));
    }

    #[test]
    fn test_ties_break_by_registration_order() {
        let mut registry = HotspotRegistry::default();
        registry.register(spot(7, Point3f::new(0.0, 0.0, 0.0))).unwrap();
        registry.register(spot(3, Point3f::new(0.0, 0.0, 0.0))).unwrap();

        assert_eq!(registry.hit_test(&down_z(0.01, 0.01)).unwrap().id(), HotspotId(7));
    }

    #[test]
    fn test_hits_beyond_max_distance_are_ignored() {
        let mut registry = HotspotRegistry::new(5.0);
        registry.register(spot(1, Point3f::origin())).unwrap();
        assert!(registry.hit_test(&down_z(0.02, 0.03)).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut registry = HotspotRegistry::default();
        registry.register(spot(1, Point3f::origin())).unwrap();
        assert!(registry.register(spot(1, Point3f::new(1.0, 0.0, 0.0))).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let mut registry = HotspotRegistry::default();
        let hotspot = spot(1, Point3f::origin()).with_marker(TriangleMesh::new());
        assert!(registry.register(hotspot).is_err());
    }

    #[test]
    fn test_facing_rotates_without_translating() {
        let mut registry = HotspotRegistry::default();
        let anchor = Point3f::new(1.0, 2.0, 3.0);
        registry.register(spot(1, anchor)).unwrap();

        // Seen edge-on from +X the disc would be unpickable until it faces the eye
        let eye = Point3f::new(20.0, 2.0, 3.0);
        let ray = Ray::through(eye, anchor + Vector3::new(0.0, 0.05, 0.03));
        assert!(registry.hit_test(&ray).is_none());

        registry.face_towards(&eye);
        let hotspot = registry.get(HotspotId(1)).unwrap();
        assert_eq!(hotspot.anchor(), anchor);
        assert!(registry.hit_test(&ray).is_some());
    }
}
