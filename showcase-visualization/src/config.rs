//! Viewer configuration loaded from JSON

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use showcase_annotations::{
    AnnotationRecord, Hotspot, HotspotId, HotspotRegistry, Layout, OverlayOffset, SequencerConfig,
    DEFAULT_MARKER_RADIUS,
};
use showcase_core::{Camera, Error, Point3f, Result, TriangleMesh, Viewport};
use showcase_texture::RingTextureSpec;

/// Segments of the disc drawn for each hotspot marker
const MARKER_SEGMENTS: usize = 24;

fn default_marker_radius() -> f32 {
    DEFAULT_MARKER_RADIUS
}

/// One hotspot and its annotation records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotConfig {
    pub id: HotspotId,
    pub anchor: Point3f,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,
    pub records: Vec<AnnotationRecord>,
}

impl HotspotConfig {
    pub fn new(id: u32, anchor: Point3f, records: Vec<AnnotationRecord>) -> Self {
        Self {
            id: HotspotId(id),
            anchor,
            layout: Layout::default(),
            marker_radius: DEFAULT_MARKER_RADIUS,
            records,
        }
    }

    pub fn to_hotspot(&self) -> Hotspot {
        Hotspot::new(self.id, self.anchor, self.records.clone())
            .with_marker(TriangleMesh::disc(self.marker_radius, MARKER_SEGMENTS))
            .with_layout(self.layout)
    }
}

/// Everything needed to set up a product viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub texture: RingTextureSpec,
    pub camera: Camera,
    pub viewport: Viewport,
    pub sequencer: SequencerConfig,
    pub overlay_offset: OverlayOffset,
    /// Hits farther than this along the pick ray are ignored
    pub pick_max_distance: f32,
    pub hotspots: Vec<HotspotConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            texture: RingTextureSpec::default(),
            camera: Camera::default(),
            viewport: Viewport::default(),
            sequencer: SequencerConfig::default(),
            overlay_offset: OverlayOffset::default(),
            pick_max_distance: 1000.0,
            hotspots: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Load and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(format!("malformed viewer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_hotspot(mut self, hotspot: HotspotConfig) -> Self {
        self.hotspots.push(hotspot);
        self
    }

    /// Reject configurations that cannot be set up.
    ///
    /// The ring texture is not checked here; a bad texture spec only costs the
    /// ground its mask.
    pub fn validate(&self) -> Result<()> {
        self.sequencer.validate()?;

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near ({}) < far ({})",
                camera.near, camera.far
            )));
        }
        if !(camera.fov > 0.0 && camera.fov < std::f32::consts::PI) {
            return Err(Error::Config(format!("camera fov {} is out of range", camera.fov)));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(Error::Config("viewport must have a positive size".to_string()));
        }
        if !(self.pick_max_distance.is_finite() && self.pick_max_distance > 0.0) {
            return Err(Error::Config("pick max distance must be positive".to_string()));
        }

        let mut seen = HashSet::new();
        for hotspot in &self.hotspots {
            if !seen.insert(hotspot.id) {
                return Err(Error::Config(format!("duplicate {}", hotspot.id)));
            }
            if !(hotspot.marker_radius.is_finite() && hotspot.marker_radius > 0.0) {
                return Err(Error::Config(format!("{} needs a positive marker radius", hotspot.id)));
            }
        }
        Ok(())
    }

    /// Build the pickable registry from the configured hotspots
    pub fn build_registry(&self) -> Result<HotspotRegistry> {
        let mut registry = HotspotRegistry::new(self.pick_max_distance);
        for hotspot in &self.hotspots {
            registry.register(hotspot.to_hotspot())?;
        }
        Ok(registry)
    }
}
