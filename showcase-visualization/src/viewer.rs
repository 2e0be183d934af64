//! Product viewer composition root
//!
//! [`ProductViewer`] owns the camera, the hotspot registry, the annotation
//! sequencer and the in-memory hosts it draws into, and wires them together
//! once per frame.

use std::time::Duration;

use log::{debug, info};
use showcase_annotations::{
    AnnotationSequencer, HotspotId, HotspotRegistry, Hosts, PickDispatcher, PickOutcome, PointerEvent,
    ProjectionSync, RevealState, SequencePhase, TimerHost, TimerQueue,
};
use showcase_core::{Camera, Projector, Result, Viewport};

use crate::config::ViewerConfig;
use crate::material::GroundMaterial;
use crate::overlay_layer::OverlayLayer;
use crate::scene::SceneGraph;

/// Interactive product showcase: hotspots, animated callouts and camera
pub struct ProductViewer {
    camera: Camera,
    /// Configured camera pose and limits, restored by `reset_camera`
    home: Camera,
    viewport: Viewport,
    registry: HotspotRegistry,
    sequencer: AnnotationSequencer,
    dispatcher: PickDispatcher,
    projection: ProjectionSync,
    scene: SceneGraph,
    overlays: OverlayLayer,
    timers: TimerQueue,
    ground: GroundMaterial,
    clock: Duration,
}

impl ProductViewer {
    /// Set up a viewer from a validated configuration
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.build_registry()?;
        let ground = GroundMaterial::with_ring_texture(&config.texture);

        let mut camera = config.camera.clone();
        camera.set_aspect_ratio(config.viewport.aspect_ratio());

        info!(
            "product viewer ready with {} hotspots (ground {})",
            registry.len(),
            if ground.is_textured() { "textured" } else { "untextured" }
        );

        Ok(Self {
            home: camera.clone(),
            camera,
            viewport: config.viewport,
            registry,
            sequencer: AnnotationSequencer::new(config.sequencer),
            dispatcher: PickDispatcher::new(),
            projection: ProjectionSync::new(config.overlay_offset),
            scene: SceneGraph::new(),
            overlays: OverlayLayer::new(),
            timers: TimerQueue::new(),
            ground,
            clock: Duration::ZERO,
        })
    }

    /// Replace the overlay layer, e.g. with one lacking a mount point
    pub fn with_overlay_layer(mut self, overlays: OverlayLayer) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Return to the configured view, keeping the current aspect ratio
    pub fn reset_camera(&mut self) {
        let aspect_ratio = self.camera.aspect_ratio;
        self.camera = self.home.clone();
        self.camera.set_aspect_ratio(aspect_ratio);
        debug!("camera reset to configured view");
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.registry
    }

    pub fn sequencer(&self) -> &AnnotationSequencer {
        &self.sequencer
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn overlays(&self) -> &OverlayLayer {
        &self.overlays
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn ground(&self) -> &GroundMaterial {
        &self.ground
    }

    /// Time accumulated from frame deltas
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Start the annotation sequence of a hotspot. Returns the new sequence
    /// generation, or `None` for an unknown id.
    pub fn activate(&mut self, id: HotspotId) -> Option<u64> {
        let hotspot = self.registry.get(id)?;
        let mut hosts = Hosts::new(&mut self.scene, &mut self.overlays, &mut self.timers);
        Some(self.sequencer.activate(hotspot, &mut hosts))
    }

    /// Remove every connector and callout
    pub fn clear(&mut self) {
        let mut hosts = Hosts::new(&mut self.scene, &mut self.overlays, &mut self.timers);
        self.sequencer.clear(&mut hosts);
    }

    /// Handle a pointer press at pixel `(x, y)`
    pub fn on_pointer_event(&mut self, x: f32, y: f32) -> PickOutcome {
        let mut hosts = Hosts::new(&mut self.scene, &mut self.overlays, &mut self.timers);
        self.dispatcher.on_pointer_event(
            PointerEvent::new(x, y),
            &self.viewport,
            &self.camera,
            &self.registry,
            &mut self.sequencer,
            &mut hosts,
        )
    }

    /// Advance one frame: face markers to the camera, deliver due reveal
    /// ticks, grow connectors and re-project callouts
    pub fn tick(&mut self, frame_delta: Duration) {
        self.clock += frame_delta;
        self.registry.face_towards(&self.camera.eye());

        let due = self.timers.advance_to(self.clock);
        let mut hosts = Hosts::new(&mut self.scene, &mut self.overlays, &mut self.timers);
        for tick in due {
            self.sequencer.on_reveal_tick(tick, &mut hosts);
        }
        self.sequencer.tick(frame_delta, &mut hosts);

        self.projection
            .sync(&self.sequencer, &self.camera, &self.viewport, &mut self.overlays);
    }

    /// Track a new drawing surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect_ratio(self.viewport.aspect_ratio());
        debug!("viewport resized to {}x{}", width, height);
    }

    /// How long the window may sleep before the next frame is needed: zero
    /// while connectors grow, the next reveal deadline while text reveals,
    /// and `None` once everything has settled
    pub fn next_frame_in(&self) -> Option<Duration> {
        match self.sequencer.phase() {
            SequencePhase::Growing => Some(Duration::ZERO),
            _ => self.next_timer_in(),
        }
    }

    /// Time until the next reveal timer fires, if any is scheduled
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.sequencer
            .overlays()
            .iter()
            .filter_map(|o| match o.state() {
                RevealState::Revealing { timer } => self.timers.next_fire(timer),
                _ => None,
            })
            .min()
            .map(|at| at.saturating_sub(self.timers.now()))
    }
}
