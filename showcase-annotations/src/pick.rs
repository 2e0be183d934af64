//! Pointer picking

use log::debug;
use showcase_core::{Projector, Ray, Viewport};

use crate::hosts::Hosts;
use crate::record::HotspotId;
use crate::registry::HotspotRegistry;
use crate::sequencer::AnnotationSequencer;

/// A pointer press in pixels, origin at the top-left of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Result of a pick; a miss is a normal outcome, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Hit(HotspotId),
    NoHit,
}

/// Converts pointer input into hotspot activations
#[derive(Debug, Clone, Copy, Default)]
pub struct PickDispatcher;

impl PickDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// World-space ray under the pointer, if the viewport has an area
    pub fn pointer_ray(&self, pointer: PointerEvent, viewport: &Viewport, camera: &dyn Projector) -> Option<Ray> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        let ndc = viewport.to_ndc(pointer.x, pointer.y);
        Some(camera.raycast_from(ndc.x, ndc.y))
    }

    /// Hit-test the registry without side effects
    pub fn pick(
        &self,
        pointer: PointerEvent,
        viewport: &Viewport,
        camera: &dyn Projector,
        registry: &HotspotRegistry,
    ) -> PickOutcome {
        self.pointer_ray(pointer, viewport, camera)
            .and_then(|ray| registry.hit_test(&ray))
            .map_or(PickOutcome::NoHit, |hotspot| PickOutcome::Hit(hotspot.id()))
    }

    /// Pick under the pointer and activate the hit hotspot.
    ///
    /// Activating the hotspot that is already animating restarts its sequence.
    /// A miss leaves the live sequence untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn on_pointer_event(
        &self,
        pointer: PointerEvent,
        viewport: &Viewport,
        camera: &dyn Projector,
        registry: &HotspotRegistry,
        sequencer: &mut AnnotationSequencer,
        hosts: &mut Hosts<'_>,
    ) -> PickOutcome {
        let outcome = self.pick(pointer, viewport, camera, registry);
        if let PickOutcome::Hit(id) = outcome {
            if let Some(hotspot) = registry.get(id) {
                debug!("pointer at ({}, {}) hit {}", pointer.x, pointer.y, id);
                sequencer.activate(hotspot, hosts);
            }
        }
        outcome
    }
}
