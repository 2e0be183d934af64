//! Per-frame projection of overlays onto the screen

use log::trace;
use showcase_core::{Projector, Viewport};

use crate::hosts::{OverlayHost, OverlayOffset, ScreenPlacement};
use crate::sequencer::AnnotationSequencer;

/// Keeps connector-bound overlays glued to their 3D anchor points
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionSync {
    offset: OverlayOffset,
}

impl ProjectionSync {
    pub fn new(offset: OverlayOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> OverlayOffset {
        self.offset
    }

    /// Screen placement of a world point, hidden when it is behind the eye
    pub fn place(&self, point: &showcase_core::Point3f, camera: &dyn Projector, viewport: &Viewport) -> ScreenPlacement {
        match camera.project_to_ndc(point) {
            Some(ndc) => {
                let screen = viewport.to_screen(&ndc);
                ScreenPlacement::at(screen.x, screen.y, self.offset)
            }
            None => ScreenPlacement::hidden(),
        }
    }

    /// Re-position every mounted overlay that follows a connector.
    ///
    /// Overlays with a fixed anchor are left alone. Returns the number of
    /// overlays updated.
    pub fn sync(
        &self,
        sequencer: &AnnotationSequencer,
        camera: &dyn Projector,
        viewport: &Viewport,
        overlays: &mut dyn OverlayHost,
    ) -> usize {
        let connectors = sequencer.connectors();
        let mut updated = 0;

        for overlay in sequencer.overlays() {
            let (Some(element), Some(index)) = (overlay.element(), overlay.connector()) else {
                continue;
            };
            let Some(connector) = connectors.get(index) else {
                continue;
            };

            let placement = self.place(&connector.terminal(), camera, viewport);
            overlays.set_placement(element, placement);
            updated += 1;
        }

        trace!("projected {} overlays", updated);
        updated
    }
}
