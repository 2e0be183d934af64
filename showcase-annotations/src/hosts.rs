//! Seams to the scene graph and overlay layer
//!
//! The annotation engine never owns render objects or UI elements. It asks a
//! [`SceneHost`] to draw connector lines and an [`OverlayHost`] to mount text
//! callouts, and keeps only the returned handles.

use serde::{Deserialize, Serialize};
use showcase_core::{LineVertex, Result};

use crate::timers::TimerHost;

/// Handle of a line object added to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u64);

/// Handle of a mounted overlay element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Scene graph operations needed for connector lines
pub trait SceneHost {
    /// Add a polyline to the scene
    fn submit_line(&mut self, vertices: &[LineVertex]) -> VisualId;

    /// Remove a previously submitted line
    fn remove(&mut self, visual: VisualId);
}

/// A length along one screen axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Absolute pixels
    Px(f32),
    /// Percentage of the element's own extent on that axis
    Percent(f32),
}

impl Length {
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            Length::Px(px) => px,
            Length::Percent(pct) => extent * pct / 100.0,
        }
    }
}

/// Readability offset applied on top of an overlay's projected anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayOffset {
    pub x: Length,
    pub y: Length,
}

impl OverlayOffset {
    /// Pixel offset for an element of the given size
    pub fn resolve(&self, width: f32, height: f32) -> (f32, f32) {
        (self.x.resolve(width), self.y.resolve(height))
    }
}

impl Default for OverlayOffset {
    fn default() -> Self {
        Self {
            x: Length::Px(20.0),
            y: Length::Percent(-50.0),
        }
    }
}

/// Screen position of an overlay element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPlacement {
    pub x: f32,
    pub y: f32,
    pub offset: OverlayOffset,
    /// False while the anchor is behind the camera
    pub visible: bool,
}

impl ScreenPlacement {
    pub fn at(x: f32, y: f32, offset: OverlayOffset) -> Self {
        Self {
            x,
            y,
            offset,
            visible: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            offset: OverlayOffset::default(),
            visible: false,
        }
    }
}

/// Content of a text callout at mount time
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayElement {
    pub title: String,
    pub highlight: Option<String>,
    /// Body text revealed so far
    pub body: String,
    pub placement: ScreenPlacement,
}

/// The document (or equivalent UI tree) overlays are mounted into
pub trait OverlayHost {
    /// Insert an element; fails with `ResourceUnavailable` when there is no
    /// mount point
    fn mount(&mut self, element: OverlayElement) -> Result<OverlayId>;

    fn unmount(&mut self, overlay: OverlayId);

    fn set_placement(&mut self, overlay: OverlayId, placement: ScreenPlacement);

    /// Replace the visible body text
    fn set_body(&mut self, overlay: OverlayId, revealed: &str);
}

/// The collaborators a sequencer mutates while running
pub struct Hosts<'a> {
    pub scene: &'a mut dyn SceneHost,
    pub overlays: &'a mut dyn OverlayHost,
    pub timers: &'a mut dyn TimerHost,
}

impl<'a> Hosts<'a> {
    pub fn new(
        scene: &'a mut dyn SceneHost,
        overlays: &'a mut dyn OverlayHost,
        timers: &'a mut dyn TimerHost,
    ) -> Self {
        Self {
            scene,
            overlays,
            timers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset_resolves_against_element_height() {
        let (dx, dy) = OverlayOffset::default().resolve(200.0, 80.0);
        assert_eq!(dx, 20.0);
        assert_eq!(dy, -40.0);
    }
}
