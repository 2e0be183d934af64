//! Viewport and screen/NDC conversions

use crate::point::Point2f;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Convert a pixel position (origin top-left, y down) to normalized device coordinates
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> Point2f {
        Point2f::new(
            (screen_x / self.width) * 2.0 - 1.0,
            -(screen_y / self.height) * 2.0 + 1.0,
        )
    }

    /// Convert normalized device coordinates back to a pixel position
    pub fn to_screen(&self, ndc: &Point2f) -> Point2f {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Point2f::new(ndc.x * half_w + half_w, -(ndc.y * half_h) + half_h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corners_map_to_ndc_extremes() {
        let vp = Viewport::new(800.0, 600.0);
        assert_relative_eq!(vp.to_ndc(0.0, 0.0), Point2f::new(-1.0, 1.0));
        assert_relative_eq!(vp.to_ndc(800.0, 600.0), Point2f::new(1.0, -1.0));
        assert_relative_eq!(vp.to_ndc(400.0, 300.0), Point2f::new(0.0, 0.0));
    }

    #[test]
    fn test_screen_round_trip() {
        let vp = Viewport::new(1920.0, 1080.0);
        let ndc = vp.to_ndc(123.0, 456.0);
        assert_relative_eq!(vp.to_screen(&ndc), Point2f::new(123.0, 456.0), epsilon = 1e-3);
    }
}
