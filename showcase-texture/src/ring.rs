//! Segmented ring texture synthesis

use std::f32::consts::{FRAC_PI_2, TAU};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use showcase_core::{Error, Result};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::mask::RingTexture;

/// Parameters of a segmented ring bitmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingTextureSpec {
    /// Edge length of the square bitmap in pixels
    pub size: u32,
    /// Number of arcs around the ring
    pub segments: u32,
    /// Radians removed from the end of every segment
    pub gap_angle: f32,
    /// Outer stroke radius as a fraction of `size`
    pub outer_radius_ratio: f32,
    /// Inner stroke radius as a fraction of `size`
    pub inner_radius_ratio: f32,
}

impl Default for RingTextureSpec {
    fn default() -> Self {
        Self {
            size: 1024,
            segments: 12,
            gap_angle: std::f32::consts::PI / 18.0,
            outer_radius_ratio: 0.15,
            inner_radius_ratio: 0.147,
        }
    }
}

impl RingTextureSpec {
    pub fn new(size: u32, segments: u32, gap_angle: f32) -> Self {
        Self {
            size,
            segments,
            gap_angle,
            ..Self::default()
        }
    }

    pub fn with_radii(mut self, inner_radius_ratio: f32, outer_radius_ratio: f32) -> Self {
        self.inner_radius_ratio = inner_radius_ratio;
        self.outer_radius_ratio = outer_radius_ratio;
        self
    }

    pub fn outer_radius(&self) -> f32 {
        self.size as f32 * self.outer_radius_ratio
    }

    pub fn inner_radius(&self) -> f32 {
        self.size as f32 * self.inner_radius_ratio
    }

    /// Radius of the circle the strokes are centered on
    pub fn center_radius(&self) -> f32 {
        (self.outer_radius() + self.inner_radius()) / 2.0
    }

    pub fn stroke_width(&self) -> f32 {
        self.outer_radius() - self.inner_radius()
    }

    /// Angular pitch of one segment including its gap
    pub fn segment_pitch(&self) -> f32 {
        TAU / self.segments as f32
    }

    /// Start and end angle of segment `i`
    pub fn segment_span(&self, i: u32) -> (f32, f32) {
        let start = i as f32 * self.segment_pitch();
        (start, start + self.segment_pitch() - self.gap_angle)
    }

    /// Check the parameters describe a drawable ring
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSpec("size must be positive".to_string()));
        }
        if self.segments == 0 {
            return Err(Error::InvalidSpec("segments must be at least 1".to_string()));
        }
        if !self.gap_angle.is_finite() || self.gap_angle < 0.0 {
            return Err(Error::InvalidSpec(format!(
                "gap angle must be a non-negative finite angle, got {}",
                self.gap_angle
            )));
        }
        if self.gap_angle >= self.segment_pitch() {
            return Err(Error::InvalidSpec(format!(
                "gap angle {} leaves nothing of a {}-segment ring",
                self.gap_angle, self.segments
            )));
        }
        let radii_ok = self.inner_radius_ratio > 0.0
            && self.outer_radius_ratio > self.inner_radius_ratio
            && self.outer_radius_ratio <= 0.5;
        if !radii_ok {
            return Err(Error::InvalidSpec(format!(
                "radius ratios must satisfy 0 < inner ({}) < outer ({}) <= 0.5",
                self.inner_radius_ratio, self.outer_radius_ratio
            )));
        }
        Ok(())
    }
}

/// Append a circular arc to `pb` as cubic beziers of at most a quarter turn each
fn push_arc(pb: &mut PathBuilder, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
    let sweep = end - start;
    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    pb.move_to(cx + radius * start.cos(), cy + radius * start.sin());
    for i in 0..pieces {
        let a = start + step * i as f32;
        let b = a + step;
        let (sa, ca) = a.sin_cos();
        let (sb, cb) = b.sin_cos();
        pb.cubic_to(
            cx + radius * (ca - k * sa),
            cy + radius * (sa + k * ca),
            cx + radius * (cb + k * sb),
            cy + radius * (sb - k * cb),
            cx + radius * cb,
            cy + radius * sb,
        );
    }
}

/// Rasterize the segmented ring described by `spec`.
///
/// Every segment is a white, round-capped stroke on a transparent background.
/// Identical specs always produce identical pixels.
pub fn synthesize(spec: &RingTextureSpec) -> Result<RingTexture> {
    spec.validate()?;

    let mut pixmap = Pixmap::new(spec.size, spec.size).ok_or_else(|| {
        Error::ResourceUnavailable(format!(
            "cannot allocate a {0}x{0} rasterization surface",
            spec.size
        ))
    })?;

    let center = spec.size as f32 / 2.0;
    let mut pb = PathBuilder::new();
    for i in 0..spec.segments {
        let (start, end) = spec.segment_span(i);
        push_arc(&mut pb, center, center, spec.center_radius(), start, end);
    }
    let path = pb
        .finish()
        .ok_or_else(|| Error::InvalidSpec("ring produced an empty path".to_string()))?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: spec.stroke_width(),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    debug!(
        "synthesized {}px ring texture with {} segments",
        spec.size, spec.segments
    );
    RingTexture::from_pixmap(&pixmap)
}

/// Synthesize a ring texture, logging and returning `None` on failure so the
/// caller can fall back to an untextured material
pub fn synthesize_or_warn(spec: &RingTextureSpec) -> Option<RingTexture> {
    match synthesize(spec) {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("ring texture unavailable, using untextured material: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_spec_is_valid() {
        let spec = RingTextureSpec::default();
        assert!(spec.validate().is_ok());
        assert_relative_eq!(spec.stroke_width(), 1024.0 * 0.003, epsilon = 1e-3);
        assert_relative_eq!(spec.center_radius(), 1024.0 * 0.1485, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_segments_is_invalid() {
        let spec = RingTextureSpec::new(256, 0, 0.1);
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
        assert!(matches!(synthesize(&spec), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn test_gap_swallowing_segment_is_invalid() {
        let spec = RingTextureSpec::new(256, 4, TAU / 4.0);
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn test_inverted_radii_are_invalid() {
        let spec = RingTextureSpec::new(256, 4, 0.1).with_radii(0.3, 0.2);
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn test_segment_spans_leave_gaps() {
        let spec = RingTextureSpec::new(512, 8, 0.2);
        let (s0, e0) = spec.segment_span(0);
        let (s1, _) = spec.segment_span(1);
        assert_relative_eq!(s0, 0.0);
        assert_relative_eq!(s1 - e0, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_oversized_surface_is_resource_unavailable() {
        let spec = RingTextureSpec::new(u32::MAX, 4, 0.1);
        assert!(matches!(synthesize(&spec), Err(Error::ResourceUnavailable(_))));
        assert!(synthesize_or_warn(&spec).is_none());
    }
}
