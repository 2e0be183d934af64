//! Ground material with an optional ring transparency mask

use showcase_texture::{synthesize_or_warn, RingTexture, RingTextureSpec};

/// Surface the product stands on
#[derive(Debug, Clone)]
pub struct GroundMaterial {
    pub color: [f32; 3],
    /// Alpha mask; `None` renders the ground fully opaque
    pub alpha_mask: Option<RingTexture>,
}

impl GroundMaterial {
    pub fn untextured() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            alpha_mask: None,
        }
    }

    /// Ground masked by a synthesized ring. Falls back to an untextured
    /// material when the texture cannot be built.
    pub fn with_ring_texture(spec: &RingTextureSpec) -> Self {
        Self {
            alpha_mask: synthesize_or_warn(spec),
            ..Self::untextured()
        }
    }

    pub fn is_textured(&self) -> bool {
        self.alpha_mask.is_some()
    }

    /// Opacity at a texel, 1.0 when untextured
    pub fn opacity(&self, x: u32, y: u32) -> f32 {
        match &self.alpha_mask {
            Some(mask) if x < mask.size() && y < mask.size() => mask.coverage(x, y) as f32 / 255.0,
            Some(_) => 0.0,
            None => 1.0,
        }
    }
}

impl Default for GroundMaterial {
    fn default() -> Self {
        Self::untextured()
    }
}
