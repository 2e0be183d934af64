//! Alpha mask output of texture synthesis

use std::path::Path;

use image::{GrayImage, Rgba, RgbaImage};
use rayon::prelude::*;
use showcase_core::{Error, Result};
use tiny_skia::Pixmap;

/// A single-channel coverage mask, ready to be bound as a material's alpha map
#[derive(Debug, Clone, PartialEq)]
pub struct RingTexture {
    mask: GrayImage,
}

impl RingTexture {
    /// Extract the coverage channel of a rasterized pixmap
    pub(crate) fn from_pixmap(pixmap: &Pixmap) -> Result<Self> {
        let alpha: Vec<u8> = pixmap
            .data()
            .par_chunks_exact(4)
            .map(|px| px[3])
            .collect();

        let mask = GrayImage::from_raw(pixmap.width(), pixmap.height(), alpha).ok_or_else(|| {
            Error::ResourceUnavailable("mask buffer does not match surface size".to_string())
        })?;
        Ok(Self { mask })
    }

    pub fn size(&self) -> u32 {
        self.mask.width()
    }

    /// Coverage at a pixel, 0 outside the ring strokes
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.mask.get_pixel(x, y)[0]
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.mask
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mask.as_raw()
    }

    /// Expand to RGBA with a uniform color and the mask as alpha
    pub fn to_rgba(&self, color: [u8; 3]) -> RgbaImage {
        RgbaImage::from_fn(self.mask.width(), self.mask.height(), |x, y| {
            let a = self.mask.get_pixel(x, y)[0];
            Rgba([color[0], color[1], color[2], a])
        })
    }

    /// Write the mask as a grayscale PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.mask
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| match e {
                image::ImageError::IoError(io) => Error::Io(io),
                other => Error::Visualization(other.to_string()),
            })
    }
}
