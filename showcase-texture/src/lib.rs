//! Procedural textures for the product viewer
//!
//! The ground plane uses a segmented ring rasterized once at startup as its
//! transparency mask:
//! - [`RingTextureSpec`] describes the ring and validates itself
//! - [`synthesize`] rasterizes it deterministically into a [`RingTexture`]

pub mod ring;
pub mod mask;

pub use ring::*;
pub use mask::*;
