//! Product viewer built on the showcase annotation engine
//!
//! This crate wires the engine to concrete collaborators:
//! - [`ProductViewer`], the composition root driven once per frame
//! - [`SceneGraph`] and [`OverlayLayer`], in-memory scene and callout hosts
//! - [`ViewerConfig`], JSON configuration with product defaults
//! - [`GroundMaterial`], the ring-masked ground surface
//! - [`InteractiveViewer`], a winit window with pick, orbit and zoom controls

pub mod config;
pub mod material;
pub mod scene;
pub mod overlay_layer;
pub mod viewer;
pub mod interactive_viewer;

pub use config::*;
pub use material::*;
pub use scene::*;
pub use overlay_layer::*;
pub use viewer::*;
pub use interactive_viewer::*;
