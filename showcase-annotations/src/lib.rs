//! # Showcase Annotations
//!
//! The annotation engine of the product viewer: clickable hotspots that grow
//! connector lines outward and reveal text callouts kept glued to their 3D
//! anchors.
//!
//! - [`HotspotRegistry`] holds the interactive anchors and hit-tests rays
//! - [`PickDispatcher`] turns pointer input into hotspot activations
//! - [`AnnotationSequencer`] owns the single live sequence and its generation
//! - [`ProjectionSync`] re-projects overlays every frame
//!
//! Rendering, DOM and timers are reached through the host traits in [`hosts`]
//! and [`timers`], so the engine itself never blocks and holds no globals.

pub mod record;
pub mod hosts;
pub mod timers;
pub mod registry;
pub mod pick;
pub mod connector;
pub mod overlay;
pub mod sequencer;
pub mod projection;

pub use record::*;
pub use hosts::*;
pub use timers::*;
pub use registry::*;
pub use pick::*;
pub use connector::*;
pub use overlay::*;
pub use sequencer::*;
pub use projection::*;
