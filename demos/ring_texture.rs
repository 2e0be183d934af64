//! Ring Texture Demo
//!
//! Synthesizes the segmented ring mask used by the ground material and writes
//! it as a grayscale PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use showcase_texture::{synthesize, RingTextureSpec};

#[derive(Parser, Debug)]
#[command(name = "ring-texture")]
#[command(about = "Write a segmented ring transparency mask as PNG")]
struct Cli {
    /// Edge length of the square bitmap in pixels
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// Number of arcs around the ring
    #[arg(long, default_value_t = 12)]
    segments: u32,

    /// Gap between arcs in degrees
    #[arg(long, default_value_t = 10.0)]
    gap_degrees: f32,

    /// Output PNG path
    #[arg(long, default_value = "ring.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let spec = RingTextureSpec::new(cli.size, cli.segments, cli.gap_degrees.to_radians());
    let texture = synthesize(&spec).context("synthesizing ring texture")?;
    texture
        .save_png(&cli.out)
        .with_context(|| format!("writing {}", cli.out.display()))?;

    info!(
        "wrote {}x{} ring with {} segments to {}",
        texture.size(),
        texture.size(),
        spec.segments,
        cli.out.display()
    );
    Ok(())
}
