//! Product Viewer Demo
//!
//! Opens an interactive window with clickable hotspots. Without `--config` a
//! sample product with one five-callout hotspot is shown.
//!
//! Controls:
//! - Click a hotspot marker to grow its callouts
//! - Drag to orbit, scroll to zoom
//! - Escape clears the callouts, R resets the camera

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use showcase_annotations::{AnnotationRecord, Layout, TargetOffset};
use showcase_core::Point3f;
use showcase_visualization::{HotspotConfig, InteractiveViewer, ProductViewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "product-viewer")]
#[command(about = "Interactive product showcase with animated hotspot callouts")]
struct Cli {
    /// JSON viewer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show the sample hotspot's records as a stacked panel
    #[arg(long)]
    panel: bool,
}

fn sample_config(layout: Layout) -> ViewerConfig {
    let records = vec![
        AnnotationRecord::new("Display", "6.1\" OLED panel with 120 Hz refresh", TargetOffset::polar(-30.0, 3.0, 0.5))
            .with_highlight("OLED"),
        AnnotationRecord::new("Chassis", "Aerospace-grade aluminium frame", TargetOffset::polar(-60.0, 3.0, 0.5)),
        AnnotationRecord::new("Camera", "48 MP main sensor with optical stabilisation", TargetOffset::polar(-90.0, 3.0, 0.5))
            .with_highlight("48 MP"),
        AnnotationRecord::new("Battery", "All-day battery with fast charging", TargetOffset::polar(-120.0, 3.0, 0.5)),
        AnnotationRecord::new("Port", "USB-C with 10 Gb/s transfer", TargetOffset::polar(-150.0, 3.0, 0.5)),
    ];

    let mut hotspot = HotspotConfig::new(1, Point3f::new(0.0, 1.0, 0.0), records);
    hotspot.layout = layout;
    ViewerConfig::default().with_hotspot(hotspot)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewerConfig::from_path(path)
            .with_context(|| format!("loading viewer config {}", path.display()))?,
        None => {
            let layout = if cli.panel { Layout::StackedPanel } else { Layout::Connectors };
            sample_config(layout)
        }
    };

    let viewer = ProductViewer::new(config).context("setting up product viewer")?;
    info!("click a hotspot marker to show its callouts; Escape clears, R resets the camera");

    InteractiveViewer::new(viewer).run()?;
    Ok(())
}
