//! Integration tests for showcase-visualization
//!
//! These tests drive a full `ProductViewer` frame by frame, the way the
//! interactive window does, without opening a window.

use std::time::Duration;

use showcase_annotations::{AnnotationRecord, HotspotId, Layout, PickOutcome, SequencePhase, TargetOffset};
use showcase_core::{Point3f, Projector};
use showcase_visualization::*;

const FRAME: Duration = Duration::from_millis(16);

fn product_records() -> Vec<AnnotationRecord> {
    [-30.0, -60.0, -90.0, -120.0, -150.0]
        .iter()
        .enumerate()
        .map(|(i, angle)| {
            AnnotationRecord::new(format!("Part {}", i), "Machined aluminium", TargetOffset::polar(*angle, 3.0, 0.5))
                .with_highlight(format!("0{}", i + 1))
        })
        .collect()
}

fn viewer_config() -> ViewerConfig {
    let mut config = ViewerConfig::default()
        .with_hotspot(HotspotConfig::new(1, Point3f::new(0.0, 1.0, 0.0), product_records()));
    config.texture.size = 128;
    config
}

fn run_frames(viewer: &mut ProductViewer, count: usize) {
    for _ in 0..count {
        viewer.tick(FRAME);
    }
}

/// Pixel just off the centre of a hotspot marker
fn pointer_on(viewer: &ProductViewer, anchor: Point3f) -> (f32, f32) {
    let ndc = viewer.camera().project_to_ndc(&anchor).expect("anchor in front of camera");
    let screen = viewer.viewport().to_screen(&ndc);
    (screen.x + 2.0, screen.y + 2.0)
}

#[test]
fn test_click_grows_connectors_and_reveals_callouts() {
    let mut viewer = ProductViewer::new(viewer_config()).expect("valid config");
    assert!(viewer.ground().is_textured());
    viewer.tick(FRAME);

    let (x, y) = pointer_on(&viewer, Point3f::new(0.0, 1.0, 0.0));
    assert_eq!(viewer.on_pointer_event(x, y), PickOutcome::Hit(HotspotId(1)));
    assert_eq!(viewer.sequencer().phase(), SequencePhase::Growing);

    // About one second: connectors finish after 0.8 s
    run_frames(&mut viewer, 60);
    assert_eq!(viewer.scene().line_count(), 5);
    assert_eq!(viewer.overlays().len(), 5);
    for (_, element) in viewer.overlays().elements() {
        assert!(element.placement.visible);
        assert!(element.highlight.is_some());
    }

    // "Machined aluminium" needs 18 reveal ticks of 30 ms
    run_frames(&mut viewer, 60);
    assert_eq!(viewer.sequencer().phase(), SequencePhase::Settled);
    for (_, element) in viewer.overlays().elements() {
        assert_eq!(element.body, "Machined aluminium");
    }
    assert_eq!(viewer.timers().active_count(), 0);
}

#[test]
fn test_connectors_finish_after_growth_duration_at_sixty_fps() {
    let mut viewer = ProductViewer::new(viewer_config()).expect("valid config");
    viewer.activate(HotspotId(1)).expect("registered");

    let frame = Duration::from_nanos(16_666_667);
    for _ in 0..48 {
        viewer.tick(frame);
    }

    assert!(viewer.now() >= Duration::from_millis(800));
    assert_eq!(viewer.sequencer().connectors().len(), 5);
    assert!(viewer.sequencer().connectors().iter().all(|c| c.is_complete()));
    assert_eq!(viewer.overlays().len(), 5);
    assert_eq!(viewer.sequencer().phase(), SequencePhase::Revealing);
}

#[test]
fn test_camera_reset_keeps_configured_limits() {
    let mut config = viewer_config();
    config.camera.limits.min_distance = 6.0;
    config.camera.limits.max_distance = 10.0;
    let mut viewer = ProductViewer::new(ViewerConfig::from_json(&config.to_json().expect("serializes")).expect("parses"))
        .expect("valid config");

    viewer.camera_mut().orbit(1.0, 0.3);
    viewer.reset_camera();
    assert_eq!(viewer.camera().position, config.camera.position);

    viewer.camera_mut().zoom(0.9);
    let distance = (viewer.camera().position - viewer.camera().target).norm();
    assert!(distance >= 6.0 - 1e-4);
}

#[test]
fn test_clear_removes_all_visuals() {
    let mut viewer = ProductViewer::new(viewer_config()).expect("valid config");
    viewer.activate(HotspotId(1)).expect("registered");
    run_frames(&mut viewer, 60);
    assert!(!viewer.scene().is_empty());

    viewer.clear();
    assert!(viewer.scene().is_empty());
    assert!(viewer.overlays().is_empty());
    assert_eq!(viewer.timers().active_count(), 0);
    assert_eq!(viewer.sequencer().phase(), SequencePhase::Idle);

    // Nothing comes back on later frames
    run_frames(&mut viewer, 30);
    assert!(viewer.scene().is_empty());
    assert!(viewer.overlays().is_empty());
}

#[test]
fn test_missed_click_keeps_current_sequence() {
    let mut viewer = ProductViewer::new(viewer_config()).expect("valid config");
    let generation = viewer.activate(HotspotId(1)).expect("registered");
    run_frames(&mut viewer, 10);

    assert_eq!(viewer.on_pointer_event(1.0, 1.0), PickOutcome::NoHit);
    assert_eq!(viewer.sequencer().generation(), generation);
    assert_eq!(viewer.sequencer().active_hotspot(), Some(HotspotId(1)));
}

#[test]
fn test_missing_overlay_root_degrades_gracefully() {
    let mut viewer = ProductViewer::new(viewer_config())
        .expect("valid config")
        .with_overlay_layer(OverlayLayer::detached());
    viewer.activate(HotspotId(1)).expect("registered");
    run_frames(&mut viewer, 120);

    assert_eq!(viewer.scene().line_count(), 5);
    assert!(viewer.overlays().is_empty());
    assert!(viewer.sequencer().connectors().iter().all(|c| c.is_complete()));
}

#[test]
fn test_bad_texture_spec_leaves_ground_untextured() {
    let mut config = viewer_config();
    config.texture.segments = 0;
    let viewer = ProductViewer::new(config).expect("texture failure is not fatal");
    assert!(!viewer.ground().is_textured());
    assert_eq!(viewer.registry().len(), 1);
}

#[test]
fn test_markers_face_the_camera_after_tick() {
    let mut viewer = ProductViewer::new(viewer_config()).expect("valid config");
    viewer.tick(FRAME);

    let hotspot = viewer.registry().get(HotspotId(1)).expect("registered");
    let normal = hotspot.orientation() * showcase_core::Vector3f::z();
    let to_eye = (viewer.camera().eye() - hotspot.anchor()).normalize();
    assert!(normal.dot(&to_eye) > 0.999);
}

#[test]
fn test_stacked_panel_stays_fixed_while_camera_orbits() {
    let mut config = viewer_config();
    config.hotspots[0].layout = Layout::StackedPanel;
    let mut viewer = ProductViewer::new(config).expect("valid config");
    viewer.activate(HotspotId(1)).expect("registered");
    viewer.tick(FRAME);

    let before: Vec<(f32, f32)> = viewer
        .overlays()
        .elements()
        .map(|(_, e)| (e.placement.x, e.placement.y))
        .collect();
    viewer.camera_mut().orbit(0.4, 0.1);
    run_frames(&mut viewer, 5);
    let after: Vec<(f32, f32)> = viewer
        .overlays()
        .elements()
        .map(|(_, e)| (e.placement.x, e.placement.y))
        .collect();

    assert_eq!(before.len(), 5);
    assert_eq!(before, after);
    assert!(viewer.scene().is_empty());
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("showcase-viewer-{}.json", std::process::id()));
    let config = viewer_config();
    std::fs::write(&path, config.to_json().expect("serializes")).expect("temp file writable");

    let loaded = ViewerConfig::from_path(&path).expect("loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.hotspots, config.hotspots);
    assert_eq!(loaded.texture, config.texture);
    assert!(ProductViewer::new(loaded).is_ok());
}
