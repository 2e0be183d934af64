//! Growing connector lines

use std::time::Duration;

use showcase_core::{lerp_point, LineVertex, Point3f};

use crate::hosts::{SceneHost, VisualId};

/// A polyline from a hotspot anchor to a precomputed endpoint, parameterized
/// by arc length
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    waypoints: Vec<Point3f>,
    /// Cumulative length at each waypoint
    distances: Vec<f32>,
}

impl ConnectorPath {
    /// Build a path through `waypoints`; the first waypoint is the anchor
    pub fn new(waypoints: Vec<Point3f>) -> Self {
        let mut distances = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        for (i, p) in waypoints.iter().enumerate() {
            if i > 0 {
                total += (p - waypoints[i - 1]).norm();
            }
            distances.push(total);
        }
        Self {
            waypoints,
            distances,
        }
    }

    pub fn anchor(&self) -> Point3f {
        self.waypoints.first().copied().unwrap_or_else(Point3f::origin)
    }

    pub fn endpoint(&self) -> Point3f {
        self.waypoints.last().copied().unwrap_or_else(Point3f::origin)
    }

    pub fn length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Point reached after covering fraction `t` of the path
    pub fn point_at(&self, t: f32) -> Point3f {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.endpoint();
        }
        let target = t * self.length();
        for i in 1..self.waypoints.len() {
            let (d0, d1) = (self.distances[i - 1], self.distances[i]);
            if target <= d1 {
                let leg = d1 - d0;
                let local = if leg > 0.0 { (target - d0) / leg } else { 1.0 };
                return lerp_point(&self.waypoints[i - 1], &self.waypoints[i], local);
            }
        }
        self.endpoint()
    }

    /// The drawn part of the path at fraction `t`: the anchor, every waypoint
    /// already passed, and the current terminal point
    pub fn polyline_at(&self, t: f32) -> Vec<Point3f> {
        let t = t.clamp(0.0, 1.0);
        let covered = t * self.length();
        let mut points = vec![self.anchor()];
        for i in 1..self.waypoints.len() {
            if self.distances[i] < covered {
                points.push(self.waypoints[i]);
            }
        }
        if covered > 0.0 {
            let terminal = self.point_at(t);
            if points.last().map_or(true, |last| *last != terminal) {
                points.push(terminal);
            }
        }
        points
    }
}

/// A connector owned by a live annotation sequence
#[derive(Debug, Clone)]
pub struct LiveConnector {
    generation: u64,
    record: usize,
    path: ConnectorPath,
    /// Zero means the connector completes on its first tick
    duration: Duration,
    elapsed: Duration,
    progress: f32,
    visual: Option<VisualId>,
}

impl LiveConnector {
    /// `duration_secs` is the growth time; non-positive means instantaneous
    pub fn new(generation: u64, record: usize, path: ConnectorPath, duration_secs: f32) -> Self {
        Self {
            generation,
            record,
            path,
            duration: growth_duration(duration_secs),
            elapsed: Duration::ZERO,
            progress: 0.0,
            visual: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the record this connector belongs to
    pub fn record(&self) -> usize {
        self.record
    }

    pub fn path(&self) -> &ConnectorPath {
        &self.path
    }

    /// Growth ratio in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn visual(&self) -> Option<VisualId> {
        self.visual
    }

    /// Current end of the drawn line
    pub fn terminal(&self) -> Point3f {
        self.path.point_at(self.progress)
    }

    /// Advance growth by `frame_delta` and re-submit the line when it changed.
    /// Returns true on the tick that completes the connector.
    pub fn advance(&mut self, frame_delta: Duration, color: [f32; 3], scene: &mut dyn SceneHost) -> bool {
        if self.is_complete() {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(frame_delta);
        self.progress = if self.elapsed >= self.duration {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
        };

        let points = self.path.polyline_at(self.progress);
        if points.len() >= 2 {
            if let Some(old) = self.visual.take() {
                scene.remove(old);
            }
            let vertices: Vec<LineVertex> = points.iter().map(|p| LineVertex::new(p, color)).collect();
            self.visual = Some(scene.submit_line(&vertices));
        }

        self.is_complete()
    }

    /// Remove the line from the scene
    pub fn retire(&mut self, scene: &mut dyn SceneHost) {
        if let Some(visual) = self.visual.take() {
            scene.remove(visual);
        }
    }
}

/// Growth time in whole microseconds, so a configured `0.8` is exactly 800 ms
fn growth_duration(secs: f32) -> Duration {
    if secs > 0.0 {
        Duration::from_micros((f64::from(secs) * 1e6).round() as u64)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct CountingScene {
        next: u64,
        live: Vec<VisualId>,
        submissions: usize,
    }

    impl SceneHost for CountingScene {
        fn submit_line(&mut self, _vertices: &[LineVertex]) -> VisualId {
            self.next += 1;
            self.submissions += 1;
            let id = VisualId(self.next);
            self.live.push(id);
            id
        }

        fn remove(&mut self, visual: VisualId) {
            self.live.retain(|v| *v != visual);
        }
    }

    fn leader() -> ConnectorPath {
        ConnectorPath::new(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(3.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_path_endpoints() {
        let path = leader();
        assert_relative_eq!(path.length(), 4.0);
        assert_eq!(path.point_at(0.0), path.anchor());
        assert_eq!(path.point_at(1.0), path.endpoint());
    }

    #[test]
    fn test_point_at_follows_arc_length() {
        let path = leader();
        assert_relative_eq!(path.point_at(0.125), Point3f::new(0.0, 0.5, 0.0), epsilon = 1e-6);
        assert_relative_eq!(path.point_at(0.5), Point3f::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_polyline_includes_passed_waypoints() {
        let path = leader();
        assert_eq!(path.polyline_at(0.0).len(), 1);
        assert_eq!(path.polyline_at(0.1).len(), 2);
        assert_eq!(path.polyline_at(0.5).len(), 3);
        assert_eq!(path.polyline_at(1.0).len(), 3);
    }

    #[test]
    fn test_connector_grows_with_elapsed_time() {
        let mut scene = CountingScene::default();
        let mut connector = LiveConnector::new(1, 0, leader(), 0.8);
        assert_eq!(connector.terminal(), connector.path().anchor());

        assert!(!connector.advance(Duration::from_millis(400), [1.0; 3], &mut scene));
        assert_relative_eq!(connector.progress(), 0.5);
        assert!(connector.advance(Duration::from_millis(400), [1.0; 3], &mut scene));
        assert_eq!(connector.terminal(), connector.path().endpoint());

        // Frozen once complete
        assert!(!connector.advance(Duration::from_millis(400), [1.0; 3], &mut scene));
        assert_eq!(scene.submissions, 2);
        assert_eq!(scene.live.len(), 1);
    }

    #[test]
    fn test_non_positive_duration_completes_on_next_tick() {
        let mut scene = CountingScene::default();
        for duration in [0.0, -1.0] {
            let mut connector = LiveConnector::new(1, 0, leader(), duration);
            assert_relative_eq!(connector.progress(), 0.0);
            assert!(connector.advance(Duration::ZERO, [1.0; 3], &mut scene));
            assert_eq!(connector.terminal(), connector.path().endpoint());
        }
    }

    #[test]
    fn test_retire_removes_visual() {
        let mut scene = CountingScene::default();
        let mut connector = LiveConnector::new(1, 0, leader(), 1.0);
        connector.advance(Duration::from_millis(500), [1.0; 3], &mut scene);
        connector.retire(&mut scene);
        assert!(scene.live.is_empty());
        assert!(connector.visual().is_none());
    }

    #[test]
    fn test_completes_exactly_at_duration_with_uneven_frames() {
        let mut scene = CountingScene::default();
        let mut connector = LiveConnector::new(1, 0, leader(), 0.8);
        let frame = Duration::from_nanos(16_666_667);

        for _ in 0..47 {
            assert!(!connector.advance(frame, [1.0; 3], &mut scene));
        }
        assert!(connector.progress() < 1.0);
        assert!(connector.advance(frame, [1.0; 3], &mut scene));
        assert!(connector.is_complete());
        assert_eq!(connector.terminal(), connector.path().endpoint());
    }

    #[test]
    fn test_growth_duration_rounds_to_microseconds() {
        assert_eq!(growth_duration(0.8), Duration::from_millis(800));
        assert_eq!(growth_duration(0.0), Duration::ZERO);
        assert_eq!(growth_duration(-2.0), Duration::ZERO);
    }
}
