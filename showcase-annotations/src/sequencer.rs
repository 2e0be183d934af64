//! The annotation sequencer state machine
//!
//! At most one [`AnnotationSequence`] is live. Activating a hotspot bumps the
//! sequence generation, retires every visual of the previous sequence, and
//! spawns the new one. Connector growth is advanced by [`AnnotationSequencer::tick`]
//! from the render loop; text reveal is driven by wall-clock [`RevealTick`]s
//! delivered to [`AnnotationSequencer::on_reveal_tick`].

use std::time::Duration;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use showcase_core::{Error, Result};

use crate::connector::{ConnectorPath, LiveConnector};
use crate::hosts::{Hosts, Length, OverlayElement, OverlayHost, OverlayOffset, ScreenPlacement};
use crate::overlay::{LiveOverlay, OverlayAnchor, RevealState};
use crate::record::{HotspotId, Layout};
use crate::registry::Hotspot;
use crate::timers::{RevealTick, TimerHost};

/// Longest accepted reveal or stagger interval
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Fixed screen placement of stacked-panel overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPlacement {
    /// Top-left of the first row, in pixels
    pub origin: [f32; 2],
    /// Vertical distance between rows, in pixels
    pub row_spacing: f32,
}

impl Default for PanelPlacement {
    fn default() -> Self {
        Self {
            origin: [40.0, 40.0],
            row_spacing: 96.0,
        }
    }
}

/// Timing and styling of annotation sequences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Seconds a connector takes to reach its endpoint
    pub growth_duration_secs: f32,
    /// Wall-clock time between revealed characters
    pub reveal_interval_ms: u64,
    /// Delay between consecutive records of a stacked panel
    pub stagger_interval_ms: u64,
    pub line_color: [f32; 3],
    pub panel: PanelPlacement,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            growth_duration_secs: 0.8,
            reveal_interval_ms: 30,
            stagger_interval_ms: 200,
            line_color: [1.0, 1.0, 1.0],
            panel: PanelPlacement::default(),
        }
    }
}

impl SequencerConfig {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    pub fn stagger_interval(&self) -> Duration {
        Duration::from_millis(self.stagger_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.growth_duration_secs.is_finite() {
            return Err(Error::InvalidSpec("growth duration must be finite".to_string()));
        }
        if self.reveal_interval_ms == 0 {
            return Err(Error::InvalidSpec("reveal interval must be at least 1 ms".to_string()));
        }
        if self.reveal_interval_ms > MAX_INTERVAL_MS || self.stagger_interval_ms > MAX_INTERVAL_MS {
            return Err(Error::InvalidSpec(format!(
                "reveal and stagger intervals must not exceed {} ms",
                MAX_INTERVAL_MS
            )));
        }
        if !self.panel.row_spacing.is_finite() || self.panel.origin.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidSpec("panel placement must be finite".to_string()));
        }
        Ok(())
    }
}

/// Lifecycle phase of the live sequence.
///
/// Spawning happens inside [`AnnotationSequencer::activate`], so a sequence is
/// never observed mid-spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    Idle,
    Growing,
    Revealing,
    Settled,
}

/// Result of delivering a reveal tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// One more character is visible
    Advanced { overlay: usize, cursor: usize },
    /// The overlay's whole body is visible and its timer was released
    Settled { overlay: usize },
    /// The tick targets an overlay that is not revealing
    Ignored,
    /// The tick was scheduled by a retired sequence
    Stale,
}

/// Runtime state of one activation
#[derive(Debug, Clone)]
pub struct AnnotationSequence {
    generation: u64,
    origin: HotspotId,
    connectors: Vec<LiveConnector>,
    overlays: Vec<LiveOverlay>,
}

impl AnnotationSequence {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn origin(&self) -> HotspotId {
        self.origin
    }

    pub fn connectors(&self) -> &[LiveConnector] {
        &self.connectors
    }

    pub fn overlays(&self) -> &[LiveOverlay] {
        &self.overlays
    }

    fn phase(&self) -> SequencePhase {
        if self.connectors.iter().any(|c| !c.is_complete()) {
            SequencePhase::Growing
        } else if self.overlays.iter().any(|o| !o.is_settled()) {
            SequencePhase::Revealing
        } else {
            SequencePhase::Settled
        }
    }
}

/// Owner of the single live annotation sequence
#[derive(Debug, Default)]
pub struct AnnotationSequencer {
    config: SequencerConfig,
    generation: u64,
    active: Option<AnnotationSequence>,
}

impl AnnotationSequencer {
    pub fn new(config: SequencerConfig) -> Self {
        Self {
            config,
            generation: 0,
            active: None,
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Current sequence generation; bumped by every activate and clear
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> Option<&AnnotationSequence> {
        self.active.as_ref()
    }

    pub fn active_hotspot(&self) -> Option<HotspotId> {
        self.active.as_ref().map(|s| s.origin)
    }

    pub fn connectors(&self) -> &[LiveConnector] {
        self.active.as_ref().map(|s| s.connectors.as_slice()).unwrap_or(&[])
    }

    pub fn overlays(&self) -> &[LiveOverlay] {
        self.active.as_ref().map(|s| s.overlays.as_slice()).unwrap_or(&[])
    }

    pub fn phase(&self) -> SequencePhase {
        self.active.as_ref().map_or(SequencePhase::Idle, AnnotationSequence::phase)
    }

    /// Retire the live sequence, if any, and start a new one for `hotspot`.
    ///
    /// Returns the generation of the new sequence.
    pub fn activate(&mut self, hotspot: &Hotspot, hosts: &mut Hosts<'_>) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        self.retire(hosts);

        let now = hosts.timers.now();
        let mut sequence = AnnotationSequence {
            generation,
            origin: hotspot.id(),
            connectors: Vec::new(),
            overlays: Vec::new(),
        };

        match hotspot.layout() {
            Layout::Connectors => {
                for (i, record) in hotspot.records().iter().enumerate() {
                    let path = ConnectorPath::new(record.target.waypoints(&hotspot.anchor()));
                    sequence.connectors.push(LiveConnector::new(
                        generation,
                        i,
                        path,
                        self.config.growth_duration_secs,
                    ));
                    sequence.overlays.push(LiveOverlay::new(
                        generation,
                        record.clone(),
                        OverlayAnchor::Connector(i),
                    ));
                }
            }
            Layout::StackedPanel => {
                let panel = self.config.panel;
                let no_offset = OverlayOffset {
                    x: Length::Px(0.0),
                    y: Length::Px(0.0),
                };
                for (k, record) in hotspot.records().iter().enumerate() {
                    let placement = ScreenPlacement::at(
                        panel.origin[0],
                        panel.origin[1] + k as f32 * panel.row_spacing,
                        no_offset,
                    );
                    let mut overlay =
                        LiveOverlay::new(generation, record.clone(), OverlayAnchor::Fixed(placement));
                    mount_overlay(&mut overlay, &mut *hosts.overlays);

                    let delay = self
                        .config
                        .stagger_interval()
                        .saturating_mul(u32::try_from(k).unwrap_or(u32::MAX));
                    let start = now.saturating_add(delay);
                    start_reveal(
                        &mut overlay,
                        k,
                        generation,
                        start,
                        self.config.reveal_interval(),
                        &mut *hosts.timers,
                    );
                    sequence.overlays.push(overlay);
                }
            }
        }

        debug!(
            "activated {} as generation {} with {} connectors and {} overlays",
            hotspot.id(),
            generation,
            sequence.connectors.len(),
            sequence.overlays.len()
        );
        self.active = Some(sequence);
        generation
    }

    /// Tear down the live sequence and release its timers
    pub fn clear(&mut self, hosts: &mut Hosts<'_>) {
        self.generation += 1;
        self.retire(hosts);
    }

    /// Advance connector growth by one frame
    pub fn tick(&mut self, frame_delta: Duration, hosts: &mut Hosts<'_>) {
        let Some(sequence) = self.active.as_mut() else {
            return;
        };
        let now = hosts.timers.now();

        for i in 0..sequence.connectors.len() {
            let completed = sequence.connectors[i].advance(frame_delta, self.config.line_color, &mut *hosts.scene);
            if !completed {
                continue;
            }
            debug!("generation {} connector {} complete", sequence.generation, i);

            for (index, overlay) in sequence.overlays.iter_mut().enumerate() {
                if overlay.connector() != Some(i) || overlay.state() != RevealState::Pending {
                    continue;
                }
                mount_overlay(overlay, &mut *hosts.overlays);
                start_reveal(
                    overlay,
                    index,
                    sequence.generation,
                    now,
                    self.config.reveal_interval(),
                    &mut *hosts.timers,
                );
            }
        }
    }

    /// Reveal one character for the overlay named by `tick`.
    ///
    /// Ticks scheduled by a retired sequence change nothing.
    pub fn on_reveal_tick(&mut self, tick: RevealTick, hosts: &mut Hosts<'_>) -> RevealOutcome {
        let current = self.generation;
        let live = self
            .active
            .as_mut()
            .filter(|s| s.generation == tick.generation && tick.generation == current);
        let Some(sequence) = live else {
            trace!("dropping stale reveal tick from generation {}", tick.generation);
            return RevealOutcome::Stale;
        };
        let Some(overlay) = sequence.overlays.get_mut(tick.overlay) else {
            return RevealOutcome::Ignored;
        };
        if !matches!(overlay.state(), RevealState::Revealing { .. }) {
            return RevealOutcome::Ignored;
        }

        let released = overlay.advance_cursor();
        if let Some(element) = overlay.element() {
            hosts.overlays.set_body(element, overlay.revealed());
        }

        match released {
            Some(timer) => {
                hosts.timers.clear_interval(timer);
                debug!("generation {} overlay {} settled", tick.generation, tick.overlay);
                RevealOutcome::Settled { overlay: tick.overlay }
            }
            None => RevealOutcome::Advanced {
                overlay: tick.overlay,
                cursor: overlay.cursor(),
            },
        }
    }

    /// Remove every visual and timer of the live sequence
    fn retire(&mut self, hosts: &mut Hosts<'_>) {
        let Some(mut sequence) = self.active.take() else {
            return;
        };

        for connector in &mut sequence.connectors {
            connector.retire(&mut *hosts.scene);
        }
        for overlay in &mut sequence.overlays {
            if let Some(timer) = overlay.pending_timer() {
                hosts.timers.clear_interval(timer);
            }
            if let Some(element) = overlay.take_element() {
                hosts.overlays.unmount(element);
            }
        }
        debug!("retired generation {} of {}", sequence.generation, sequence.origin);
    }
}

fn mount_overlay(overlay: &mut LiveOverlay, host: &mut dyn OverlayHost) {
    let placement = match overlay.anchor() {
        OverlayAnchor::Fixed(placement) => placement,
        OverlayAnchor::Connector(_) => ScreenPlacement::hidden(),
    };
    let element = OverlayElement {
        title: overlay.record().title.clone(),
        highlight: overlay.record().highlight.clone(),
        body: String::new(),
        placement,
    };
    match host.mount(element) {
        Ok(id) => overlay.set_element(Some(id)),
        Err(e) => {
            warn!("overlay '{}' not shown: {}", overlay.record().title, e);
            overlay.set_element(None);
        }
    }
}

/// Schedule the reveal timer of `overlay`, whose first interval begins at `start`
fn start_reveal(
    overlay: &mut LiveOverlay,
    index: usize,
    generation: u64,
    start: Duration,
    interval: Duration,
    timers: &mut dyn TimerHost,
) {
    if overlay.body_len() == 0 {
        overlay.settle();
        return;
    }
    let tick = RevealTick {
        generation,
        overlay: index,
    };
    let timer = timers.set_interval(start.saturating_add(interval), interval, tick);
    overlay.begin_reveal(timer, start);
}
