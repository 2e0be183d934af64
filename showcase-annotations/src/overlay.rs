//! Text callouts and their reveal cursor

use std::time::Duration;

use crate::hosts::{OverlayId, ScreenPlacement};
use crate::record::AnnotationRecord;
use crate::timers::TimerId;

/// What an overlay's screen position follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayAnchor {
    /// The terminal point of the connector at this index
    Connector(usize),
    /// A fixed screen position, never re-projected
    Fixed(ScreenPlacement),
}

/// Reveal progress of an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Waiting for its connector to finish growing
    Pending,
    /// A reveal timer is scheduled; characters appear as it fires
    Revealing { timer: TimerId },
    /// The full body is shown
    Settled,
}

/// A callout owned by a live annotation sequence
#[derive(Debug, Clone)]
pub struct LiveOverlay {
    generation: u64,
    record: AnnotationRecord,
    anchor: OverlayAnchor,
    element: Option<OverlayId>,
    cursor: usize,
    body_len: usize,
    state: RevealState,
    reveal_start: Option<Duration>,
}

impl LiveOverlay {
    pub fn new(generation: u64, record: AnnotationRecord, anchor: OverlayAnchor) -> Self {
        let body_len = record.body_len();
        Self {
            generation,
            record,
            anchor,
            element: None,
            cursor: 0,
            body_len,
            state: RevealState::Pending,
            reveal_start: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn record(&self) -> &AnnotationRecord {
        &self.record
    }

    pub fn anchor(&self) -> OverlayAnchor {
        self.anchor
    }

    /// Index of the connector this overlay tracks, if any
    pub fn connector(&self) -> Option<usize> {
        match self.anchor {
            OverlayAnchor::Connector(index) => Some(index),
            OverlayAnchor::Fixed(_) => None,
        }
    }

    /// Mounted element, absent before mounting or when mounting failed
    pub fn element(&self) -> Option<OverlayId> {
        self.element
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Characters of the body revealed so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn body_len(&self) -> usize {
        self.body_len
    }

    pub fn is_settled(&self) -> bool {
        self.state == RevealState::Settled
    }

    /// When the reveal timer's first interval began
    pub fn reveal_start(&self) -> Option<Duration> {
        self.reveal_start
    }

    /// The revealed prefix `body[0..cursor]`
    pub fn revealed(&self) -> &str {
        let end = self
            .record
            .body
            .char_indices()
            .nth(self.cursor)
            .map_or(self.record.body.len(), |(i, _)| i);
        &self.record.body[..end]
    }

    pub(crate) fn set_element(&mut self, element: Option<OverlayId>) {
        self.element = element;
    }

    pub(crate) fn take_element(&mut self) -> Option<OverlayId> {
        self.element.take()
    }

    pub(crate) fn begin_reveal(&mut self, timer: TimerId, start: Duration) {
        self.state = RevealState::Revealing { timer };
        self.reveal_start = Some(start);
    }

    /// Settle without a timer, for empty bodies
    pub(crate) fn settle(&mut self) {
        self.cursor = self.body_len;
        self.state = RevealState::Settled;
    }

    /// Reveal one more character. Returns the timer to release once the
    /// whole body is visible.
    pub(crate) fn advance_cursor(&mut self) -> Option<TimerId> {
        let RevealState::Revealing { timer } = self.state else {
            return None;
        };
        self.cursor = (self.cursor + 1).min(self.body_len);
        if self.cursor == self.body_len {
            self.state = RevealState::Settled;
            Some(timer)
        } else {
            None
        }
    }

    /// Timer still owned by this overlay
    pub(crate) fn pending_timer(&self) -> Option<TimerId> {
        match self.state {
            RevealState::Revealing { timer } => Some(timer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TargetOffset;

    fn overlay(body: &str) -> LiveOverlay {
        let record = AnnotationRecord::new("Title", body, TargetOffset::polar(0.0, 1.0, 0.0));
        LiveOverlay::new(1, record, OverlayAnchor::Connector(0))
    }

    #[test]
    fn test_cursor_is_monotonic_and_bounded() {
        let mut overlay = overlay("abc");
        overlay.begin_reveal(TimerId(9), Duration::ZERO);

        let mut last = overlay.cursor();
        let mut released = None;
        for _ in 0..6 {
            released = released.or(overlay.advance_cursor());
            assert!(overlay.cursor() >= last);
            assert!(overlay.cursor() <= overlay.body_len());
            last = overlay.cursor();
        }
        assert_eq!(released, Some(TimerId(9)));
        assert!(overlay.is_settled());
        assert_eq!(overlay.revealed(), "abc");
    }

    #[test]
    fn test_revealed_respects_char_boundaries() {
        let mut overlay = overlay("né—x");
        overlay.begin_reveal(TimerId(1), Duration::ZERO);
        overlay.advance_cursor();
        overlay.advance_cursor();
        assert_eq!(overlay.revealed(), "né");
        overlay.advance_cursor();
        assert_eq!(overlay.revealed(), "né—");
    }

    #[test]
    fn test_pending_overlay_ignores_cursor_advance() {
        let mut overlay = overlay("abc");
        assert_eq!(overlay.advance_cursor(), None);
        assert_eq!(overlay.cursor(), 0);
    }
}
