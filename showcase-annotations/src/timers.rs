//! Wall-clock interval timers for text reveal
//!
//! Reveal timers run independently of the frame tick. A [`TimerHost`] hands
//! out [`TimerId`]s and later delivers [`RevealTick`] tokens, each stamped with
//! the sequence generation that scheduled it. Receivers compare that stamp
//! against the live generation and drop stale ticks.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Shortest interval a [`TimerQueue`] will repeat at
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

/// Handle of a scheduled interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Payload delivered each time a reveal timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTick {
    /// Generation of the sequence that scheduled the timer
    pub generation: u64,
    /// Index of the overlay within that sequence
    pub overlay: usize,
}

/// Scheduler of repeating wall-clock callbacks
pub trait TimerHost {
    /// Current wall-clock time, relative to an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Fire `tick` at `first_fire`, then every `period` until cleared
    fn set_interval(&mut self, first_fire: Duration, period: Duration, tick: RevealTick) -> TimerId;

    /// Stop a timer; unknown or already cleared ids are ignored
    fn clear_interval(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    period: Duration,
    tick: RevealTick,
    next_fire: Duration,
}

/// Deadline-ordered timer queue pumped by the render loop owner.
///
/// Cleared timers are dropped lazily when their heap entry surfaces.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    active: HashMap<u64, ActiveTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `now` and collect every tick that came due, in
    /// deadline order. A timer that missed several periods fires once per
    /// missed period.
    pub fn advance_to(&mut self, now: Duration) -> Vec<RevealTick> {
        self.now = self.now.max(now);
        let mut due = Vec::new();

        while let Some(&Reverse((deadline, id))) = self.heap.peek() {
            if deadline > self.now {
                break;
            }
            self.heap.pop();

            let Some(timer) = self.active.get_mut(&id) else {
                continue;
            };
            if timer.next_fire != deadline {
                continue;
            }
            due.push(timer.tick);
            timer.next_fire = deadline.saturating_add(timer.period);
            self.heap.push(Reverse((timer.next_fire, id)));
        }

        due
    }

    /// Number of timers not yet cleared
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.contains_key(&id.0)
    }

    /// Next time a timer will fire
    pub fn next_fire(&self, id: TimerId) -> Option<Duration> {
        self.active.get(&id.0).map(|t| t.next_fire)
    }
}

impl TimerHost for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn set_interval(&mut self, first_fire: Duration, period: Duration, tick: RevealTick) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;

        let timer = ActiveTimer {
            period: period.max(MIN_TIMER_PERIOD),
            tick,
            next_fire: first_fire,
        };
        self.active.insert(id, timer);
        self.heap.push(Reverse((first_fire, id)));
        TimerId(id)
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.active.remove(&id.0);
    }
}
