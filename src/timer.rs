//! Countdown engine for the alarm HUD.
//!
//! The engine owns the alarm target (minutes and seconds), the remaining
//! countdown, and the running flag. It advances once per tick interval while
//! running and reports completion exactly once when the countdown reaches zero.
//!
//! # Tick scheduling
//!
//! Ticks are ordinary bubbletea messages. Every [`TickMsg`] carries the id of
//! the engine that scheduled it and the generation tag that was current at the
//! time. Stopping the engine bumps the tag *before* any other state changes, so
//! a tick already in flight is rejected when it arrives instead of overwriting a
//! freshly reset countdown.
//!
//! # Basic Usage
//!
//! ```rust
//! use alarm_hud::timer::{new, Field, TickOutcome};
//!
//! let mut timer = new();
//! timer.set_target(0, 3);
//!
//! // Starting returns the command that delivers the first tick.
//! assert!(timer.start().is_some());
//! assert!(timer.running());
//!
//! assert_eq!(timer.tick(), TickOutcome::Counting);
//! assert_eq!(timer.tick(), TickOutcome::Counting);
//! assert_eq!(timer.tick(), TickOutcome::Completed);
//! assert!(!timer.running());
//! assert_eq!(timer.remaining_seconds(), 0);
//!
//! // Edits while idle rescale the countdown immediately.
//! timer.adjust(Field::Minutes, 1);
//! assert_eq!(timer.remaining_seconds(), 63);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Largest value the minutes field accepts.
pub const MAX_MINUTES: u32 = 99;
/// Largest value the seconds field accepts.
pub const MAX_SECONDS: u32 = 59;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Which half of the alarm target arrow-key edits apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// The minutes field (0..=99).
    #[default]
    Minutes,
    /// The seconds field (0..=59).
    Seconds,
}

/// Plain snapshot of the countdown.
///
/// `remaining_seconds` is only ever decremented by a tick while `running` is
/// set, and it never exceeds [`TimerState::target`] after a start or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    /// Alarm minutes, 0..=99.
    pub target_minutes: u32,
    /// Alarm seconds, 0..=59.
    pub target_seconds: u32,
    /// Seconds left in the current countdown.
    pub remaining_seconds: u32,
    /// Whether ticks are currently being applied.
    pub running: bool,
}

impl TimerState {
    /// Total alarm length in seconds.
    pub fn target(&self) -> u32 {
        self.target_minutes * 60 + self.target_seconds
    }
}

/// Message delivered once per interval while the engine runs.
///
/// Only the engine that scheduled a tick, and only in the same run, accepts it.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Id of the engine that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Result of applying a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick was stale, addressed to another engine, or the engine is idle.
    Ignored,
    /// One second elapsed and the countdown is still going.
    Counting,
    /// The countdown just reached zero. The engine has stopped itself.
    Completed,
}

/// The countdown engine.
#[derive(Debug, Clone)]
pub struct Model {
    state: TimerState,
    /// Time between ticks. Each tick removes one second from the countdown.
    pub interval: Duration,
    id: i64,
    tag: i64,
}

/// Creates an idle engine with an all-zero target and a one second interval.
pub fn new() -> Model {
    new_with_interval(Duration::from_secs(1))
}

/// Creates an idle engine that ticks every `interval`.
///
/// Every tick still counts as one second of countdown; a shorter interval only
/// speeds the clock up, which is mostly useful for demos and tests.
pub fn new_with_interval(interval: Duration) -> Model {
    Model {
        state: TimerState::default(),
        interval,
        id: next_id(),
        tag: 0,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Unique id used to filter tick messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Copy of the current countdown state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Whether the countdown is active.
    pub fn running(&self) -> bool {
        self.state.running
    }

    /// Seconds left in the countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Total alarm length in seconds.
    pub fn target(&self) -> u32 {
        self.state.target()
    }

    /// Replaces the alarm target, clamping each field to its range.
    ///
    /// Like an arrow-key edit, this rescales the countdown only while idle.
    pub fn set_target(&mut self, minutes: u32, seconds: u32) {
        self.state.target_minutes = minutes.min(MAX_MINUTES);
        self.state.target_seconds = seconds.min(MAX_SECONDS);
        if !self.state.running {
            self.state.remaining_seconds = self.state.target();
        }
    }

    /// Starts the countdown and returns the command carrying the first tick.
    ///
    /// Returns `None` without touching any state when the engine is already
    /// running or the target is zero. A finished or overlong countdown is
    /// refilled to the full target; a paused one resumes where it stopped.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.state.running {
            return None;
        }
        let target = self.state.target();
        if target == 0 {
            debug!("refusing to start a zero-length alarm");
            return None;
        }
        if self.state.remaining_seconds == 0 || self.state.remaining_seconds > target {
            self.state.remaining_seconds = target;
        }
        self.state.running = true;
        debug!(
            remaining = self.state.remaining_seconds,
            target, "countdown started"
        );
        Some(self.tick_cmd())
    }

    /// Stops the countdown, keeping the remaining time.
    ///
    /// Returns `false` if the engine was not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        // Invalidate the in-flight tick before the state changes under it.
        self.tag += 1;
        self.state.running = false;
        debug!(remaining = self.state.remaining_seconds, "countdown stopped");
        true
    }

    /// Starts when idle, stops when running.
    pub fn toggle(&mut self) -> Option<Cmd> {
        if self.state.running {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    /// Stops the countdown and refills it to the full target.
    pub fn reset(&mut self) {
        self.stop();
        self.state.remaining_seconds = self.state.target();
        debug!(remaining = self.state.remaining_seconds, "countdown reset");
    }

    /// Stops, drains, and starts again, so the countdown always begins at the
    /// full target no matter how far the previous run got.
    pub fn restart(&mut self) -> Option<Cmd> {
        self.stop();
        self.state.remaining_seconds = 0;
        debug!("countdown restarting");
        self.start()
    }

    /// Moves one field of the target by `delta`, clamped to its range.
    ///
    /// While idle the countdown is rescaled to the new target right away.
    /// While running only the target changes; the countdown in progress keeps
    /// going and the edit takes effect on the next reset or restart.
    pub fn adjust(&mut self, field: Field, delta: i32) {
        let (value, max) = match field {
            Field::Minutes => (&mut self.state.target_minutes, MAX_MINUTES),
            Field::Seconds => (&mut self.state.target_seconds, MAX_SECONDS),
        };
        *value = (i64::from(*value) + i64::from(delta)).clamp(0, i64::from(max)) as u32;
        if !self.state.running {
            self.state.remaining_seconds = self.state.target();
        }
        trace!(?field, target = self.state.target(), "target adjusted");
    }

    /// Applies one second of countdown.
    ///
    /// Does nothing while idle. When the countdown reaches zero the engine
    /// stops itself and reports [`TickOutcome::Completed`]; that happens at most
    /// once per run because a stopped engine ignores further ticks.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Ignored;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        trace!(remaining = self.state.remaining_seconds, "tick");
        if self.state.remaining_seconds == 0 {
            self.stop();
            return TickOutcome::Completed;
        }
        TickOutcome::Counting
    }

    /// Applies a delivered [`TickMsg`], rejecting foreign and stale ones.
    pub fn on_tick(&mut self, msg: &TickMsg) -> TickOutcome {
        if msg.id != self.id || msg.tag != self.tag {
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Command for the next tick, or `None` when idle.
    pub fn next_tick(&self) -> Option<Cmd> {
        self.state.running.then(|| self.tick_cmd())
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    #[cfg(test)]
    pub(crate) fn current_tick(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}

/// Formats a number of seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours; 99 minutes is the largest target.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
