//! Alarm notification collaborators.
//!
//! When the countdown completes the HUD flashes and then hands off to two
//! kinds of collaborator:
//!
//! - one [`AlertSink`], which makes the noise (by default [`TerminalBell`]);
//! - any number of [`AlarmSink`] subscribers, which receive the payload-free
//!   alarm-complete signal.
//!
//! Both are best effort. Neither returns anything, and a panic inside one is
//! caught and logged so it never reaches the countdown.
//!
//! Catching a panic does not silence the process panic hook, which by default
//! prints to stderr and so draws over a full-screen UI. Hosts that care should
//! install their own hook, for example one that logs [`panic_text`] through
//! `tracing`.

use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Plays the audible alert.
pub trait AlertSink: Send {
    /// Makes the noise. Fire and forget.
    fn play_alert(&self);
}

/// Rings the terminal bell on stdout. Write errors are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play_alert(&self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Makes no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AlertSink for Silent {
    fn play_alert(&self) {}
}

/// Receives the alarm-complete signal.
///
/// Closures work directly:
///
/// ```rust
/// use alarm_hud::alert::AlarmSink;
///
/// let mut fired = 0;
/// let mut sink = || fired += 1;
/// sink.on_alarm_complete();
/// assert_eq!(fired, 1);
/// ```
pub trait AlarmSink: Send {
    /// Called once each time a countdown completes.
    fn on_alarm_complete(&mut self);
}

impl<F> AlarmSink for F
where
    F: FnMut() + Send,
{
    fn on_alarm_complete(&mut self) {
        self()
    }
}

/// The message carried by a panic payload, or `"unknown panic"` when the
/// payload is not a string.
pub fn panic_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// Runs `f`, swallowing any panic. Returns whether `f` finished normally.
pub(crate) fn guarded(what: &str, f: impl FnOnce()) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(payload) => {
            warn!(
                collaborator = what,
                panic = panic_text(payload.as_ref()),
                "alarm collaborator panicked; ignoring"
            );
            false
        }
    }
}
