#![warn(missing_docs)]

//! # alarm-hud
//!
//! A keyboard-driven countdown alarm HUD for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications.
//!
//! The HUD is a small draggable panel showing a `MM:SS` countdown and an
//! editable alarm target, plus an optional help line at the bottom of the
//! screen. It stays invisible until the Delete key is pressed, then responds to
//! a fixed set of shortcuts (see [`hud`]).
//!
//! ## Components
//!
//! - [`timer`]: the countdown engine. Owns the target, the remaining time and
//!   the running flag, and applies one tick per interval.
//! - [`hud`]: the controller. Dispatches keys, handles dragging and the
//!   completion flash, and renders a [`hud::RenderSnapshot`].
//! - [`alert`]: the audible alert and alarm-complete subscribers.
//! - [`key`] and [`help`]: key bindings and the help line built from them.
//!
//! ## Integration with bubbletea-rs
//!
//! Forward messages to the HUD and return its commands:
//!
//! ```rust
//! use alarm_hud::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     hud: AlarmHud,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut hud = hud_new();
//!         hud.subscribe(|| tracing::info!("time is up"));
//!         (Self { hud }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.hud.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.hud.view()
//!     }
//! }
//! ```
//!
//! When one of your own text inputs takes focus, call
//! [`Component::blur`] on the HUD so it stops reacting to keys.

pub mod alert;
pub mod config;
pub mod help;
pub mod hud;
pub mod key;
pub mod timer;

use bubbletea_rs::Cmd;

/// Keyboard focus management.
///
/// A focused component reacts to key input; a blurred one ignores it. The HUD
/// starts focused.
pub trait Component {
    /// Sets the component to focused state. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Whether the component currently takes key input.
    fn focused(&self) -> bool;
}

pub use alert::{AlarmSink, AlertSink, Silent, TerminalBell};
pub use config::Config;
pub use hud::{
    new as hud_new, with_config as hud_with_config, HudColor, KeyOutcome, Model as AlarmHud,
    Position, RenderSnapshot,
};
pub use key::{matches, Binding, Help as KeyHelp, KeyMap};
pub use timer::{
    new as timer_new, Field, Model as Timer, TickMsg as TimerTickMsg, TickOutcome, TimerState,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alert::{AlarmSink, AlertSink, Silent, TerminalBell};
    pub use crate::config::Config;
    pub use crate::hud::{
        new as hud_new, with_config as hud_with_config, HudColor, KeyOutcome,
        Model as AlarmHud, Position, RenderSnapshot,
    };
    pub use crate::key::{Binding, KeyMap};
    pub use crate::timer::{Field, Model as Timer, TimerState};
    pub use crate::Component;
}
