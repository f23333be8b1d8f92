//! Alarm HUD component.
//!
//! A draggable heads-up display with a countdown and an editable alarm target,
//! driven entirely from the keyboard:
//!
//! | Key | Effect |
//! |---|---|
//! | Delete | initialize (first press only) |
//! | Insert | hide/show the HUD and help line |
//! | Home | lock/unlock dragging |
//! | PageUp | hide/show the help line |
//! | U | start/stop |
//! | L | restart from the full target |
//! | I | reset to the full target |
//! | ↑ / ↓ | change the active field |
//! | ← / → | select minutes / seconds |
//!
//! # Basic Usage
//!
//! ```rust
//! use alarm_hud::hud;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut hud = hud::new();
//! let press = |key| KeyMsg { key, modifiers: KeyModifiers::NONE };
//!
//! hud.handle_key(&press(KeyCode::Delete));
//! assert!(hud.initialized());
//!
//! hud.handle_key(&press(KeyCode::Right));
//! hud.handle_key(&press(KeyCode::Up));
//! hud.handle_key(&press(KeyCode::Up));
//! assert_eq!(hud.snapshot().countdown, "00:02");
//!
//! let (_, tick) = hud.handle_key(&press(KeyCode::Char('u')));
//! assert!(tick.is_some());
//! assert!(hud.timer_state().running);
//! ```

pub mod drag;
pub mod keymap;
pub mod model;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use drag::DragSession;
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, with_config, Model};
pub use types::{FlashEndMsg, KeyOutcome, Position, ViewState};
pub use view::{snapshot, HudColor, RenderSnapshot, Status, Styles};
