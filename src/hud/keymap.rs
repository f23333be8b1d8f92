//! Key bindings for the HUD.

use crate::key::{self, Binding};
use crossterm::event::KeyCode;

/// Every command the HUD dispatches, in dispatch order.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Brings the HUD up. Only honored before initialization.
    pub init: Binding,
    /// Hides or shows the HUD together with the help line.
    pub toggle_hud: Binding,
    /// Locks or unlocks dragging.
    pub toggle_lock: Binding,
    /// Hides or shows the help line.
    pub toggle_info: Binding,
    /// Starts or stops the countdown.
    pub start_stop: Binding,
    /// Starts over from the full target.
    pub restart: Binding,
    /// Stops and refills to the full target.
    pub reset: Binding,
    /// Raises the active field by one.
    pub increment: Binding,
    /// Lowers the active field by one.
    pub decrement: Binding,
    /// Makes minutes the active field.
    pub select_minutes: Binding,
    /// Makes seconds the active field.
    pub select_seconds: Binding,
    /// Help-only entry summarising the four arrow bindings.
    pub set_time: Binding,
}

/// The stock bindings: Delete, Insert, Home, PageUp, U, L, I and the arrows.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        init: Binding::new(vec![KeyCode::Delete]).with_help("Delete", "init"),
        toggle_hud: Binding::new(vec![KeyCode::Insert]).with_help("Ins", "hide/show"),
        toggle_lock: Binding::new(vec![KeyCode::Home]).with_help("Home", "lock"),
        toggle_info: Binding::new(vec![KeyCode::PageUp]).with_help("PgUp", "toggle help"),
        start_stop: Binding::new(vec![KeyCode::Char('u')]).with_help("U", "start/stop"),
        restart: Binding::new(vec![KeyCode::Char('l')]).with_help("L", "restart"),
        reset: Binding::new(vec![KeyCode::Char('i')]).with_help("I", "reset"),
        increment: Binding::new(vec![KeyCode::Up]).with_help("↑↓", "change value"),
        decrement: Binding::new(vec![KeyCode::Down]),
        select_minutes: Binding::new(vec![KeyCode::Left]).with_help("←→", "switch field"),
        select_seconds: Binding::new(vec![KeyCode::Right]),
        set_time: Binding::new(vec![KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right])
            .with_help("Arrows", "set time"),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl KeyMap {
    /// Bindings for the hint line inside the alarm panel. The up and left
    /// bindings carry the help for their arrow pairs.
    pub fn panel_hint(&self) -> Vec<&Binding> {
        vec![&self.increment, &self.select_minutes]
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.init,
            &self.start_stop,
            &self.restart,
            &self.reset,
            &self.set_time,
            &self.toggle_hud,
            &self.toggle_lock,
            &self.toggle_info,
        ]
    }
}
