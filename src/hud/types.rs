//! Core types for the HUD component.

use crate::timer::Field;
use bubbletea_rs::Msg;

/// Top-left corner of the HUD in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

/// View-side state. Only keyboard commands and the drag session write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Field that arrow-key edits apply to.
    pub active_field: Field,
    /// Hidden HUDs only react to the hide, lock and help toggles.
    pub hud_hidden: bool,
    /// Locked HUDs cannot be dragged.
    pub hud_locked: bool,
    /// Help line visibility. Remembered while the HUD is hidden.
    pub info_visible: bool,
    /// Top-left corner of the panel.
    pub position: Position,
    /// Set while the completion flash is showing.
    pub flashing: bool,
}

impl ViewState {
    /// Fresh state: visible, unlocked, minutes active, not flashing.
    pub fn new(info_visible: bool, position: Position) -> Self {
        Self {
            active_field: Field::Minutes,
            hud_hidden: false,
            hud_locked: false,
            info_visible,
            position,
            flashing: false,
        }
    }
}

/// Whether the HUD took a key or mouse event.
///
/// A consumed event should not get any other handling from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The HUD acted on the event.
    Consumed,
    /// Not for the HUD; the host may handle it.
    Ignored,
}

impl KeyOutcome {
    /// Shorthand for `== KeyOutcome::Consumed`.
    pub fn consumed(self) -> bool {
        self == KeyOutcome::Consumed
    }
}

/// Ends the completion flash it was scheduled for.
#[derive(Debug, Clone)]
pub struct FlashEndMsg {
    /// Id of the HUD that flashed.
    pub id: i64,
    pub(crate) tag: i64,
}

impl From<FlashEndMsg> for Msg {
    fn from(msg: FlashEndMsg) -> Self {
        Box::new(msg) as Msg
    }
}
