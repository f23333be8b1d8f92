//! Type-safe key bindings.
//!
//! A [`Binding`] names the physical keys that trigger one command and carries
//! the short help shown for it. Matching looks at the key code only: modifier
//! state is ignored and letters match regardless of case, so `U`, `u` and
//! `shift+u` all trigger the same binding.
//!
//! ```rust
//! use alarm_hud::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let start = Binding::new(vec![KeyCode::Char('u')]).with_help("U", "start/stop");
//! let press = KeyMsg { key: KeyCode::Char('U'), modifiers: KeyModifiers::SHIFT };
//! assert!(start.matches(&press));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help text for a binding: the key as shown to the user and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display form of the key, e.g. `"PgUp"`.
    pub key: String,
    /// Short description, e.g. `"toggle help"`.
    pub desc: String,
}

/// A set of keys bound to one command.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an enabled binding with no help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Keys that trigger this binding.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Disabled bindings never match and are left out of help views.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether `msg` is one of this binding's keys.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| same_key(k, &msg.key))
    }
}

fn same_key(bound: &KeyCode, pressed: &KeyCode) -> bool {
    match (bound, pressed) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(b),
        _ => bound == pressed,
    }
}

/// Whether `msg` matches any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Something that can describe its bindings for a help view.
pub trait KeyMap {
    /// Bindings for the single-line help, in display order.
    fn short_help(&self) -> Vec<&Binding>;
}
