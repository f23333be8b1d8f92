//! Help line rendering generated from key bindings.
//!
//! The HUD uses this twice: once for the help line pinned to the bottom of the
//! screen (`Delete = init | U = start/stop | ...`) and once for the hint inside
//! the alarm panel (`↑↓ change value | ←→ switch field`). Both are the same
//! single-line view with different key/description separators.
//!
//! ```rust
//! use alarm_hud::help::Model;
//! use alarm_hud::key::{Binding, KeyMap};
//! use crossterm::event::KeyCode;
//!
//! struct Keys {
//!     start: Binding,
//!     reset: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.start, &self.reset]
//!     }
//! }
//!
//! let keys = Keys {
//!     start: Binding::new(vec![KeyCode::Char('u')]).with_help("U", "start/stop"),
//!     reset: Binding::new(vec![KeyCode::Char('i')]).with_help("I", "reset"),
//! };
//! let help = Model::new().plain();
//! assert_eq!(help.view(&keys), "U = start/stop | I = reset");
//! ```

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the parts of a help line.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The truncation marker.
    pub ellipsis: Style,
    /// The key, e.g. `PgUp`.
    pub key: Style,
    /// The key separator and the description.
    pub desc: Style,
    /// The separator between bindings.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let text = Style::new().foreground(Color::from("#DDDDDD"));
        Self {
            ellipsis: text.clone(),
            key: text.clone(),
            desc: text.clone(),
            separator: text,
        }
    }
}

impl Styles {
    /// Styles that emit no escape codes at all.
    pub fn plain() -> Self {
        Self {
            ellipsis: Style::new(),
            key: Style::new(),
            desc: Style::new(),
            separator: Style::new(),
        }
    }
}

/// Single-line help view.
///
/// `Delete = init | U = start/stop | ...` with the default separators.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum visible width; 0 disables truncation.
    pub width: usize,
    /// Placed between two bindings.
    pub separator: String,
    /// Placed between a key and its description.
    pub key_separator: String,
    /// Appended when the line had to be cut short.
    pub ellipsis: String,
    /// Colors for each part of the line.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " | ".to_string(),
            key_separator: " = ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help view with ` | ` and ` = ` separators and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum visible width. 0 means unlimited.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the text between a key and its description.
    pub fn with_key_separator(mut self, sep: impl Into<String>) -> Self {
        self.key_separator = sep.into();
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Same model with unstyled output.
    pub fn plain(self) -> Self {
        self.with_styles(Styles::plain())
    }

    /// Renders the key map's short help.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders bindings on one line, truncating with an ellipsis when a
    /// width is set and the next item would not fit.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styles.separator.render(&self.separator);
        let mut builder = String::new();
        let mut total_width = 0;

        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{}{}{}",
                sep,
                self.styles.key.render(&help.key),
                self.styles.desc.render(&self.key_separator),
                self.styles.desc.render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.should_add_item(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }
            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(" {}", self.styles.ellipsis.render(&self.ellipsis));
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Binding;
    use crossterm::event::KeyCode;

    struct Keys {
        a: Binding,
        b: Binding,
        c: Binding,
    }

    impl KeyMap for Keys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.a, &self.b, &self.c]
        }
    }

    fn keys() -> Keys {
        Keys {
            a: Binding::new(vec![KeyCode::Char('u')]).with_help("U", "start/stop"),
            b: Binding::new(vec![KeyCode::Char('l')]).with_help("L", "restart"),
            c: Binding::new(vec![KeyCode::Char('i')]).with_help("I", "reset"),
        }
    }

    #[test]
    fn test_short_view() {
        let help = Model::new().plain();
        assert_eq!(help.view(&keys()), "U = start/stop | L = restart | I = reset");
    }

    #[test]
    fn test_custom_key_separator() {
        let help = Model::new().plain().with_key_separator(" ");
        assert_eq!(help.view(&keys()), "U start/stop | L restart | I reset");
    }

    #[test]
    fn test_disabled_bindings_are_skipped() {
        let mut k = keys();
        k.b.set_enabled(false);
        let help = Model::new().plain();
        assert_eq!(help.view(&k), "U = start/stop | I = reset");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let help = Model::new().plain().with_width(20);
        let out = help.view(&keys());
        assert_eq!(out, "U = start/stop …");
        assert!(lipgloss::width_visible(&out) <= 20);
    }

    #[test]
    fn test_styled_view_keeps_text() {
        let help = Model::new();
        let out = help.view(&keys());
        assert_eq!(
            lipgloss::strip_ansi(&out),
            "U = start/stop | L = restart | I = reset"
        );
    }
}
