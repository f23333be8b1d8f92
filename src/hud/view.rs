//! Rendering for the HUD.
//!
//! [`snapshot`] turns the two state records into a [`RenderSnapshot`] with no
//! side effects; [`render_panel`] and [`render_screen`] turn a snapshot into
//! styled terminal text. Nothing here is cached between frames.

use super::types::{Position, ViewState};
use crate::config::Config;
use crate::timer::{format_mm_ss, Field, TimerState};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Color of the countdown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudColor {
    /// Plenty of time left.
    Normal,
    /// Remaining time is at or below the alert threshold.
    Alert,
    /// The countdown just completed.
    Flash,
}

/// Whether the countdown is going, shown after the alarm target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ticks are being applied.
    Running,
    /// Stopped, paused or never started.
    Idle,
}

impl Status {
    /// Text shown in the panel: `ON` or `—`.
    pub fn label(self) -> &'static str {
        match self {
            Status::Running => "ON",
            Status::Idle => "—",
        }
    }
}

/// Everything a frame needs, derived from the timer and view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    /// Remaining time as `MM:SS`.
    pub countdown: String,
    /// Alarm minutes, two digits.
    pub target_minutes: String,
    /// Alarm seconds, two digits.
    pub target_seconds: String,
    /// Minutes is the active field.
    pub minutes_highlighted: bool,
    /// Seconds is the active field.
    pub seconds_highlighted: bool,
    /// Running or idle.
    pub status: Status,
    /// Color of the countdown text.
    pub color: HudColor,
    /// False while hidden.
    pub hud_visible: bool,
    /// Whether the help line is drawn. Always false while hidden.
    pub info_visible: bool,
    /// False while locked; the HUD ignores the mouse then.
    pub draggable: bool,
    /// Top-left corner of the panel.
    pub position: Position,
}

/// Derives the frame for the given state.
pub fn snapshot(timer: &TimerState, view: &ViewState, config: &Config) -> RenderSnapshot {
    let color = if view.flashing {
        HudColor::Flash
    } else if timer.remaining_seconds <= config.alert_threshold_secs() {
        HudColor::Alert
    } else {
        HudColor::Normal
    };

    RenderSnapshot {
        countdown: format_mm_ss(timer.remaining_seconds),
        target_minutes: format!("{:02}", timer.target_minutes),
        target_seconds: format!("{:02}", timer.target_seconds),
        minutes_highlighted: view.active_field == Field::Minutes,
        seconds_highlighted: view.active_field == Field::Seconds,
        status: if timer.running {
            Status::Running
        } else {
            Status::Idle
        },
        color,
        hud_visible: !view.hud_hidden,
        info_visible: !view.hud_hidden && view.info_visible,
        draggable: !view.hud_locked && !view.hud_hidden,
        position: view.position,
    }
}

/// Styles for the HUD panel and the help line.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Countdown with time to spare (green).
    pub normal: Style,
    /// Countdown at or below the alert threshold (red).
    pub alert: Style,
    /// Countdown during the completion flash.
    pub flash: Style,
    /// The `Alarm:` label.
    pub label: Style,
    /// The key hint line.
    pub hint: Style,
    /// A target field that is not active.
    pub field: Style,
    /// The active target field.
    pub highlighted_field: Style,
    /// Status label while running (green).
    pub running: Style,
    /// Status label while idle (grey).
    pub idle: Style,
    /// Padding and separators inside the panel.
    pub frame: Style,
    /// The help line at the bottom of the screen.
    pub info: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let bg = Color::from("#1C1C1C");
        let panel = Style::new().background(bg.clone());
        Self {
            normal: panel.clone().foreground(Color::from("#00FF00")).bold(true),
            alert: panel.clone().foreground(Color::from("#FF0000")).bold(true),
            flash: panel.clone().foreground(Color::from("#FFFF00")).bold(true),
            label: panel.clone().foreground(Color::from("#00AAFF")),
            hint: panel.clone().foreground(Color::from("#888888")),
            field: panel.clone().foreground(Color::from("#FFFFFF")),
            highlighted_field: Style::new()
                .background(Color::from("#00557F"))
                .foreground(Color::from("#FFFFFF")),
            running: panel.clone().foreground(Color::from("#00FF00")),
            idle: panel.clone().foreground(Color::from("#888888")),
            frame: panel,
            info: Style::new().foreground(Color::from("#DDDDDD")),
        }
    }
}

impl Styles {
    /// Styles that emit no escape codes.
    pub fn plain() -> Self {
        Self {
            normal: Style::new(),
            alert: Style::new(),
            flash: Style::new(),
            label: Style::new(),
            hint: Style::new(),
            field: Style::new(),
            highlighted_field: Style::new(),
            running: Style::new(),
            idle: Style::new(),
            frame: Style::new(),
            info: Style::new(),
        }
    }

    fn countdown(&self, color: HudColor) -> &Style {
        match color {
            HudColor::Normal => &self.normal,
            HudColor::Alert => &self.alert,
            HudColor::Flash => &self.flash,
        }
    }

    fn status(&self, status: Status) -> &Style {
        match status {
            Status::Running => &self.running,
            Status::Idle => &self.idle,
        }
    }

    fn target_field(&self, highlighted: bool) -> &Style {
        if highlighted {
            &self.highlighted_field
        } else {
            &self.field
        }
    }
}

/// Renders the HUD panel as equally wide lines:
///
/// ```text
///  05:00
///  ↑↓ change value | ←→ switch field
///  Alarm: 05:00 ON
/// ```
///
/// `hint` is the pre-rendered panel hint line.
pub fn render_panel(snap: &RenderSnapshot, styles: &Styles, hint: &str) -> Vec<String> {
    let rows = [
        styles.countdown(snap.color).render(&snap.countdown),
        styles.hint.render(hint),
        [
            styles.label.render("Alarm:"),
            styles.frame.render(" "),
            styles
                .target_field(snap.minutes_highlighted)
                .render(&snap.target_minutes),
            styles.field.render(":"),
            styles
                .target_field(snap.seconds_highlighted)
                .render(&snap.target_seconds),
            styles.frame.render(" "),
            styles.status(snap.status).render(snap.status.label()),
        ]
        .concat(),
    ];

    let inner = rows
        .iter()
        .map(|r| lipgloss::width_visible(r))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            let fill = inner - lipgloss::width_visible(row);
            format!(
                "{}{}{}",
                styles.frame.render(" "),
                row,
                styles.frame.render(&" ".repeat(fill + 1))
            )
        })
        .collect()
}

/// Visible size of the rendered panel in cells.
pub fn panel_size(lines: &[String]) -> (u16, u16) {
    let width = lines
        .iter()
        .map(|l| lipgloss::width_visible(l))
        .max()
        .unwrap_or(0);
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(lines.len()).unwrap_or(u16::MAX),
    )
}

/// Lays the panel and help line out on screen.
///
/// The panel is offset by its position. The help line sits on the last row
/// when the terminal height is known and right under the panel otherwise.
/// With a known height the frame never has more rows than the terminal; panel
/// rows that would spill past it (or onto the help row) are cut.
pub fn render_screen(
    snap: &RenderSnapshot,
    panel: &[String],
    info: &str,
    styles: &Styles,
    height: Option<u16>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if snap.hud_visible {
        lines.extend((0..snap.position.y).map(|_| String::new()));
        let indent = " ".repeat(usize::from(snap.position.x));
        lines.extend(panel.iter().map(|l| format!("{indent}{l}")));
    }

    let rows = height.map(usize::from);
    if snap.info_visible {
        if let Some(h) = rows {
            let last_row = h.saturating_sub(1);
            lines.truncate(last_row);
            while lines.len() < last_row {
                lines.push(String::new());
            }
        }
        lines.push(format!(" {}", styles.info.render(info)));
    } else if let Some(h) = rows {
        lines.truncate(h);
    }

    lines.join("\n")
}
