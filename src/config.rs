//! HUD configuration.

use crate::hud::Position;
use std::time::Duration;

/// Tunables for the HUD. All fields have sensible defaults and can be set
/// with the `with_*` builders.
///
/// ```rust
/// use alarm_hud::Config;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_show_info(false)
///     .with_flash_duration(Duration::from_millis(250));
/// assert!(!config.show_info_by_default);
/// assert_eq!(config.alert_threshold, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether the help line is visible right after initialization.
    pub show_info_by_default: bool,
    /// At or below this much remaining time the countdown turns to the alert
    /// color.
    pub alert_threshold: Duration,
    /// How long the completion flash lasts.
    pub flash_duration: Duration,
    /// Delay between countdown ticks. Each tick is one second of countdown.
    pub tick_interval: Duration,
    /// Where the HUD's top-left corner starts.
    pub origin: Position,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_info_by_default: true,
            alert_threshold: Duration::from_secs(10),
            flash_duration: Duration::from_millis(500),
            tick_interval: Duration::from_secs(1),
            origin: Position { x: 1, y: 1 },
        }
    }
}

impl Config {
    /// Sets whether the help line starts visible.
    pub fn with_show_info(mut self, show: bool) -> Self {
        self.show_info_by_default = show;
        self
    }

    /// Sets the remaining time at which the countdown turns to the alert color.
    pub fn with_alert_threshold(mut self, threshold: Duration) -> Self {
        self.alert_threshold = threshold;
        self
    }

    /// Sets how long the completion flash lasts.
    pub fn with_flash_duration(mut self, duration: Duration) -> Self {
        self.flash_duration = duration;
        self
    }

    /// Sets the delay between countdown ticks.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets where the HUD starts.
    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    /// Alert threshold in whole seconds.
    pub(crate) fn alert_threshold_secs(&self) -> u32 {
        u32::try_from(self.alert_threshold.as_secs()).unwrap_or(u32::MAX)
    }
}
