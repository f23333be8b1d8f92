//! The HUD model: key dispatch, tick handling, flashing and dragging.

use super::drag::{Bounds, DragSession};
use super::keymap::{default_key_map, KeyMap};
use super::types::{FlashEndMsg, KeyOutcome, ViewState};
use super::view::{self, RenderSnapshot, Styles};
use crate::alert::{self, AlarmSink, AlertSink, TerminalBell};
use crate::config::Config;
use crate::help;
use crate::timer::{self, Field, TickMsg, TickOutcome, TimerState};
use crate::Component;
use bubbletea_rs::{
    tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg, WindowSizeMsg,
};
use crossterm::event::{MouseButton, MouseEventKind};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// The alarm HUD.
///
/// One value is one widget. It renders nothing and accepts only the init key
/// until [`Model::initialize`] runs (or Delete is pressed); initializing again
/// is a no-op.
pub struct Model {
    timer: timer::Model,
    view: ViewState,
    config: Config,
    /// Bindings for every HUD command. Rebind keys by replacing entries.
    pub keymap: KeyMap,
    /// Colors for the panel and the help line.
    pub styles: Styles,
    /// Renders the bottom help line.
    pub info_help: help::Model,
    /// Renders the hint inside the alarm panel.
    pub panel_help: help::Model,
    id: i64,
    initialized: bool,
    focused: bool,
    flash_tag: i64,
    drag: Option<DragSession>,
    window: Option<(u16, u16)>,
    alert: Box<dyn AlertSink>,
    subscribers: Vec<Box<dyn AlarmSink>>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("initialized", &self.initialized)
            .field("focused", &self.focused)
            .field("timer", &self.timer.state())
            .field("view", &self.view)
            .field("dragging", &self.drag.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Creates an uninitialized HUD with the default configuration.
pub fn new() -> Model {
    with_config(Config::default())
}

/// Creates an uninitialized HUD with `config`.
pub fn with_config(config: Config) -> Model {
    Model {
        timer: timer::new_with_interval(config.tick_interval),
        view: ViewState::new(config.show_info_by_default, config.origin),
        keymap: default_key_map(),
        styles: Styles::default(),
        info_help: help::Model::new(),
        panel_help: help::Model::new()
            .with_key_separator(" ")
            .with_styles(help::Styles::plain()),
        id: next_id(),
        initialized: false,
        focused: true,
        flash_tag: 0,
        drag: None,
        window: None,
        alert: Box::new(TerminalBell),
        subscribers: Vec::new(),
        config,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Replaces the audible alert.
    pub fn with_alert(mut self, alert: impl AlertSink + 'static) -> Self {
        self.alert = Box::new(alert);
        self
    }

    /// Registers a subscriber for the alarm-complete signal.
    pub fn subscribe(&mut self, sink: impl AlarmSink + 'static) {
        self.subscribers.push(Box::new(sink));
    }

    /// Unique id used to filter flash messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configuration the HUD was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The countdown engine.
    pub fn timer(&self) -> &timer::Model {
        &self.timer
    }

    /// Copy of the countdown state.
    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// View-side state: active field, hide, lock, help line, position, flash.
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Whether Delete has been pressed (or [`Model::initialize`] called).
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a drag gesture is in progress.
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Brings the HUD up. Returns `false` if it was already up.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        debug!(id = self.id, "alarm HUD initialized");
        true
    }

    /// Presets the alarm target. Rescales the countdown only while idle.
    pub fn set_target(&mut self, minutes: u32, seconds: u32) {
        self.timer.set_target(minutes, seconds);
    }

    /// Dispatches one key press.
    ///
    /// The first matching command wins. Hidden HUDs only take the hide, lock
    /// and help toggles; a blurred HUD takes nothing. The returned command, if
    /// any, carries the next countdown tick.
    pub fn handle_key(&mut self, key: &KeyMsg) -> (KeyOutcome, Option<Cmd>) {
        if !self.focused {
            return (KeyOutcome::Ignored, None);
        }

        if !self.initialized {
            if self.keymap.init.matches(key) {
                self.initialize();
                return (KeyOutcome::Consumed, None);
            }
            return (KeyOutcome::Ignored, None);
        }

        if self.keymap.toggle_hud.matches(key) {
            self.toggle_hud();
            self.clamp_position();
            return (KeyOutcome::Consumed, None);
        }
        if self.keymap.toggle_lock.matches(key) {
            self.toggle_lock();
            return (KeyOutcome::Consumed, None);
        }
        if self.keymap.toggle_info.matches(key) {
            self.view.info_visible = !self.view.info_visible;
            self.clamp_position();
            debug!(info_visible = self.view.info_visible, "help line toggled");
            return (KeyOutcome::Consumed, None);
        }

        if self.view.hud_hidden {
            return (KeyOutcome::Ignored, None);
        }

        let cmd = if self.keymap.start_stop.matches(key) {
            self.timer.toggle()
        } else if self.keymap.restart.matches(key) {
            self.timer.restart()
        } else if self.keymap.reset.matches(key) {
            self.timer.reset();
            None
        } else if self.keymap.increment.matches(key) {
            self.timer.adjust(self.view.active_field, 1);
            None
        } else if self.keymap.decrement.matches(key) {
            self.timer.adjust(self.view.active_field, -1);
            None
        } else if self.keymap.select_minutes.matches(key) {
            self.view.active_field = Field::Minutes;
            None
        } else if self.keymap.select_seconds.matches(key) {
            self.view.active_field = Field::Seconds;
            None
        } else {
            return (KeyOutcome::Ignored, None);
        };

        (KeyOutcome::Consumed, cmd)
    }

    fn toggle_hud(&mut self) {
        self.view.hud_hidden = !self.view.hud_hidden;
        if self.view.hud_hidden {
            self.end_drag();
        }
        debug!(hidden = self.view.hud_hidden, "HUD visibility toggled");
    }

    fn toggle_lock(&mut self) {
        self.view.hud_locked = !self.view.hud_locked;
        if self.view.hud_locked {
            self.end_drag();
        }
        debug!(locked = self.view.hud_locked, "HUD lock toggled");
    }

    fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Handles a mouse event for dragging.
    ///
    /// A left press on the panel starts a drag unless the HUD is locked or
    /// hidden; drag events move it; any release or other button ends it.
    pub fn handle_mouse(&mut self, mouse: &MouseMsg) -> KeyOutcome {
        match mouse.button {
            MouseEventKind::Down(MouseButton::Left) => {
                self.end_drag();
                if !self.initialized || !self.snapshot().draggable {
                    return KeyOutcome::Ignored;
                }
                if !self.hit(mouse.x, mouse.y) {
                    return KeyOutcome::Ignored;
                }
                self.drag = Some(DragSession::begin(mouse.x, mouse.y, self.view.position));
                KeyOutcome::Consumed
            }
            MouseEventKind::Drag(MouseButton::Left) => match &self.drag {
                Some(drag) => {
                    self.view.position = drag.position_at(mouse.x, mouse.y, self.bounds());
                    KeyOutcome::Consumed
                }
                None => KeyOutcome::Ignored,
            },
            MouseEventKind::Up(_) | MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                if self.drag.take().is_some() {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn hit(&self, x: u16, y: u16) -> bool {
        let (w, h) = self.panel_size();
        let p = self.view.position;
        x >= p.x && y >= p.y && x < p.x.saturating_add(w) && y < p.y.saturating_add(h)
    }

    fn panel_size(&self) -> (u16, u16) {
        view::panel_size(&self.panel_lines(&self.snapshot()))
    }

    /// Room left for the panel's top-left corner. The last row belongs to the
    /// help line while it is shown.
    fn bounds(&self) -> Option<Bounds> {
        let (width, height) = self.window?;
        let (w, h) = self.panel_size();
        let reserved = u16::from(self.snapshot().info_visible);
        Some(Bounds {
            max_x: width.saturating_sub(w),
            max_y: height.saturating_sub(h).saturating_sub(reserved),
        })
    }

    /// Pulls the panel back on-screen after the window or the layout changed.
    fn clamp_position(&mut self) {
        if let Some(bounds) = self.bounds() {
            let p = &mut self.view.position;
            p.x = p.x.min(bounds.max_x);
            p.y = p.y.min(bounds.max_y);
        }
    }

    fn on_tick(&mut self, msg: &TickMsg) -> Option<Cmd> {
        match self.timer.on_tick(msg) {
            TickOutcome::Ignored => None,
            TickOutcome::Counting => self.timer.next_tick(),
            TickOutcome::Completed => Some(self.complete()),
        }
    }

    /// Flash, alert, notify. Returns the command that ends the flash.
    fn complete(&mut self) -> Cmd {
        info!(id = self.id, "alarm complete");
        self.view.flashing = true;
        self.flash_tag += 1;

        let sink = &self.alert;
        alert::guarded("alert", || sink.play_alert());
        for subscriber in self.subscribers.iter_mut() {
            alert::guarded("alarm subscriber", || subscriber.on_alarm_complete());
        }

        let id = self.id;
        let tag = self.flash_tag;
        bubbletea_tick(self.config.flash_duration, move |_| {
            FlashEndMsg { id, tag }.into()
        })
    }

    fn on_flash_end(&mut self, msg: &FlashEndMsg) {
        if msg.id == self.id && msg.tag == self.flash_tag {
            self.view.flashing = false;
        }
    }

    /// Handles any message: keys, mouse, resizes, ticks and flash ends.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key).1;
        }
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            return self.on_tick(tick);
        }
        if let Some(flash) = msg.downcast_ref::<FlashEndMsg>() {
            self.on_flash_end(flash);
            return None;
        }
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            self.handle_mouse(mouse);
            return None;
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.window = Some((size.width, size.height));
            self.clamp_position();
            return None;
        }
        None
    }

    /// The current frame, derived fresh from state.
    pub fn snapshot(&self) -> RenderSnapshot {
        view::snapshot(&self.timer.state(), &self.view, &self.config)
    }

    fn panel_lines(&self, snap: &RenderSnapshot) -> Vec<String> {
        let hint = self.panel_help.short_help_view(self.keymap.panel_hint());
        view::render_panel(snap, &self.styles, &hint)
    }

    /// Renders the HUD, or nothing before initialization.
    pub fn view(&self) -> String {
        if !self.initialized {
            return String::new();
        }
        let snap = self.snapshot();
        let panel = self.panel_lines(&snap);
        let info = self.info_help.view(&self.keymap);
        view::render_screen(
            &snap,
            &panel,
            &info,
            &self.styles,
            self.window.map(|(_, h)| h),
        )
    }
}

impl Component for Model {
    /// Gives the HUD the keyboard back.
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Call when a host text input takes focus; every key is ignored until
    /// [`Component::focus`].
    fn blur(&mut self) {
        self.focused = false;
        self.end_drag();
    }

    /// Whether keys reach the HUD.
    fn focused(&self) -> bool {
        self.focused
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
