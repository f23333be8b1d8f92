//! Tests for the HUD component.

use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertSink, Silent};
    use crate::config::Config;
    use crate::timer::{Field, TickMsg};
    use crate::Component;
    use bubbletea_rs::{KeyMsg, MouseMsg, Msg, WindowSizeMsg};
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use lipgloss_extras::lipgloss;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn press(key: KeyCode) -> KeyMsg {
        KeyMsg {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(hud: &mut Model, code: KeyCode) -> KeyOutcome {
        hud.handle_key(&press(code)).0
    }

    fn ready() -> Model {
        let mut hud = new().with_alert(Silent);
        hud.initialize();
        hud
    }

    fn with_alarm_counter(hud: &mut Model) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        hud.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    fn pending_tick(hud: &Model) -> TickMsg {
        hud.timer().current_tick()
    }

    fn deliver_tick(hud: &mut Model) {
        let tick = pending_tick(hud);
        hud.update(Box::new(tick) as Msg);
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseMsg {
        MouseMsg {
            x,
            y,
            button: kind,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_is_uninitialized_and_blank() {
        let hud = new();
        assert!(!hud.initialized());
        assert!(hud.focused());
        assert_eq!(hud.view(), "");
        assert_eq!(hud.timer_state(), Default::default());
    }

    #[test]
    fn test_only_delete_initializes() {
        let mut hud = new().with_alert(Silent);
        assert_eq!(key(&mut hud, KeyCode::Char('u')), KeyOutcome::Ignored);
        assert_eq!(key(&mut hud, KeyCode::Insert), KeyOutcome::Ignored);
        assert!(!hud.initialized());

        assert_eq!(key(&mut hud, KeyCode::Delete), KeyOutcome::Consumed);
        assert!(hud.initialized());
        assert!(!hud.view().is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut hud = new().with_alert(Silent);
        assert!(hud.initialize());
        key(&mut hud, KeyCode::Up);
        assert!(!hud.initialize());
        assert_eq!(key(&mut hud, KeyCode::Delete), KeyOutcome::Ignored);
        assert_eq!(hud.timer_state().target_minutes, 1);
    }

    #[test]
    fn test_blurred_hud_ignores_everything() {
        let mut hud = new().with_alert(Silent);
        hud.blur();
        assert_eq!(key(&mut hud, KeyCode::Delete), KeyOutcome::Ignored);
        assert!(!hud.initialized());

        hud.focus();
        hud.initialize();
        hud.blur();
        assert_eq!(key(&mut hud, KeyCode::Up), KeyOutcome::Ignored);
        assert_eq!(key(&mut hud, KeyCode::Insert), KeyOutcome::Ignored);
        assert_eq!(hud.timer_state().target_minutes, 0);
        assert!(!hud.view_state().hud_hidden);
    }

    #[test]
    fn test_five_second_alarm_scenario() {
        let mut hud = ready();
        let alarms = with_alarm_counter(&mut hud);

        key(&mut hud, KeyCode::Right);
        for _ in 0..5 {
            key(&mut hud, KeyCode::Up);
        }
        let (outcome, cmd) = hud.handle_key(&press(KeyCode::Char('U')));
        assert_eq!(outcome, KeyOutcome::Consumed);
        assert!(cmd.is_some());
        assert!(hud.timer_state().running);

        for _ in 0..5 {
            deliver_tick(&mut hud);
        }

        let snap = hud.snapshot();
        assert_eq!(snap.countdown, "00:00");
        assert_eq!(snap.status, Status::Idle);
        assert_eq!(snap.color, HudColor::Flash);
        assert!(!hud.timer_state().running);
        assert_eq!(alarms.load(Ordering::SeqCst), 1);

        // A leftover tick after completion changes nothing.
        deliver_tick(&mut hud);
        assert_eq!(alarms.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_u_with_zero_target_does_not_start() {
        let mut hud = ready();
        let (outcome, cmd) = hud.handle_key(&press(KeyCode::Char('u')));
        assert_eq!(outcome, KeyOutcome::Consumed);
        assert!(cmd.is_none());
        assert!(!hud.timer_state().running);
    }

    #[test]
    fn test_u_toggles_running() {
        let mut hud = ready();
        hud.set_target(0, 30);
        key(&mut hud, KeyCode::Char('u'));
        deliver_tick(&mut hud);
        key(&mut hud, KeyCode::Char('u'));
        assert!(!hud.timer_state().running);
        assert_eq!(hud.timer_state().remaining_seconds, 29);
    }

    #[test]
    fn test_restart_mid_countdown() {
        let mut hud = ready();
        hud.set_target(1, 0);
        key(&mut hud, KeyCode::Char('u'));
        for _ in 0..15 {
            deliver_tick(&mut hud);
        }
        assert_eq!(hud.timer_state().remaining_seconds, 45);

        let (_, cmd) = hud.handle_key(&press(KeyCode::Char('l')));
        assert!(cmd.is_some());
        assert!(hud.timer_state().running);
        assert_eq!(hud.timer_state().remaining_seconds, 60);

        deliver_tick(&mut hud);
        assert_eq!(hud.timer_state().remaining_seconds, 59);
    }

    #[test]
    fn test_reset_cancels_in_flight_tick() {
        let mut hud = ready();
        hud.set_target(0, 20);
        key(&mut hud, KeyCode::Char('u'));
        deliver_tick(&mut hud);
        let stale = pending_tick(&hud);

        key(&mut hud, KeyCode::Char('i'));
        assert!(!hud.timer_state().running);
        assert_eq!(hud.timer_state().remaining_seconds, 20);

        hud.update(Box::new(stale) as Msg);
        assert_eq!(hud.timer_state().remaining_seconds, 20);
    }

    #[test]
    fn test_seconds_clamped_at_59() {
        let mut hud = ready();
        hud.set_target(2, 59);
        key(&mut hud, KeyCode::Right);
        key(&mut hud, KeyCode::Up);
        assert_eq!(hud.timer_state().target_seconds, 59);
        assert_eq!(hud.timer_state().target_minutes, 2);
    }

    #[test]
    fn test_down_at_zero_stays_zero() {
        let mut hud = ready();
        key(&mut hud, KeyCode::Down);
        key(&mut hud, KeyCode::Right);
        key(&mut hud, KeyCode::Down);
        assert_eq!(hud.timer_state().target_minutes, 0);
        assert_eq!(hud.timer_state().target_seconds, 0);
    }

    #[test]
    fn test_arrows_select_field() {
        let mut hud = ready();
        assert_eq!(hud.view_state().active_field, Field::Minutes);
        key(&mut hud, KeyCode::Right);
        assert_eq!(hud.view_state().active_field, Field::Seconds);
        assert!(hud.snapshot().seconds_highlighted);
        key(&mut hud, KeyCode::Left);
        assert_eq!(hud.view_state().active_field, Field::Minutes);
    }

    #[test]
    fn test_edit_while_running_keeps_countdown() {
        let mut hud = ready();
        hud.set_target(0, 10);
        key(&mut hud, KeyCode::Char('u'));
        key(&mut hud, KeyCode::Up);
        assert_eq!(hud.timer_state().target_minutes, 1);
        assert_eq!(hud.timer_state().remaining_seconds, 10);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let mut hud = ready();
        let before = *hud.view_state();
        for code in [KeyCode::Insert, KeyCode::Home, KeyCode::PageUp] {
            assert_eq!(key(&mut hud, code), KeyOutcome::Consumed);
            assert_ne!(*hud.view_state(), before);
            assert_eq!(key(&mut hud, code), KeyOutcome::Consumed);
            assert_eq!(*hud.view_state(), before);
        }
    }

    #[test]
    fn test_hidden_hud_only_takes_toggles() {
        let mut hud = ready();
        hud.set_target(0, 30);
        key(&mut hud, KeyCode::Insert);
        assert!(hud.view_state().hud_hidden);

        for code in [
            KeyCode::Char('u'),
            KeyCode::Char('l'),
            KeyCode::Char('i'),
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
        ] {
            assert_eq!(key(&mut hud, code), KeyOutcome::Ignored);
        }
        assert_eq!(hud.timer_state().target_seconds, 30);
        assert!(!hud.timer_state().running);
        assert_eq!(hud.view_state().active_field, Field::Minutes);

        assert_eq!(key(&mut hud, KeyCode::Home), KeyOutcome::Consumed);
        assert_eq!(key(&mut hud, KeyCode::PageUp), KeyOutcome::Consumed);
        assert!(hud.view_state().hud_locked);
        assert!(!hud.view_state().info_visible);
    }

    #[test]
    fn test_hidden_view_is_empty_and_info_is_remembered() {
        let mut hud = ready();
        key(&mut hud, KeyCode::Insert);
        assert_eq!(hud.view(), "");
        key(&mut hud, KeyCode::Insert);
        assert!(hud.snapshot().info_visible);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut hud = ready();
        assert_eq!(key(&mut hud, KeyCode::Char('x')), KeyOutcome::Ignored);
        assert_eq!(key(&mut hud, KeyCode::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_view_shows_countdown_and_help() {
        let mut hud = ready();
        hud.set_target(1, 5);
        let out = lipgloss::strip_ansi(&hud.view());
        assert!(out.contains("01:05"));
        assert!(out.contains("Alarm: 01:05"));
        assert!(out.contains("↑↓ change value | ←→ switch field"));
        assert!(out.contains(
            "Delete = init | U = start/stop | L = restart | I = reset | Arrows = set time | Ins = hide/show | Home = lock | PgUp = toggle help"
        ));

        key(&mut hud, KeyCode::PageUp);
        let out = lipgloss::strip_ansi(&hud.view());
        assert!(!out.contains("Delete = init"));
    }

    #[test]
    fn test_info_hidden_by_config() {
        let mut hud = with_config(Config::default().with_show_info(false)).with_alert(Silent);
        hud.initialize();
        assert!(!hud.snapshot().info_visible);
    }

    #[test]
    fn test_flash_end_clears_flash() {
        let mut hud = ready();
        hud.set_target(0, 1);
        key(&mut hud, KeyCode::Char('u'));
        deliver_tick(&mut hud);
        assert!(hud.view_state().flashing);

        let stale = FlashEndMsg {
            id: hud.id(),
            tag: 0,
        };
        hud.update(Box::new(stale) as Msg);
        assert!(hud.view_state().flashing);

        let current = FlashEndMsg {
            id: hud.id(),
            tag: 1,
        };
        hud.update(Box::new(current) as Msg);
        assert!(!hud.view_state().flashing);
        assert_eq!(hud.snapshot().color, HudColor::Alert);
    }

    #[tokio::test]
    async fn test_completion_schedules_flash_end() {
        let config = Config::default()
            .with_flash_duration(std::time::Duration::from_millis(5))
            .with_tick_interval(std::time::Duration::from_millis(5));
        let mut hud = with_config(config).with_alert(Silent);
        hud.initialize();
        hud.set_target(0, 1);

        let tick_cmd = hud
            .handle_key(&press(KeyCode::Char('u')))
            .1
            .expect("start should schedule a tick");
        let tick = tick_cmd.await.expect("tick message");
        let flash_cmd = hud.update(tick).expect("completion should schedule flash end");
        assert!(hud.view_state().flashing);

        let flash_end = flash_cmd.await.expect("flash end message");
        assert!(hud.update(flash_end).is_none());
        assert!(!hud.view_state().flashing);
    }

    struct Exploding;

    impl AlertSink for Exploding {
        fn play_alert(&self) {
            panic!("no audio device");
        }
    }

    #[test]
    fn test_failing_alert_does_not_stop_alarm() {
        let mut hud = new().with_alert(Exploding);
        hud.initialize();
        let alarms = with_alarm_counter(&mut hud);
        hud.set_target(0, 2);
        key(&mut hud, KeyCode::Char('u'));
        deliver_tick(&mut hud);
        deliver_tick(&mut hud);

        assert_eq!(alarms.load(Ordering::SeqCst), 1);
        assert!(hud.view_state().flashing);

        // The HUD keeps working afterwards.
        let (_, cmd) = hud.handle_key(&press(KeyCode::Char('l')));
        assert!(cmd.is_some());
        assert_eq!(hud.timer_state().remaining_seconds, 2);
    }

    #[test]
    fn test_drag_moves_hud() {
        let mut hud = ready();
        hud.update(Box::new(WindowSizeMsg {
            width: 80,
            height: 24,
        }) as Msg);
        let start = hud.view_state().position;
        assert_eq!(start, Position { x: 1, y: 1 });

        assert_eq!(
            hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1)),
            KeyOutcome::Consumed
        );
        assert!(hud.dragging());

        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 4));
        assert_eq!(hud.view_state().position, Position { x: 11, y: 4 });

        hud.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 4));
        assert!(!hud.dragging());

        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 30, 10));
        assert_eq!(hud.view_state().position, Position { x: 11, y: 4 });
    }

    fn resize(hud: &mut Model, width: u16, height: u16) {
        hud.update(Box::new(WindowSizeMsg { width, height }) as Msg);
    }

    fn frame_rows(hud: &Model) -> Vec<String> {
        hud.view().split('\n').map(|r| lipgloss::strip_ansi(r)).collect()
    }

    #[test]
    fn test_drag_stays_on_screen() {
        let mut hud = ready();
        resize(&mut hud, 40, 10);
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 200, 200));
        let p = hud.view_state().position;
        // 10 rows: 3 for the panel and the last one for the help line.
        assert_eq!(p.y, 6);
        assert!(p.x < 40);
    }

    #[test]
    fn test_drag_to_bottom_keeps_help_on_last_row() {
        let mut hud = ready();
        resize(&mut hud, 80, 10);
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 2, 200));

        let rows = frame_rows(&hud);
        assert_eq!(rows.len(), 10);
        assert!(rows[6].contains("00:00"));
        assert!(rows[9].contains("Delete = init"));
    }

    #[test]
    fn test_drag_to_bottom_without_help_uses_last_row() {
        let mut hud = ready();
        key(&mut hud, KeyCode::PageUp);
        resize(&mut hud, 80, 10);
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 2, 200));
        assert_eq!(hud.view_state().position.y, 7);

        // Bringing the help line back makes room for it.
        key(&mut hud, KeyCode::PageUp);
        assert_eq!(hud.view_state().position.y, 6);
        assert_eq!(frame_rows(&hud).len(), 10);
    }

    #[test]
    fn test_shrinking_window_pulls_hud_back() {
        let mut hud = ready();
        resize(&mut hud, 80, 24);
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        hud.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 19));
        hud.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 19));
        assert_eq!(hud.view_state().position, Position { x: 19, y: 19 });

        resize(&mut hud, 30, 8);
        let p = hud.view_state().position;
        assert_eq!(p.y, 4);
        assert!(p.x < 30);
        assert_eq!(frame_rows(&hud).len(), 8);
    }

    #[test]
    fn test_press_outside_panel_does_not_drag() {
        let mut hud = ready();
        assert_eq!(
            hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 70, 20)),
            KeyOutcome::Ignored
        );
        assert!(!hud.dragging());
    }

    #[test]
    fn test_locked_hud_cannot_be_dragged() {
        let mut hud = ready();
        key(&mut hud, KeyCode::Home);
        assert_eq!(
            hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1)),
            KeyOutcome::Ignored
        );
        assert!(!hud.dragging());
    }

    #[test]
    fn test_lock_hide_and_blur_end_drag() {
        for end in [KeyCode::Home, KeyCode::Insert] {
            let mut hud = ready();
            hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
            assert!(hud.dragging());
            key(&mut hud, end);
            assert!(!hud.dragging());
        }

        let mut hud = ready();
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        hud.blur();
        assert!(!hud.dragging());
    }

    #[test]
    fn test_other_button_ends_drag() {
        let mut hud = ready();
        hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        assert_eq!(
            hud.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 5, 5)),
            KeyOutcome::Consumed
        );
        assert!(!hud.dragging());
    }

    #[test]
    fn test_key_msg_through_update() {
        let mut hud = new().with_alert(Silent);
        hud.update(Box::new(press(KeyCode::Delete)) as Msg);
        assert!(hud.initialized());
        hud.update(Box::new(press(KeyCode::Up)) as Msg);
        assert_eq!(hud.timer_state().target_minutes, 1);
    }
}
