//! Full-screen demo of the alarm HUD.
//!
//! Press Delete to bring the HUD up, then use the shortcuts on the help line.
//! `q` or `ctrl+c` quits. Logs go to a file (default `alarm-hud.log`) and are
//! filtered with `RUST_LOG`.

use alarm_hud::prelude::*;
use anyhow::Context;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, MouseMotion, Msg, Program};
use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Countdown alarm HUD")]
struct Args {
    /// Start with the help line hidden
    #[arg(long)]
    hide_info: bool,

    /// Seconds left at which the countdown turns red
    #[arg(long, default_value_t = 10)]
    alert_threshold: u64,

    /// Length of the completion flash in milliseconds
    #[arg(long, default_value_t = 500)]
    flash_ms: u64,

    /// Preset alarm target as MM:SS
    #[arg(long, value_parser = parse_target)]
    target: Option<(u32, u32)>,

    /// Where to write logs
    #[arg(long, default_value = "alarm-hud.log")]
    log_file: PathBuf,
}

fn parse_target(s: &str) -> Result<(u32, u32), String> {
    let (m, sec) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MM:SS, got {s:?}"))?;
    let m = m.trim().parse().map_err(|e| format!("bad minutes: {e}"))?;
    let sec = sec.trim().parse().map_err(|e| format!("bad seconds: {e}"))?;
    Ok((m, sec))
}

struct Settings {
    config: Config,
    target: Option<(u32, u32)>,
}

// Model::init takes no arguments, so the parsed flags are parked here.
static SETTINGS: OnceLock<Settings> = OnceLock::new();

struct App {
    hud: AlarmHud,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let (config, target) = SETTINGS
            .get()
            .map(|s| (s.config.clone(), s.target))
            .unwrap_or_default();
        let mut hud = hud_with_config(config);
        if let Some((m, s)) = target {
            hud.set_target(m, s);
        }
        hud.subscribe(|| tracing::info!("alarm rang"));
        (Self { hud }, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            let (outcome, cmd) = self.hud.handle_key(key);
            if outcome.consumed() {
                return cmd;
            }
            let ctrl_c =
                key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || key.key == KeyCode::Char('q') {
                return Some(quit());
            }
            return None;
        }
        self.hud.update(msg)
    }

    fn view(&self) -> String {
        if self.hud.initialized() {
            self.hud.view()
        } else {
            "Press Delete to show the alarm HUD, q to quit.".to_string()
        }
    }
}

// The default hook prints to stderr, which lands on top of the alternate
// screen. Caught collaborator panics still reach the hook, so log instead.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(
            location = ?info.location(),
            panic = alarm_hud::alert::panic_text(info.payload()),
            "panic"
        );
    }));
}

fn init_logging(path: &PathBuf) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    install_panic_hook();

    let config = Config::default()
        .with_show_info(!args.hide_info)
        .with_alert_threshold(Duration::from_secs(args.alert_threshold))
        .with_flash_duration(Duration::from_millis(args.flash_ms));
    tracing::debug!(?config, "starting alarm HUD demo");

    let _ = SETTINGS.set(Settings {
        config,
        target: args.target,
    });

    let program = Program::<App>::builder()
        .alt_screen(true)
        .mouse_motion(MouseMotion::Cell)
        .build()
        .context("building terminal program")?;
    program.run().await.context("running terminal program")?;
    Ok(())
}
