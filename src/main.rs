//! Star Dodger entry point
//!
//! Without a host window this runs a headless demo: a simple autopilot
//! flies the rocket until it crashes or the demo time runs out. Frames
//! run on a simulated 60 Hz clock, or on the wall clock with `--realtime`.
//!
//! Usage: `star-dodger [--realtime] [--write-settings <path>] [settings.json]`

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use star_dodger::audio::LogAudio;
use star_dodger::input::{Button, Command};
use star_dodger::platform::{Clock, ManualClock, NullSurface, SystemClock};
use star_dodger::sim::{GameSession, Viewport};
use star_dodger::{Game, Settings};

/// Simulated display refresh interval
const FRAME_MS: f64 = 1000.0 / 60.0;

/// How far ahead (px) the autopilot looks for threats
const LOOKAHEAD: f32 = 260.0;

/// Pick a dodge for the nearest planet heading into the rocket's lane
fn autopilot(session: &GameSession) -> Option<Button> {
    let player = &session.player;
    let top = player.pos.y;
    let bottom = top + player.size.y;
    let right = player.pos.x + player.size.x;

    let threat = session
        .obstacles
        .iter()
        .filter(|obs| obs.pos.x + obs.size.x > player.pos.x && obs.pos.x - right < LOOKAHEAD)
        .filter(|obs| obs.pos.y < bottom + 10.0 && obs.pos.y + obs.size.y > top - 10.0)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;

    let room_above = threat.pos.y - player.size.y;
    let room_below = session.viewport.height - (threat.pos.y + threat.size.y) - player.size.y;
    if room_above >= room_below {
        Some(Button::Up)
    } else {
        Some(Button::Down)
    }
}

#[derive(Debug, Default)]
struct Args {
    realtime: bool,
    write_settings: Option<PathBuf>,
    settings: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realtime" => args.realtime = true,
            "--write-settings" => match iter.next() {
                Some(path) => args.write_settings = Some(path.into()),
                None => log::warn!("--write-settings needs a path"),
            },
            _ => args.settings = Some(arg.into()),
        }
    }
    args
}

fn main() {
    env_logger::init();

    let args = parse_args();
    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(path) = &args.write_settings {
        match settings.save_to(path) {
            Ok(()) => log::info!("Wrote settings to {}", path.display()),
            Err(e) => log::error!("Failed to write settings to {}: {}", path.display(), e),
        }
    }
    log::info!("Star Dodger (headless) starting...");

    let viewport = Viewport::from_window(1280.0, 800.0, settings.viewport_scale);
    let demo_ms = settings.demo_seconds * 1000.0;
    let mut game = Game::new(settings, viewport, LogAudio);
    let mut surface = NullSurface;

    let manual = ManualClock::new(0.0);
    let system = SystemClock::new();
    let clock: &dyn Clock = if args.realtime { &system } else { &manual };
    let frame_interval = Duration::from_secs_f64(FRAME_MS / 1000.0);

    let mut frames = 0u64;
    while game.is_running() && clock.now_ms() < demo_ms {
        if args.realtime {
            thread::sleep(frame_interval);
        } else {
            manual.advance(FRAME_MS);
        }
        if let Some(button) = autopilot(game.session()) {
            game.command(Command::from(button));
        }
        game.run_frame(clock, &viewport, &mut surface);
        frames += 1;
    }

    let session = game.session();
    let outcome = if game.is_running() { "survived" } else { "crashed" };
    log::info!(
        "Demo {} after {:.1}s ({} frames): score {}",
        outcome,
        clock.now_ms() / 1000.0,
        frames,
        session.score
    );
    println!("{} with score {} (seed {})", outcome, session.score, session.seed);
}
