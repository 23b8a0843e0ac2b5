//! Yard Patrol entry point
//!
//! Headless demo: the built-in pilot patrols the yard at a fixed 60 Hz
//! timestep until the session ends, then records the run on the local
//! leaderboard. Pass a number as the first argument to pin the seed.

use std::time::{SystemTime, UNIX_EPOCH};

use yard_patrol::sim::{FrameInput, GamePhase, World, step};
use yard_patrol::{HighScores, Settings};

/// Fixed demo timestep, milliseconds (60 Hz)
const DEMO_DT_MS: f64 = 1000.0 / 60.0;
/// Stop a demo session that somehow never ends (10 sim-minutes)
const DEMO_LIMIT_MS: f64 = 600_000.0;

fn main() {
    env_logger::init();
    log::info!("Yard Patrol (headless demo) starting...");

    let settings = Settings::load_from(&Settings::default_path());
    let mut highscores = HighScores::load_from(&HighScores::default_path());

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

    let mut world = World::new(seed);
    world.start();

    let input = FrameInput {
        autopilot: true,
        ..Default::default()
    };
    let mut last_logged_score = 0;
    while world.phase == GamePhase::Playing && world.clock_ms < DEMO_LIMIT_MS {
        let events = step(&mut world, &input, DEMO_DT_MS);
        if settings.sfx_volume > 0.0 {
            for cue in &events.cues {
                log::debug!("cue: {cue:?}");
            }
        }
        if world.score >= last_logged_score + 10 {
            last_logged_score = world.score;
            log::info!("score {} at {:.0}s", world.score, world.clock_ms / 1000.0);
        }
        if let Some(end) = events.session_end {
            log::info!("session over: {:?}", end.cause);
        }
    }

    println!(
        "Demo session: seed {seed}, score {}, survived {:.0}s",
        world.score,
        world.clock_ms / 1000.0
    );

    if let Some(rank) = highscores.add_score(world.score, world.clock_ms as u64, unix_now_ms()) {
        println!("New high score! Rank #{rank}");
        highscores.save_to(&HighScores::default_path());
    }
    if let Some(top) = highscores.top_score() {
        println!("Best on this machine: {top}");
    }
}

/// Wall-clock milliseconds since the Unix epoch, for leaderboard stamps
fn unix_now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
