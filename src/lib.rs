//! Yard Patrol - a backyard defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `highscores`: Local leaderboard with JSON persistence
//! - `settings`: Player-tunable options with JSON persistence
//!
//! The simulation is headless: rendering, input capture, and audio playback are
//! external. A shell feeds `sim::step` a per-frame input and elapsed milliseconds
//! and consumes the returned events (sound cues, session end).

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// All speeds are in pixels per millisecond and get scaled by the frame delta,
/// so behavior is frame-rate independent. Durations and intervals are in
/// milliseconds of session-clock time.
pub mod consts {
    /// Yard dimensions
    pub const YARD_WIDTH: f32 = 800.0;
    pub const YARD_HEIGHT: f32 = 600.0;

    /// Player (the dog)
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 0.25;
    /// Bark area attack
    pub const BARK_COOLDOWN_MS: f64 = 5000.0;
    pub const BARK_RADIUS: f32 = 200.0;
    /// Lifetime of the expanding bark ring handed to the renderer
    pub const BARK_WAVE_LIFETIME_MS: f64 = 400.0;
    /// Creatures closer than this run from the dog
    pub const DOG_SCARE_RADIUS: f32 = 100.0;

    /// House - a compound rect shape centered in the yard
    pub const HOUSE_SIZE: f32 = 135.0;
    pub const HOUSE_X: f32 = (YARD_WIDTH - HOUSE_SIZE) / 2.0;
    pub const HOUSE_Y: f32 = (YARD_HEIGHT - HOUSE_SIZE) / 2.0;

    /// Squirrels - the basic wave enemy
    pub const SQUIRREL_SIZE: f32 = 25.0;
    pub const SQUIRREL_SPEED: f32 = 0.09;
    pub const SQUIRREL_POINTS: u32 = 1;
    /// Spawn interval ramps from the initial value down to the minimum
    /// across the difficulty window
    pub const SQUIRREL_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const SQUIRREL_SPAWN_INTERVAL_MIN_MS: f64 = 300.0;
    pub const DIFFICULTY_RAMP_MS: f64 = 60_000.0;

    /// Rabbit - fast bonus critter crossing the yard
    pub const RABBIT_SIZE: f32 = 30.0;
    pub const RABBIT_SPEED: f32 = 0.20;
    pub const RABBIT_POINTS: u32 = 5;
    pub const RABBIT_SPAWN_INTERVAL_MS: f64 = 20_000.0;
    pub const RABBIT_SPAWN_CHANCE: f64 = 0.3;
    pub const RABBIT_EVADE_RADIUS: f32 = DOG_SCARE_RADIUS * 1.5;
    pub const RABBIT_EVADE_SPEED_MULT: f32 = 1.3;

    /// Mailman - shows up at most once per session
    pub const MAILMAN_SIZE: f32 = 45.0;
    pub const MAILMAN_SPEED: f32 = 0.10;
    pub const MAILMAN_POINTS: u32 = 10;
    pub const MAILMAN_FIRST_MS: f64 = 30_000.0;
    pub const MAILMAN_SPAWN_INTERVAL_MS: f64 = 20_000.0;
    pub const MAILMAN_SPAWN_CHANCE: f64 = 0.35;
    pub const MAILMAN_EVADE_RADIUS: f32 = 130.0;
    pub const MAILMAN_EVADE_SPEED_MULT: f32 = 2.8;

    /// Bird - perches in a tree, then dives at the house
    pub const BIRD_SIZE: f32 = 30.0;
    pub const BIRD_SWOOP_SPEED: f32 = 0.13;
    pub const BIRD_POINTS: u32 = 3;
    pub const BIRD_FIRST_MS: f64 = 25_000.0;
    pub const BIRD_SPAWN_INTERVAL_MS: f64 = 18_000.0;
    pub const BIRD_SPAWN_CHANCE: f64 = 0.5;
    pub const BIRD_PERCH_MIN_MS: f64 = 4000.0;
    pub const BIRD_PERCH_MAX_MS: f64 = 9000.0;
    pub const BIRD_PERCH_OFFSET: f32 = TREE_SIZE * 0.45;

    /// Skunk - slow wandering hazard, touching it ends the game
    pub const SKUNK_SIZE: f32 = 35.0;
    pub const SKUNK_SPEED: f32 = 0.045;
    pub const SKUNK_FIRST_MS: f64 = 45_000.0;
    pub const SKUNK_SPAWN_INTERVAL_MS: f64 = 25_000.0;
    pub const SKUNK_SPAWN_CHANCE: f64 = 0.3;

    /// Treat pickup - small speed boost plus free barks
    pub const TREAT_SIZE: f32 = 30.0;
    pub const TREAT_SPAWN_INTERVAL_MS: f64 = 17_250.0;
    /// Treats never land within this distance of the house center
    pub const TREAT_HOUSE_CLEARANCE: f32 = 150.0;
    pub const TREAT_BUFF_MS: f64 = 8000.0;
    pub const TREAT_SPEED_MULT: f32 = 1.05;

    /// Tennis ball pickup - zoomies
    pub const BALL_SIZE: f32 = 25.0;
    pub const BALL_SPAWN_INTERVAL_MS: f64 = 23_000.0;
    pub const ZOOMIES_MS: f64 = 6000.0;
    pub const ZOOMIES_SPEED_MULT: f32 = 1.35;

    /// Pickup placement sampling
    pub const PICKUP_MARGIN: f32 = 50.0;
    pub const PICKUP_TREE_CLEARANCE: f32 = 60.0;
    pub const PICKUP_PLACEMENT_ATTEMPTS: u32 = 50;

    /// Trees
    pub const NUM_TREES: usize = 5;
    pub const TREE_SIZE: f32 = 60.0;
    pub const MIN_TREE_DISTANCE: f32 = 120.0;
    pub const TREE_HOUSE_BUFFER: f32 = 100.0;
    pub const TREE_PLAYER_BUFFER: f32 = 100.0;
    pub const TREE_PLACEMENT_ATTEMPTS: u32 = 100;

    /// On-screen control overlays hug the yard's left and right mid edges;
    /// nothing spawns under them
    pub const CONTROL_ZONE_RADIUS: f32 = 110.0;

    /// Loss feedback handed to the renderer
    pub const SHAKE_MAGNITUDE: f32 = 20.0;
    pub const SHAKE_DURATION_MS: f64 = 500.0;
}
