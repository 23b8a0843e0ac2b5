//! Game state and core simulation types
//!
//! One `World` per session, owned by the shell and mutated only by
//! [`super::step`]. Singleton critters are `Option` fields so there can never
//! be two of them, and every actor id comes from one monotonic counter.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::SessionEnd;
use super::powerup::BuffState;
use super::spawn;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start signal, no entities
    Menu,
    /// Active gameplay
    Playing,
    /// Session over, state frozen for the game-over screen
    GameOver,
}

/// Horizontal facing for sprite flipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Trail point for rendering the speed-buff streak
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub recorded_at: f64,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 12;

/// The player's dog
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    /// Remaining bark cooldown in ms, clamped at zero
    pub bark_cooldown_ms: f64,
    pub buffs: BuffState,
    /// Recent positions, newest first; recorded only while a speed buff is up
    pub trail: Vec<TrailPoint>,
}

impl Player {
    /// Fresh dog at the start position, bottom center of the yard
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(YARD_WIDTH / 2.0, YARD_HEIGHT - PLAYER_SIZE * 2.0),
            facing: Facing::Right,
            bark_cooldown_ms: 0.0,
            buffs: BuffState::default(),
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn record_trail(&mut self, now: f64) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                recorded_at: now,
            },
        );
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// An obstacle tree, placed once per session
#[derive(Debug, Clone, Copy)]
pub struct Tree {
    pub pos: Vec2,
}

/// Wave enemy: runs for the house, flees a nearby dog
#[derive(Debug, Clone)]
pub struct Squirrel {
    pub id: u32,
    pub pos: Vec2,
    pub spawned_at: f64,
    pub facing: Facing,
}

/// Bonus critter crossing the yard toward a far-side target
#[derive(Debug, Clone)]
pub struct Rabbit {
    pub id: u32,
    pub pos: Vec2,
    /// Exit point on the opposite edge
    pub target: Vec2,
    pub spawned_at: f64,
    pub facing: Facing,
}

/// Mailman behavior state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MailmanPhase {
    /// Walking a straight line for the house door
    Approaching { target: Vec2 },
    /// Spotted the dog; sprints away for the rest of his life
    Evading,
}

#[derive(Debug, Clone)]
pub struct Mailman {
    pub id: u32,
    pub pos: Vec2,
    pub spawned_at: f64,
    pub facing: Facing,
    pub phase: MailmanPhase,
}

/// Bird behavior state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirdPhase {
    /// Sitting in a tree until the deadline passes; no collision
    Perched { until: f64 },
    /// Diving at the house; the angle is its travel direction
    Swooping { angle: f32 },
}

#[derive(Debug, Clone)]
pub struct Bird {
    pub id: u32,
    pub pos: Vec2,
    pub spawned_at: f64,
    pub phase: BirdPhase,
}

/// Slow wandering hazard; touching it ends the session
#[derive(Debug, Clone)]
pub struct Skunk {
    pub id: u32,
    pub pos: Vec2,
    /// Exit point on the opposite edge
    pub target: Vec2,
    pub spawned_at: f64,
    pub facing: Facing,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Treat,
    TennisBall,
}

/// The one pickup allowed on the field at a time
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub spawned_at: f64,
}

impl Pickup {
    pub fn size(&self) -> f32 {
        match self.kind {
            PickupKind::Treat => TREAT_SIZE,
            PickupKind::TennisBall => BALL_SIZE,
        }
    }
}

/// A transient visual particle: poof glyphs and "+N" score popups
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per ms, like every other velocity here
    pub vel: Vec2,
    pub life_ms: f32,
    pub initial_life_ms: f32,
    /// Font size for the renderer
    pub size: f32,
    pub rotation: f32,
    /// Radians per ms
    pub rotation_speed: f32,
    pub text: String,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Expanding bark ring registration for the renderer
#[derive(Debug, Clone, Copy)]
pub struct BarkWave {
    pub pos: Vec2,
    pub created_at: f64,
    pub max_radius: f32,
}

/// Screen shake registration, set once on loss
#[derive(Debug, Clone, Copy)]
pub struct ScreenShake {
    pub magnitude: f32,
    pub duration_ms: f64,
    pub started_at: f64,
}

/// Last-attempt timestamps for the spawn scheduler, session-clock ms
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub last_squirrel: f64,
    pub last_rabbit_attempt: f64,
    pub last_mailman_attempt: f64,
    pub last_bird_attempt: f64,
    pub last_skunk_attempt: f64,
    pub last_treat_attempt: f64,
    pub last_ball_attempt: f64,
    /// The mailman shows up at most once per session
    pub mailman_has_spawned: bool,
}

/// Complete world state for one session
#[derive(Debug, Clone)]
pub struct World {
    /// Session seed for reproducibility
    pub seed: u64,
    /// All gameplay randomness flows through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Session clock in ms, accumulated from the deltas fed to `step`
    pub clock_ms: f64,
    pub score: u32,
    pub player: Player,
    pub squirrels: Vec<Squirrel>,
    pub rabbit: Option<Rabbit>,
    pub mailman: Option<Mailman>,
    pub bird: Option<Bird>,
    pub skunk: Option<Skunk>,
    pub pickup: Option<Pickup>,
    /// Immutable after generation
    pub trees: Vec<Tree>,
    /// Visual only, never gameplay-affecting
    pub particles: Vec<Particle>,
    pub bark_wave: Option<BarkWave>,
    pub shake: Option<ScreenShake>,
    /// Set exactly once when the session ends
    pub outcome: Option<SessionEnd>,
    pub spawn: SpawnTimers,
    next_id: u32,
}

impl World {
    /// New world in the menu phase, nothing spawned yet
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            clock_ms: 0.0,
            score: 0,
            player: Player::spawn(),
            squirrels: Vec::new(),
            rabbit: None,
            mailman: None,
            bird: None,
            skunk: None,
            pickup: None,
            trees: Vec::new(),
            particles: Vec::new(),
            bark_wave: None,
            shake: None,
            outcome: None,
            spawn: SpawnTimers::default(),
            next_id: 1,
        }
    }

    /// Wipe the session back to a clean slate: fresh scenery, player at the
    /// start position, empty collections, zeroed score/clock/timers.
    pub fn reset(&mut self) {
        self.clock_ms = 0.0;
        self.score = 0;
        self.player = Player::spawn();
        self.squirrels.clear();
        self.rabbit = None;
        self.mailman = None;
        self.bird = None;
        self.skunk = None;
        self.pickup = None;
        self.particles.clear();
        self.bark_wave = None;
        self.shake = None;
        self.outcome = None;
        self.spawn = SpawnTimers::default();
        self.next_id = 1;
        self.trees = spawn::generate_trees(&mut self.rng);
    }

    /// Reset and begin playing
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("session started, seed {}", self.seed);
    }

    /// Allocate a new actor id
    pub fn next_actor_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push a particle unless the pool is full
    pub fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    /// Burst of sparkle glyphs where a critter got caught
    pub fn spawn_poof(&mut self, pos: Vec2) {
        use rand::Rng;
        const COUNT: usize = 15;
        for i in 0..COUNT {
            let angle = (i as f32 / COUNT as f32) * std::f32::consts::TAU
                + self.rng.random_range(0.0..0.5);
            let speed = self.rng.random_range(0.06..0.18);
            let life = self.rng.random_range(300.0..700.0);
            let particle = Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life_ms: life,
                initial_life_ms: life,
                size: self.rng.random_range(10.0..20.0),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self.rng.random_range(-0.006..0.006),
                text: "✨".to_string(),
            };
            self.push_particle(particle);
        }
    }

    /// Gold "+N" text drifting up from where the points were earned
    pub fn spawn_score_popup(&mut self, pos: Vec2, points: u32) {
        self.push_particle(Particle {
            pos,
            vel: Vec2::new(0.0, -0.06),
            life_ms: 1000.0,
            initial_life_ms: 1000.0,
            size: 25.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            text: format!("+{points}"),
        });
    }
}
