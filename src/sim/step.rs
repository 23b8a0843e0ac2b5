//! Per-frame simulation step
//!
//! The heart of the sim: one call advances the whole world by the elapsed
//! milliseconds. Passes run in a fixed order - cooldown decay, bark,
//! movement, pickups, spawning, one pass per actor type, effect decay - and
//! the first loss detected finalizes the session and skips the rest of the
//! frame. Outside the Playing phase the step is a no-op.

use glam::Vec2;

use super::actors;
use super::collision::house_center;
use super::events::{FrameEvents, GameOverCause, SessionEnd, SoundCue};
use super::player;
use super::spawn;
use super::state::{GamePhase, ScreenShake, World};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Combined movement direction, each axis in [-1, 1]
    pub movement: Vec2,
    /// Bark requested this frame (edge trigger, acted on at most once)
    pub bark: bool,
    /// Hand control to the built-in demo pilot
    pub autopilot: bool,
}

/// Advance the world by one frame and report what happened
pub fn step(world: &mut World, input: &FrameInput, dt_ms: f64) -> FrameEvents {
    let mut events = FrameEvents::default();
    if world.phase != GamePhase::Playing {
        return events;
    }

    let dt_ms = dt_ms.max(0.0);
    world.clock_ms += dt_ms;
    let now = world.clock_ms;
    let dt = dt_ms as f32;

    // The demo pilot rewrites the input before anything reads it
    let mut input = input.clone();
    if input.autopilot {
        drive_autopilot(world, &mut input, now);
    }

    // Buff expiry is implicit in the timestamp checks; the cooldown is the
    // one timer that really counts down
    player::decay_bark_cooldown(world, dt_ms);
    if input.bark {
        player::process_bark(world, &mut events, now);
    }
    player::apply_movement(world, input.movement, dt, now);
    player::collect_pickup(world, &mut events, now);
    spawn::run(world, now);

    // Actor passes; every one of these except the rabbit can end the
    // session, and a finalized loss freezes the rest of the frame
    actors::update_squirrels(world, &mut events, dt, now);
    if world.phase != GamePhase::Playing {
        return events;
    }
    actors::update_rabbit(world, &mut events, dt, now);
    actors::update_mailman(world, &mut events, dt, now);
    if world.phase != GamePhase::Playing {
        return events;
    }
    actors::update_bird(world, &mut events, dt, now);
    if world.phase != GamePhase::Playing {
        return events;
    }
    actors::update_skunk(world, &mut events, dt, now);
    if world.phase != GamePhase::Playing {
        return events;
    }

    decay_effects(world, dt, now);

    events
}

/// Latch the end of the session: flip the phase, report exactly once, hand
/// the renderer its shake. A second hazard landing in the same frame is a
/// no-op here.
pub(super) fn finalize_loss(
    world: &mut World,
    events: &mut FrameEvents,
    cause: GameOverCause,
    now: f64,
) {
    if world.phase != GamePhase::Playing || world.outcome.is_some() {
        return;
    }
    world.phase = GamePhase::GameOver;
    let end = SessionEnd {
        score: world.score,
        cause,
    };
    world.outcome = Some(end);
    events.session_end = Some(end);
    events.cue(match cause {
        GameOverCause::SkunkSprayed => SoundCue::SkunkSpray,
        _ => SoundCue::CreatureLaugh,
    });
    world.shake = Some(ScreenShake {
        magnitude: SHAKE_MAGNITUDE,
        duration_ms: SHAKE_DURATION_MS,
        started_at: now,
    });
    log::info!("game over: {cause:?}, final score {}", world.score);
}

/// Age particles and retire the bark ring once it has fully expanded
fn decay_effects(world: &mut World, dt: f32, now: f64) {
    for particle in &mut world.particles {
        particle.pos += particle.vel * dt;
        particle.rotation += particle.rotation_speed * dt;
        particle.life_ms -= dt;
    }
    world.particles.retain(|p| p.life_ms > 0.0);

    if let Some(wave) = world.bark_wave
        && now - wave.created_at > BARK_WAVE_LIFETIME_MS
    {
        world.bark_wave = None;
    }
}

/// Simple pilot for the headless demo: stay off the skunk, bark when it
/// pays, otherwise run down the squirrel closest to the house or fetch a
/// pickup while the yard is quiet.
fn drive_autopilot(world: &World, input: &mut FrameInput, now: f64) {
    let player = &world.player;
    input.bark = false;

    if let Some(skunk) = &world.skunk {
        let away = player.pos - skunk.pos;
        if away.length() < PLAYER_SIZE / 2.0 + SKUNK_SIZE / 2.0 + 60.0 {
            input.movement = away.normalize_or_zero();
            return;
        }
    }

    let bark_ready = player.bark_cooldown_ms <= 0.0 || player.buffs.free_bark(now);
    if bark_ready {
        let squirrels_in_range = world
            .squirrels
            .iter()
            .filter(|s| s.pos.distance(player.pos) < BARK_RADIUS * 0.9)
            .count();
        let bird_in_range = world
            .bird
            .as_ref()
            .is_some_and(|b| b.pos.distance(player.pos) < BARK_RADIUS * 0.9);
        if squirrels_in_range >= 2 || bird_in_range {
            input.bark = true;
        }
    }

    let house = house_center();
    let chase = world
        .squirrels
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(house)
                .partial_cmp(&b.pos.distance_squared(house))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|s| s.pos);
    let target = match (chase, &world.pickup) {
        (None, Some(pickup)) => Some(pickup.pos),
        (found, _) => found,
    };
    input.movement = match target {
        Some(target) => (target - player.pos).normalize_or_zero(),
        None => Vec2::ZERO,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::hits_obstruction;
    use crate::sim::state::{Facing, Squirrel};
    use proptest::prelude::*;

    fn add_squirrel(world: &mut World, pos: Vec2) {
        let id = world.next_actor_id();
        world.squirrels.push(Squirrel {
            id,
            pos,
            spawned_at: 0.0,
            facing: Facing::Left,
        });
    }

    #[test]
    fn test_step_is_a_noop_in_menu() {
        let mut world = World::new(1);
        let events = step(&mut world, &FrameInput::default(), 16.0);
        assert_eq!(world.clock_ms, 0.0);
        assert!(events.cues.is_empty());
        assert!(events.session_end.is_none());
    }

    #[test]
    fn test_step_accumulates_the_clock() {
        let mut world = World::new(1);
        world.start();
        step(&mut world, &FrameInput::default(), 16.0);
        step(&mut world, &FrameInput::default(), 10.5);
        assert_eq!(world.clock_ms, 26.5);
        // Negative deltas never rewind
        step(&mut world, &FrameInput::default(), -50.0);
        assert_eq!(world.clock_ms, 26.5);
    }

    #[test]
    fn test_scenario_basic_catch() {
        let mut world = World::new(21);
        world.start();
        world.trees.clear();
        let start = world.player.pos;
        add_squirrel(&mut world, start + Vec2::new(50.0, 0.0));

        let input = FrameInput {
            movement: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        let mut caught_events = 0;
        for _ in 0..60 {
            let events = step(&mut world, &input, 16.0);
            if events.cues.contains(&SoundCue::CreatureCaught) {
                caught_events += 1;
            }
            if world.squirrels.is_empty() {
                break;
            }
        }

        assert!(world.squirrels.is_empty(), "dog never caught the squirrel");
        assert_eq!(world.score, SQUIRREL_POINTS);
        assert_eq!(caught_events, 1);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_scenario_house_breach() {
        let mut world = World::new(21);
        world.start();
        world.trees.clear();
        world.score = 9;
        add_squirrel(&mut world, house_center());

        let events = step(&mut world, &FrameInput::default(), 16.0);

        assert_eq!(world.phase, GamePhase::GameOver);
        let end = events.session_end.expect("loss must be reported");
        assert_eq!(end.cause, GameOverCause::SquirrelReachedHouse);
        assert_eq!(end.score, 9);
    }

    #[test]
    fn test_loss_is_latched() {
        let mut world = World::new(21);
        world.start();
        world.trees.clear();
        add_squirrel(&mut world, house_center());

        let first = step(&mut world, &FrameInput::default(), 16.0);
        assert!(first.session_end.is_some());
        let frozen_clock = world.clock_ms;

        // The ended session neither advances nor reports again
        for _ in 0..5 {
            let later = step(&mut world, &FrameInput::default(), 16.0);
            assert!(later.session_end.is_none());
            assert!(later.cues.is_empty());
        }
        assert_eq!(world.clock_ms, frozen_clock);
        assert!(world.outcome.is_some());
    }

    #[test]
    fn test_two_breaches_report_once() {
        let mut world = World::new(21);
        world.start();
        world.trees.clear();
        // Two squirrels inside the house on the same frame
        add_squirrel(&mut world, house_center() + Vec2::new(-10.0, 0.0));
        add_squirrel(&mut world, house_center() + Vec2::new(10.0, 0.0));

        let events = step(&mut world, &FrameInput::default(), 16.0);

        assert!(events.session_end.is_some());
        let laughs = events
            .cues
            .iter()
            .filter(|c| **c == SoundCue::CreatureLaugh)
            .count();
        assert_eq!(laughs, 1);
    }

    #[test]
    fn test_bark_wave_expires() {
        let mut world = World::new(21);
        world.start();
        world.trees.clear();
        let input = FrameInput {
            bark: true,
            ..Default::default()
        };
        step(&mut world, &input, 16.0);
        assert!(world.bark_wave.is_some());

        for _ in 0..30 {
            step(&mut world, &FrameInput::default(), 16.0);
        }
        assert!(world.bark_wave.is_none());
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut world1 = World::new(99_999);
        let mut world2 = World::new(99_999);
        world1.start();
        world2.start();

        for frame in 0..400u32 {
            let input = FrameInput {
                movement: Vec2::new(if frame % 120 < 60 { 1.0 } else { -1.0 }, 0.3),
                bark: frame % 50 == 0,
                ..Default::default()
            };
            step(&mut world1, &input, 16.0);
            step(&mut world2, &input, 16.0);
        }

        assert_eq!(world1.clock_ms, world2.clock_ms);
        assert_eq!(world1.score, world2.score);
        assert_eq!(world1.player.pos, world2.player.pos);
        assert_eq!(world1.squirrels.len(), world2.squirrels.len());
        for (a, b) in world1.squirrels.iter().zip(&world2.squirrels) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(world1.rng, world2.rng);
    }

    #[test]
    fn test_autopilot_runs_a_session() {
        let mut world = World::new(7_777);
        world.start();
        let input = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        // A couple of sim-minutes: the pilot plays, the ramp plays against it
        for _ in 0..7_500 {
            step(&mut world, &input, 16.0);
            if world.phase == GamePhase::GameOver {
                break;
            }
        }
        // Either outcome is fine; the world must just stay consistent
        let half = PLAYER_SIZE / 2.0;
        assert!(world.player.pos.x >= half && world.player.pos.x <= YARD_WIDTH - half);
        if world.phase == GamePhase::GameOver {
            assert!(world.outcome.is_some());
        }
    }

    proptest! {
        #[test]
        fn prop_player_never_escapes_or_overlaps(
            moves in proptest::collection::vec(
                (-1.0f32..=1.0, -1.0f32..=1.0),
                1..120,
            )
        ) {
            let mut world = World::new(4_242);
            world.start();
            let half = PLAYER_SIZE / 2.0;
            for (dx, dy) in moves {
                let input = FrameInput {
                    movement: Vec2::new(dx, dy),
                    ..Default::default()
                };
                step(&mut world, &input, 17.0);
                prop_assert!(world.player.pos.x >= half);
                prop_assert!(world.player.pos.x <= YARD_WIDTH - half);
                prop_assert!(world.player.pos.y >= half);
                prop_assert!(world.player.pos.y <= YARD_HEIGHT - half);
                prop_assert!(!hits_obstruction(world.player.pos, half, &world.trees));
            }
        }

        #[test]
        fn prop_cooldown_stays_clamped(
            barks in proptest::collection::vec(proptest::bool::ANY, 1..200)
        ) {
            let mut world = World::new(55);
            world.start();
            for bark in barks {
                let input = FrameInput {
                    bark,
                    ..Default::default()
                };
                step(&mut world, &input, 13.0);
                prop_assert!(world.player.bark_cooldown_ms >= 0.0);
                prop_assert!(world.player.bark_cooldown_ms <= BARK_COOLDOWN_MS);
            }
        }
    }
}
