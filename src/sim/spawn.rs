//! Spawn scheduling and placement
//!
//! Once per frame the scheduler checks every actor type: occupancy first for
//! the singletons, then the retry interval, then any probability gate, then
//! placement. Placement that needs open ground runs bounded rejection
//! sampling and silently gives up when the attempt budget runs out.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::house_center;
use super::state::{
    Bird, BirdPhase, Facing, Mailman, MailmanPhase, Pickup, PickupKind, Rabbit, Skunk, Squirrel,
    Tree, World,
};
use crate::consts::*;

/// Squirrel spawn interval, ramping linearly from the initial value down to
/// the minimum across the difficulty window
pub(super) fn squirrel_interval(elapsed_ms: f64) -> f64 {
    let t = (elapsed_ms / DIFFICULTY_RAMP_MS).clamp(0.0, 1.0);
    SQUIRREL_SPAWN_INTERVAL_MS + (SQUIRREL_SPAWN_INTERVAL_MIN_MS - SQUIRREL_SPAWN_INTERVAL_MS) * t
}

/// One scheduler pass over every actor type
pub(super) fn run(world: &mut World, now: f64) {
    try_spawn_squirrel(world, now);
    try_spawn_rabbit(world, now);
    try_spawn_mailman(world, now);
    try_spawn_bird(world, now);
    try_spawn_skunk(world, now);
    try_spawn_treat(world, now);
    try_spawn_ball(world, now);
}

/// Point along one of the four yard edges, pushed outward by half the actor
/// size so it starts just off-screen
fn edge_spawn(rng: &mut Pcg32, size: f32) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..YARD_WIDTH), -size / 2.0),
        1 => Vec2::new(YARD_WIDTH + size / 2.0, rng.random_range(0.0..YARD_HEIGHT)),
        2 => Vec2::new(rng.random_range(0.0..YARD_WIDTH), YARD_HEIGHT + size / 2.0),
        _ => Vec2::new(-size / 2.0, rng.random_range(0.0..YARD_HEIGHT)),
    }
}

/// Origin and far-side exit for a lane-crossing critter
fn crossing_lane(rng: &mut Pcg32, size: f32, band: f32) -> (Vec2, Vec2, Facing) {
    let y = rng.random_range(band..YARD_HEIGHT - band);
    if rng.random_bool(0.5) {
        (
            Vec2::new(-size / 2.0, y),
            Vec2::new(YARD_WIDTH + size, y),
            Facing::Right,
        )
    } else {
        (
            Vec2::new(YARD_WIDTH + size / 2.0, y),
            Vec2::new(-size, y),
            Facing::Left,
        )
    }
}

fn try_spawn_squirrel(world: &mut World, now: f64) {
    if now - world.spawn.last_squirrel <= squirrel_interval(now) {
        return;
    }
    world.spawn.last_squirrel = now;
    let pos = edge_spawn(&mut world.rng, SQUIRREL_SIZE);
    let facing = if house_center().x < pos.x {
        Facing::Left
    } else {
        Facing::Right
    };
    let id = world.next_actor_id();
    world.squirrels.push(Squirrel {
        id,
        pos,
        spawned_at: now,
        facing,
    });
}

fn try_spawn_rabbit(world: &mut World, now: f64) {
    if world.rabbit.is_some() {
        return;
    }
    if now - world.spawn.last_rabbit_attempt <= RABBIT_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_rabbit_attempt = now;
    if !world.rng.random_bool(RABBIT_SPAWN_CHANCE) {
        return;
    }
    let (pos, target, facing) = crossing_lane(&mut world.rng, RABBIT_SIZE, 20.0);
    let id = world.next_actor_id();
    world.rabbit = Some(Rabbit {
        id,
        pos,
        target,
        spawned_at: now,
        facing,
    });
    log::debug!("rabbit crossing at y {:.0}", pos.y);
}

fn try_spawn_mailman(world: &mut World, now: f64) {
    if world.spawn.mailman_has_spawned || world.mailman.is_some() || now < MAILMAN_FIRST_MS {
        return;
    }
    if now - world.spawn.last_mailman_attempt <= MAILMAN_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_mailman_attempt = now;
    if !world.rng.random_bool(MAILMAN_SPAWN_CHANCE) {
        return;
    }
    // Walks in from a side edge, aiming for the front of the house
    let y = world.rng.random_range(100.0..YARD_HEIGHT - 100.0);
    let from_left = world.rng.random_bool(0.5);
    let pos = if from_left {
        Vec2::new(-MAILMAN_SIZE / 2.0, y)
    } else {
        Vec2::new(YARD_WIDTH + MAILMAN_SIZE / 2.0, y)
    };
    let target = Vec2::new(house_center().x, HOUSE_Y + HOUSE_SIZE - 20.0);
    let facing = if from_left { Facing::Right } else { Facing::Left };
    let id = world.next_actor_id();
    world.mailman = Some(Mailman {
        id,
        pos,
        spawned_at: now,
        facing,
        phase: MailmanPhase::Approaching { target },
    });
    world.spawn.mailman_has_spawned = true;
    log::debug!("mailman inbound from {}", if from_left { "left" } else { "right" });
}

fn try_spawn_bird(world: &mut World, now: f64) {
    if world.bird.is_some() || now < BIRD_FIRST_MS {
        return;
    }
    if now - world.spawn.last_bird_attempt <= BIRD_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_bird_attempt = now;
    if world.trees.is_empty() || !world.rng.random_bool(BIRD_SPAWN_CHANCE) {
        return;
    }
    let perch = world.trees[world.rng.random_range(0..world.trees.len())].pos
        + Vec2::new(0.0, -BIRD_PERCH_OFFSET);
    let until = now + world.rng.random_range(BIRD_PERCH_MIN_MS..BIRD_PERCH_MAX_MS);
    let id = world.next_actor_id();
    world.bird = Some(Bird {
        id,
        pos: perch,
        spawned_at: now,
        phase: BirdPhase::Perched { until },
    });
    log::debug!("bird perched until {until:.0}");
}

fn try_spawn_skunk(world: &mut World, now: f64) {
    if world.skunk.is_some() || now < SKUNK_FIRST_MS {
        return;
    }
    if now - world.spawn.last_skunk_attempt <= SKUNK_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_skunk_attempt = now;
    if !world.rng.random_bool(SKUNK_SPAWN_CHANCE) {
        return;
    }
    let (pos, target, facing) = crossing_lane(&mut world.rng, SKUNK_SIZE, 60.0);
    let id = world.next_actor_id();
    world.skunk = Some(Skunk {
        id,
        pos,
        target,
        spawned_at: now,
        facing,
    });
    log::debug!("skunk crossing at y {:.0}", pos.y);
}

fn try_spawn_treat(world: &mut World, now: f64) {
    if world.pickup.is_some() || world.player.buffs.treat_active(now) {
        return;
    }
    if now - world.spawn.last_treat_attempt <= TREAT_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_treat_attempt = now;
    if let Some(pos) = find_open_spot(&mut world.rng, &world.trees) {
        world.pickup = Some(Pickup {
            kind: PickupKind::Treat,
            pos,
            spawned_at: now,
        });
    }
}

fn try_spawn_ball(world: &mut World, now: f64) {
    if world.pickup.is_some() || world.player.buffs.zoomies_active(now) {
        return;
    }
    if now - world.spawn.last_ball_attempt <= BALL_SPAWN_INTERVAL_MS {
        return;
    }
    world.spawn.last_ball_attempt = now;
    if let Some(pos) = find_open_spot(&mut world.rng, &world.trees) {
        world.pickup = Some(Pickup {
            kind: PickupKind::TennisBall,
            pos,
            spawned_at: now,
        });
    }
}

fn in_control_zone(pos: Vec2) -> bool {
    pos.distance(Vec2::new(0.0, YARD_HEIGHT / 2.0)) < CONTROL_ZONE_RADIUS
        || pos.distance(Vec2::new(YARD_WIDTH, YARD_HEIGHT / 2.0)) < CONTROL_ZONE_RADIUS
}

/// Uniform-random open spot for a pickup: inside the margins, clear of the
/// house ring, the trees, and the control overlays. `None` when the attempt
/// budget runs out; the caller just skips this cycle.
pub(super) fn find_open_spot(rng: &mut Pcg32, trees: &[Tree]) -> Option<Vec2> {
    for _ in 0..PICKUP_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(
            rng.random_range(PICKUP_MARGIN..YARD_WIDTH - PICKUP_MARGIN),
            rng.random_range(PICKUP_MARGIN..YARD_HEIGHT - PICKUP_MARGIN),
        );
        if pos.distance(house_center()) < TREAT_HOUSE_CLEARANCE {
            continue;
        }
        if trees
            .iter()
            .any(|t| pos.distance(t.pos) < TREE_SIZE / 2.0 + PICKUP_TREE_CLEARANCE)
        {
            continue;
        }
        if in_control_zone(pos) {
            continue;
        }
        return Some(pos);
    }
    None
}

/// Scenery for a fresh session
pub fn generate_trees(rng: &mut Pcg32) -> Vec<Tree> {
    place_trees(rng, NUM_TREES, MIN_TREE_DISTANCE)
}

/// Bounded rejection placement, balanced across the yard halves: the first
/// ceil(n/2) trees sample the left half, the rest the right. A tree whose
/// attempt budget runs out is dropped, never retried.
pub(crate) fn place_trees(rng: &mut Pcg32, count: usize, min_spacing: f32) -> Vec<Tree> {
    let player_spawn = Vec2::new(YARD_WIDTH / 2.0, YARD_HEIGHT - PLAYER_SIZE * 2.0);
    let margin = TREE_SIZE / 2.0 + 10.0;
    let mut trees: Vec<Tree> = Vec::with_capacity(count);

    for i in 0..count {
        let (x_min, x_max) = if i < count.div_ceil(2) {
            (margin, YARD_WIDTH / 2.0 - TREE_SIZE)
        } else {
            (YARD_WIDTH / 2.0 + TREE_SIZE, YARD_WIDTH - margin)
        };

        for _ in 0..TREE_PLACEMENT_ATTEMPTS {
            let pos = Vec2::new(
                rng.random_range(x_min..x_max),
                rng.random_range(margin..YARD_HEIGHT - margin),
            );
            if pos.distance(house_center()) < HOUSE_SIZE / 2.0 + TREE_HOUSE_BUFFER {
                continue;
            }
            if pos.distance(player_spawn) < TREE_PLAYER_BUFFER + TREE_SIZE / 2.0 {
                continue;
            }
            if in_control_zone(pos) {
                continue;
            }
            if trees.iter().any(|t| pos.distance(t.pos) < min_spacing) {
                continue;
            }
            trees.push(Tree { pos });
            break;
        }
    }

    if trees.len() < count {
        log::debug!("placed {} of {count} trees", trees.len());
    }
    trees
}
