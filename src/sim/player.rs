//! The dog: movement, barking, pickup collection
//!
//! Movement slides around the house and trees one axis at a time and is
//! clamped to the yard. The bark is an area attack with a cooldown the treat
//! power waives; catching several critters in one bark pays a combo.

use glam::Vec2;

use super::collision::{circles_overlap, hits_obstruction};
use super::events::{FrameEvents, SoundCue};
use super::powerup::BuffKind;
use super::state::{BarkWave, Facing, PickupKind, World};
use crate::consts::*;

/// Tick the cooldown toward zero
pub(super) fn decay_bark_cooldown(world: &mut World, dt_ms: f64) {
    if world.player.bark_cooldown_ms > 0.0 {
        world.player.bark_cooldown_ms = (world.player.bark_cooldown_ms - dt_ms).max(0.0);
    }
}

/// Move the dog for one frame. The shell sums all of its input sources into
/// one vector; any nonzero direction is normalized so diagonal and partial
/// deflections don't change speed.
pub(super) fn apply_movement(world: &mut World, movement: Vec2, dt: f32, now: f64) {
    let dir = movement.normalize_or_zero();
    if dir != Vec2::ZERO {
        let speed = PLAYER_SPEED * world.player.buffs.speed_multiplier(now);
        let delta = dir * speed * dt;
        let half = PLAYER_SIZE / 2.0;
        // One axis at a time, clamped before the solidity check, so each
        // accepted move is in bounds and clear of the house and trees
        let pos = world.player.pos;
        let mut next = pos;
        next.x = (pos.x + delta.x).clamp(half, YARD_WIDTH - half);
        if hits_obstruction(next, half, &world.trees) {
            next.x = pos.x;
        }
        next.y = (pos.y + delta.y).clamp(half, YARD_HEIGHT - half);
        if hits_obstruction(next, half, &world.trees) {
            next.y = pos.y;
        }
        world.player.pos = next;
        // Facing only follows horizontal movement
        if dir.x < 0.0 {
            world.player.facing = Facing::Left;
        } else if dir.x > 0.0 {
            world.player.facing = Facing::Right;
        }
    }

    // The streak only runs while a speed buff does
    if world.player.buffs.any_active(now) {
        world.player.record_trail(now);
    } else if !world.player.trail.is_empty() {
        world.player.clear_trail();
    }
}

/// Resolve a bark trigger. A trigger during cooldown is swallowed unless the
/// treat power grants free use. An accepted bark always rings and resets the
/// cooldown (when not free), whether or not anything was in range.
pub(super) fn process_bark(world: &mut World, events: &mut FrameEvents, now: f64) {
    let free = world.player.buffs.free_bark(now);
    if world.player.bark_cooldown_ms > 0.0 && !free {
        return;
    }
    if !free {
        world.player.bark_cooldown_ms = BARK_COOLDOWN_MS;
    }
    events.cue(SoundCue::Bark);
    let origin = world.player.pos;
    world.bark_wave = Some(BarkWave {
        pos: origin,
        created_at: now,
        max_radius: BARK_RADIUS,
    });

    // Everything the bark can clear out, with base point values. Rabbit,
    // mailman and skunk don't care about barking.
    let mut caught: Vec<(Vec2, u32)> = Vec::new();
    let mut squirrel_ids: Vec<u32> = Vec::new();
    for squirrel in &world.squirrels {
        if origin.distance(squirrel.pos) < BARK_RADIUS {
            caught.push((squirrel.pos, SQUIRREL_POINTS));
            squirrel_ids.push(squirrel.id);
        }
    }
    let mut bird_caught = false;
    if let Some(bird) = &world.bird
        && origin.distance(bird.pos) < BARK_RADIUS
    {
        caught.push((bird.pos, BIRD_POINTS));
        bird_caught = true;
    }
    if caught.is_empty() {
        return;
    }

    world.squirrels.retain(|s| !squirrel_ids.contains(&s.id));
    if bird_caught {
        world.bird = None;
        events.cue(SoundCue::ThreatScared);
    }

    let count = caught.len() as u32;
    let base: u32 = caught.iter().map(|(_, points)| points).sum();
    let total = if count > 1 { base * count } else { base };
    world.score += total;
    log::debug!("bark caught {count} for {total} points");

    // One popup per bark: at the catch, or at the averaged position when
    // it was a combo
    let center = caught.iter().map(|(pos, _)| *pos).sum::<Vec2>() / count as f32;
    world.spawn_score_popup(center, total);
    for (pos, _) in &caught {
        world.spawn_poof(*pos);
    }
}

/// Pick up the treat or tennis ball on contact and start its buff
pub(super) fn collect_pickup(world: &mut World, events: &mut FrameEvents, now: f64) {
    let Some(pickup) = world.pickup else {
        return;
    };
    if !circles_overlap(
        world.player.pos,
        PLAYER_SIZE / 2.0,
        pickup.pos,
        pickup.size() / 2.0,
    ) {
        return;
    }
    world.pickup = None;
    match pickup.kind {
        PickupKind::Treat => {
            world.player.buffs.activate(BuffKind::TreatPower, now);
            events.cue(SoundCue::PowerUp);
        }
        PickupKind::TennisBall => {
            world.player.buffs.activate(BuffKind::Zoomies, now);
            events.cue(SoundCue::SpeedBoost);
        }
    }
    log::debug!("pickup collected: {:?}", pickup.kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bird, BirdPhase, Pickup, Squirrel};

    fn bare_world() -> World {
        let mut world = World::new(42);
        world.start();
        // Scenario tests want a predictable yard
        world.trees.clear();
        world
    }

    fn squirrel_at(world: &mut World, pos: Vec2) {
        let id = world.next_actor_id();
        world.squirrels.push(Squirrel {
            id,
            pos,
            spawned_at: 0.0,
            facing: Facing::Left,
        });
    }

    #[test]
    fn test_movement_clamps_to_yard() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(30.0, 300.0);
        // A huge frame pushing left would leave the yard without the clamp
        apply_movement(&mut world, Vec2::new(-1.0, 0.0), 1000.0, 0.0);
        assert_eq!(world.player.pos.x, PLAYER_SIZE / 2.0);
    }

    #[test]
    fn test_facing_ignores_vertical_movement() {
        let mut world = bare_world();
        assert_eq!(world.player.facing, Facing::Right);
        apply_movement(&mut world, Vec2::new(-1.0, 0.0), 16.0, 0.0);
        assert_eq!(world.player.facing, Facing::Left);
        apply_movement(&mut world, Vec2::new(0.0, -1.0), 16.0, 0.0);
        assert_eq!(world.player.facing, Facing::Left);
    }

    #[test]
    fn test_cooldown_decays_and_clamps() {
        let mut world = bare_world();
        world.player.bark_cooldown_ms = 100.0;
        decay_bark_cooldown(&mut world, 60.0);
        assert_eq!(world.player.bark_cooldown_ms, 40.0);
        decay_bark_cooldown(&mut world, 60.0);
        assert_eq!(world.player.bark_cooldown_ms, 0.0);
    }

    #[test]
    fn test_bark_respects_cooldown() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        world.player.bark_cooldown_ms = 2000.0;
        let pos = world.player.pos + Vec2::new(50.0, 0.0);
        squirrel_at(&mut world, pos);
        process_bark(&mut world, &mut events, 0.0);
        assert!(events.cues.is_empty());
        assert_eq!(world.squirrels.len(), 1);
    }

    #[test]
    fn test_free_bark_skips_cooldown_reset() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        world.player.buffs.activate(BuffKind::TreatPower, 0.0);
        process_bark(&mut world, &mut events, 10.0);
        assert!(events.cues.contains(&SoundCue::Bark));
        assert_eq!(world.player.bark_cooldown_ms, 0.0);
    }

    #[test]
    fn test_bark_combo_scoring() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        let player = world.player.pos;
        squirrel_at(&mut world, player + Vec2::new(20.0, 0.0));
        world.bird = Some(Bird {
            id: 99,
            pos: player + Vec2::new(80.0, 0.0),
            spawned_at: 0.0,
            phase: BirdPhase::Swooping { angle: 0.0 },
        });

        process_bark(&mut world, &mut events, 0.0);

        // Squirrel (1) + bird (3), doubled for the pair
        assert_eq!(world.score, 8);
        assert!(world.squirrels.is_empty());
        assert!(world.bird.is_none());
        assert!(events.cues.contains(&SoundCue::ThreatScared));

        let popups: Vec<_> = world
            .particles
            .iter()
            .filter(|p| p.text.starts_with('+'))
            .collect();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].text, "+8");
        assert_eq!(popups[0].pos, player + Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_bark_single_catch() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        let pos = world.player.pos + Vec2::new(0.0, -60.0);
        world.bird = Some(Bird {
            id: 7,
            pos,
            spawned_at: 0.0,
            phase: BirdPhase::Perched { until: 9000.0 },
        });

        process_bark(&mut world, &mut events, 0.0);

        assert_eq!(world.score, 3);
        let popups: Vec<_> = world
            .particles
            .iter()
            .filter(|p| p.text.starts_with('+'))
            .collect();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].text, "+3");
        assert_eq!(popups[0].pos, pos);
    }

    #[test]
    fn test_bark_misses_out_of_range() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        let pos = world.player.pos + Vec2::new(BARK_RADIUS + 10.0, 0.0);
        squirrel_at(&mut world, pos);
        process_bark(&mut world, &mut events, 0.0);
        // The bark still rang and started its cooldown
        assert!(events.cues.contains(&SoundCue::Bark));
        assert_eq!(world.player.bark_cooldown_ms, BARK_COOLDOWN_MS);
        assert_eq!(world.score, 0);
        assert_eq!(world.squirrels.len(), 1);
    }

    #[test]
    fn test_pickup_collection_starts_buff() {
        let mut world = bare_world();
        let mut events = FrameEvents::default();
        world.pickup = Some(Pickup {
            kind: PickupKind::Treat,
            pos: world.player.pos,
            spawned_at: 0.0,
        });
        collect_pickup(&mut world, &mut events, 100.0);
        assert!(world.pickup.is_none());
        assert!(world.player.buffs.treat_active(100.0));
        assert!(events.cues.contains(&SoundCue::PowerUp));
    }

    #[test]
    fn test_trail_gated_by_buffs() {
        let mut world = bare_world();
        apply_movement(&mut world, Vec2::new(1.0, 0.0), 16.0, 0.0);
        assert!(world.player.trail.is_empty());
        world.player.buffs.activate(BuffKind::Zoomies, 0.0);
        apply_movement(&mut world, Vec2::new(1.0, 0.0), 16.0, 10.0);
        assert_eq!(world.player.trail.len(), 1);
        // Buff lapsed: trail clears again
        apply_movement(&mut world, Vec2::new(1.0, 0.0), 16.0, ZOOMIES_MS + 50.0);
        assert!(world.player.trail.is_empty());
    }
}
