//! Per-creature behavior updates
//!
//! Each update advances one actor type by a frame: steer, move, then resolve
//! house breaches and player contact. Removals are collected and applied
//! id-keyed after the movement loop so nothing is scored or removed twice.

use glam::Vec2;

use super::collision::{circles_overlap, house_center, inside_house, slide_move};
use super::events::{FrameEvents, GameOverCause, SoundCue};
use super::state::{BirdPhase, Facing, MailmanPhase, Tree, World};
use super::step::finalize_loss;
use crate::consts::*;

/// How far the rabbit starts shying away from scenery
const OBSTACLE_AVOID_RADIUS: f32 = 90.0;
/// Peak strength of a single scenery push, comparable to the other influences
const OBSTACLE_PUSH: f32 = 150.0;

fn out_of_bounds(pos: Vec2, size: f32) -> bool {
    pos.x < -size || pos.x > YARD_WIDTH + size || pos.y < -size || pos.y > YARD_HEIGHT + size
}

fn face(facing: &mut Facing, dx: f32) {
    if dx < 0.0 {
        *facing = Facing::Left;
    } else if dx > 0.0 {
        *facing = Facing::Right;
    }
}

/// Linear-falloff push away from one obstacle center
fn repel_from(pos: Vec2, obstacle: Vec2, radius: f32) -> Vec2 {
    let away = pos - obstacle;
    let dist = away.length();
    if dist >= radius || dist <= f32::EPSILON {
        return Vec2::ZERO;
    }
    away / dist * ((radius - dist) / radius) * OBSTACLE_PUSH
}

/// Summed soft repulsion from every tree and the house
fn obstacle_repulsion(pos: Vec2, trees: &[Tree]) -> Vec2 {
    let mut push = Vec2::ZERO;
    for tree in trees {
        push += repel_from(pos, tree.pos, TREE_SIZE / 2.0 + OBSTACLE_AVOID_RADIUS);
    }
    push + repel_from(pos, house_center(), HOUSE_SIZE / 2.0 + OBSTACLE_AVOID_RADIUS)
}

/// Squirrels run for the house and bolt when the dog gets close
pub(super) fn update_squirrels(world: &mut World, events: &mut FrameEvents, dt: f32, now: f64) {
    let player_pos = world.player.pos;
    let house = house_center();
    let mut caught: Vec<(u32, Vec2)> = Vec::new();
    let mut breached = false;

    for squirrel in &mut world.squirrels {
        let to_player = player_pos - squirrel.pos;
        let dir = if to_player.length() < DOG_SCARE_RADIUS {
            -to_player.normalize_or_zero()
        } else {
            (house - squirrel.pos).normalize_or_zero()
        };
        squirrel.pos += dir * SQUIRREL_SPEED * dt;
        face(&mut squirrel.facing, dir.x);

        if inside_house(squirrel.pos) {
            breached = true;
            break;
        }
        if circles_overlap(
            player_pos,
            PLAYER_SIZE / 2.0,
            squirrel.pos,
            SQUIRREL_SIZE / 2.0,
        ) {
            caught.push((squirrel.id, squirrel.pos));
        }
    }

    if breached {
        finalize_loss(world, events, GameOverCause::SquirrelReachedHouse, now);
        return;
    }
    if !caught.is_empty() {
        world
            .squirrels
            .retain(|s| !caught.iter().any(|(id, _)| *id == s.id));
        world.score += caught.len() as u32 * SQUIRREL_POINTS;
        events.cue(SoundCue::CreatureCaught);
        for (_, pos) in caught {
            world.spawn_poof(pos);
        }
    }
}

/// The rabbit blends four influences: seek its exit, wobble sideways, shy
/// away from scenery, and bolt from the dog
pub(super) fn update_rabbit(world: &mut World, events: &mut FrameEvents, dt: f32, now: f64) {
    let Some(mut rabbit) = world.rabbit.take() else {
        return;
    };
    let player_pos = world.player.pos;

    let seek = rabbit.target - rabbit.pos;
    let perp = Vec2::new(-seek.y, seek.x).normalize_or_zero();
    let wobble = (now / 300.0).sin() as f32 * 0.8;
    let mut influence = seek + perp * wobble * 100.0;
    influence += obstacle_repulsion(rabbit.pos, &world.trees);

    let from_player = rabbit.pos - player_pos;
    let player_dist = from_player.length();
    let evading = player_dist < RABBIT_EVADE_RADIUS;
    if evading {
        // Weight climbs the closer the dog gets, drowning out the rest
        let weight = (RABBIT_EVADE_RADIUS - player_dist) / RABBIT_EVADE_RADIUS * 3.5;
        influence += from_player * weight;
    }

    let dir = influence.normalize_or_zero();
    let speed = if evading {
        RABBIT_SPEED * RABBIT_EVADE_SPEED_MULT
    } else {
        RABBIT_SPEED
    };
    rabbit.pos = slide_move(
        rabbit.pos,
        dir * speed * dt,
        RABBIT_SIZE / 2.0,
        &world.trees,
    );
    face(&mut rabbit.facing, dir.x);

    if out_of_bounds(rabbit.pos, RABBIT_SIZE) {
        // Made it across, no points for anyone
        return;
    }
    if circles_overlap(player_pos, PLAYER_SIZE / 2.0, rabbit.pos, RABBIT_SIZE / 2.0) {
        world.score += RABBIT_POINTS;
        events.cue(SoundCue::BonusCatch);
        world.spawn_score_popup(rabbit.pos, RABBIT_POINTS);
        world.spawn_poof(rabbit.pos);
        return;
    }
    world.rabbit = Some(rabbit);
}

/// The mailman walks straight for the door until the dog spooks him, then
/// sprints off and never looks back
pub(super) fn update_mailman(world: &mut World, events: &mut FrameEvents, dt: f32, now: f64) {
    let Some(mut mailman) = world.mailman.take() else {
        return;
    };
    let player_pos = world.player.pos;

    match mailman.phase {
        MailmanPhase::Approaching { target } => {
            if player_pos.distance(mailman.pos) < MAILMAN_EVADE_RADIUS {
                log::debug!("mailman spooked at {:.0}", mailman.pos);
                mailman.phase = MailmanPhase::Evading;
            } else {
                let dir = (target - mailman.pos).normalize_or_zero();
                mailman.pos += dir * MAILMAN_SPEED * dt;
                face(&mut mailman.facing, dir.x);
                if inside_house(mailman.pos) {
                    world.mailman = Some(mailman);
                    finalize_loss(world, events, GameOverCause::MailmanReachedHouse, now);
                    return;
                }
            }
        }
        MailmanPhase::Evading => {
            let dir = (mailman.pos - player_pos).normalize_or_zero();
            mailman.pos += dir * MAILMAN_SPEED * MAILMAN_EVADE_SPEED_MULT * dt;
            face(&mut mailman.facing, dir.x);
            if out_of_bounds(mailman.pos, MAILMAN_SIZE) {
                return;
            }
        }
    }

    if circles_overlap(
        player_pos,
        PLAYER_SIZE / 2.0,
        mailman.pos,
        MAILMAN_SIZE / 2.0,
    ) {
        world.score += MAILMAN_POINTS;
        events.cue(SoundCue::BonusCatch);
        world.spawn_score_popup(mailman.pos, MAILMAN_POINTS);
        world.spawn_poof(mailman.pos);
        return;
    }
    world.mailman = Some(mailman);
}

/// The bird sits out its perch timer, then dives at the house. Contact means
/// nothing to it; only a bark gets rid of it.
pub(super) fn update_bird(world: &mut World, events: &mut FrameEvents, dt: f32, now: f64) {
    let Some(mut bird) = world.bird.take() else {
        return;
    };

    match bird.phase {
        BirdPhase::Perched { until } => {
            if now >= until {
                let dir = (house_center() - bird.pos).normalize_or_zero();
                bird.phase = BirdPhase::Swooping {
                    angle: dir.y.atan2(dir.x),
                };
                log::debug!("bird swooping from {:.0}", bird.pos);
            }
        }
        BirdPhase::Swooping { angle } => {
            bird.pos += Vec2::new(angle.cos(), angle.sin()) * BIRD_SWOOP_SPEED * dt;
            if inside_house(bird.pos) {
                world.bird = Some(bird);
                finalize_loss(world, events, GameOverCause::BirdReachedHouse, now);
                return;
            }
        }
    }
    world.bird = Some(bird);
}

/// The skunk ambles across the yard; the dog has to stay away from it
pub(super) fn update_skunk(world: &mut World, events: &mut FrameEvents, dt: f32, now: f64) {
    let Some(mut skunk) = world.skunk.take() else {
        return;
    };
    let player_pos = world.player.pos;

    let seek = (skunk.target - skunk.pos).normalize_or_zero();
    let perp = Vec2::new(-seek.y, seek.x);
    let drift = (now / 600.0).sin() as f32 * 0.4;
    let dir = (seek + perp * drift).normalize_or_zero();
    skunk.pos = slide_move(skunk.pos, dir * SKUNK_SPEED * dt, SKUNK_SIZE / 2.0, &world.trees);
    face(&mut skunk.facing, dir.x);

    if out_of_bounds(skunk.pos, SKUNK_SIZE) {
        return;
    }
    if circles_overlap(player_pos, PLAYER_SIZE / 2.0, skunk.pos, SKUNK_SIZE / 2.0) {
        world.skunk = Some(skunk);
        finalize_loss(world, events, GameOverCause::SkunkSprayed, now);
        return;
    }
    world.skunk = Some(skunk);
}
