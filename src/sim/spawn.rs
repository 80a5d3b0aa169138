//! Procedural spawning
//!
//! Three independent Bernoulli trials per tick. Probabilities scale with
//! world speed (so density rises as the run speeds up) and with the
//! difficulty setting.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, CollectibleKind, Enemy, GameState, Obstacle, ObstacleKind};
use crate::consts::*;

/// Speed at which the obstacle and collectible rates apply unscaled
const ITEM_SPEED_REF: f32 = 2.0;
/// Speed at which the enemy rate applies unscaled
const ENEMY_SPEED_REF: f32 = 3.0;

/// Horizontal spread of spawn positions past the right edge
const SPAWN_JITTER: f32 = 100.0;
/// Birds fly with their bottom edge somewhere in this band
const BIRD_BAND: (f32, f32) = (560.0, 680.0);
/// Collectibles float with their center somewhere in this band
const COLLECTIBLE_BAND: (f32, f32) = (560.0, 680.0);
const COLLECTIBLE_SIZE: Vec2 = Vec2::new(20.0, 20.0);
const ENEMY_SIZE: Vec2 = Vec2::new(35.0, 45.0);
/// Enemies enter this far past the right edge
const ENEMY_ENTRY_OFFSET: f32 = 50.0;

/// Run this tick's spawn trials
pub fn spawn_entities(state: &mut GameState) {
    let speed = state.world_speed();
    let difficulty = state.profile.settings.difficulty.spawn_factor();
    let item_scale = speed / ITEM_SPEED_REF * difficulty;
    let obstacle_p = state.tuning.obstacle_rate * item_scale;
    let collectible_p = state.tuning.collectible_rate * item_scale;
    let enemy_p = state.tuning.enemy_rate * speed / ENEMY_SPEED_REF * difficulty;

    if roll(state, obstacle_p) {
        spawn_obstacle(state);
    }
    if roll(state, collectible_p) {
        spawn_collectible(state);
    }
    if roll(state, enemy_p) {
        spawn_enemy(state);
    }
}

/// Bernoulli trial; probabilities outside [0, 1] saturate
fn roll(state: &mut GameState, probability: f32) -> bool {
    state.rng.random::<f32>() < probability
}

pub fn spawn_obstacle(state: &mut GameState) {
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let x = WORLD_WIDTH + state.rng.random::<f32>() * SPAWN_JITTER;
    let y = if kind.is_airborne() {
        BIRD_BAND.0 + state.rng.random::<f32>() * (BIRD_BAND.1 - BIRD_BAND.0)
    } else {
        GROUND_Y
    };
    let id = state.next_entity_id();
    log::debug!("Spawn obstacle {} {:?} at ({:.0}, {:.0})", id, kind, x, y);
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: kind.size(),
    });
}

pub fn spawn_collectible(state: &mut GameState) {
    let kind = CollectibleKind::ALL[state.rng.random_range(0..CollectibleKind::ALL.len())];
    let x = WORLD_WIDTH + state.rng.random::<f32>() * SPAWN_JITTER;
    let y = COLLECTIBLE_BAND.0 + state.rng.random::<f32>() * (COLLECTIBLE_BAND.1 - COLLECTIBLE_BAND.0);
    let id = state.next_entity_id();
    log::debug!("Spawn collectible {} {:?}", id, kind);
    state.collectibles.push(Collectible {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: COLLECTIBLE_SIZE,
        pulse: 0.0,
    });
}

pub fn spawn_enemy(state: &mut GameState) {
    let id = state.next_entity_id();
    let speed = state.world_speed() + state.tuning.enemy_speed_offset;
    log::debug!("Spawn enemy {} at speed {}", id, speed);
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(WORLD_WIDTH + ENEMY_ENTRY_OFFSET, GROUND_Y),
        size: ENEMY_SIZE,
        speed,
    });
}
