//! Per-frame simulation tick
//!
//! The host calls `tick` once per animation frame. The simulation never
//! schedules itself; while paused the host simply stops calling.

use super::effects::{PowerUpKind, activate_power_up, sweep_expired};
use super::events::{GameEvent, SoundCue};
use super::spawn::spawn_entities;
use super::state::{CollectibleKind, GameState, LaneShift, SessionPhase, Tint};
use crate::achievements::AchievementId;
use crate::consts::*;
use crate::content::{self, QuoteCategory};

/// Discrete player intents produced by the input collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
}

/// Intents gathered since the previous tick (last one wins per control)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub lateral: Option<LaneShift>,
    pub jump: bool,
    pub pause: bool,
}

impl TickInput {
    pub fn push(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft => self.lateral = Some(LaneShift::Left),
            Intent::MoveRight => self.lateral = Some(LaneShift::Right),
            Intent::Jump => self.jump = true,
            Intent::Pause => self.pause = true,
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the simulation by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    match state.phase {
        SessionPhase::Loading => {
            state.advance_loading(dt_ms);
            return;
        }
        SessionPhase::Playing => {}
        SessionPhase::Idle | SessionPhase::Paused | SessionPhase::GameOver => return,
    }

    if input.pause {
        state.pause();
        return;
    }

    // NaN and negative gaps count as zero
    state.clock_ms += dt_ms.max(0.0).min(MAX_FRAME_MS);

    if let Some(shift) = input.lateral {
        state.move_lane(shift);
    }
    if input.jump {
        state.jump();
    }

    advance_world(state);
    state
        .player
        .update(state.tuning.move_step, state.tuning.gravity);
    spawn_entities(state);
    update_entities(state);
    sweep_expired(state);
    check_collisions(state);
    check_achievements(state);

    if state.health == 0 {
        state.end();
    }
}

/// Accrue distance and score, step difficulty at each interval
fn advance_world(state: &mut GameState) {
    let speed = state.world_speed();
    state.distance += speed;
    state.score += speed.floor() as u64;

    if state.tuning.speed_up_interval <= 0.0 {
        return;
    }
    while state.distance >= state.next_speed_up_at {
        state.base_speed += state.tuning.speed_up_increment;
        state.next_speed_up_at += state.tuning.speed_up_interval;
        let speed = state.world_speed();
        log::info!("Speed up to {} at distance {:.0}", speed, state.distance);
        state.emit(GameEvent::SpeedUp { speed });
        state.message(content::SPEED_UP);
    }
}

/// Scroll everything left and drop what left the screen
fn update_entities(state: &mut GameState) {
    let speed = state.world_speed();

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.obstacles.retain(|o| o.aabb().max.x > 0.0);

    for collectible in &mut state.collectibles {
        collectible.pos.x -= speed;
        collectible.pulse += 0.2;
    }
    state.collectibles.retain(|c| c.aabb().max.x > 0.0);

    for enemy in &mut state.enemies {
        enemy.pos.x -= enemy.speed;
    }
    state.enemies.retain(|e| e.aabb().max.x > 0.0);

    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Player vs. world. Hazards stay in place after a hit, so an overlap that
/// lasts several ticks damages on each of them.
fn check_collisions(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let player_box = state.player.aabb();

    let obstacle_hits: Vec<_> = state
        .obstacles
        .iter()
        .filter(|o| o.aabb().overlaps(&player_box))
        .map(|o| o.pos)
        .collect();
    for pos in obstacle_hits {
        log::debug!("Obstacle hit at ({:.0}, {:.0})", pos.x, pos.y);
        state.take_damage(state.tuning.obstacle_damage);
        let quote = QuoteCategory::Damage.pick(&mut state.rng);
        state.message(quote);
        state.burst(pos, Tint::Hazard);
    }

    let enemy_hits: Vec<_> = state
        .enemies
        .iter()
        .filter(|e| e.aabb().overlaps(&player_box))
        .map(|e| e.pos)
        .collect();
    for pos in enemy_hits {
        log::debug!("Enemy hit at ({:.0}, {:.0})", pos.x, pos.y);
        state.take_damage(state.tuning.enemy_damage);
        state.message(content::ENEMY_HIT);
        state.burst(pos, Tint::Enemy);
    }

    let (picked, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.collectibles)
        .into_iter()
        .partition(|c| c.aabb().overlaps(&player_box));
    state.collectibles = remaining;
    for collectible in picked {
        collect_item(state, collectible.kind);
        state.burst(collectible.pos, Tint::Collectible(collectible.kind));
    }
}

/// Apply a pickup's effect
fn collect_item(state: &mut GameState, kind: CollectibleKind) {
    match kind {
        CollectibleKind::Currency => {
            state.score += state.tuning.currency_bonus;
            let quote = QuoteCategory::Collect.pick(&mut state.rng);
            state.message(quote);
            state.advance_achievement(AchievementId::Collector, 1);
        }
        CollectibleKind::Health => {
            state.heal(state.tuning.health_pickup);
            state.message(content::HEALTH_RESTORED);
        }
        CollectibleKind::Boost => {
            activate_power_up(state, PowerUpKind::Speed);
            state.message(content::SPEED_BOOST);
            state.advance_achievement(AchievementId::Speedster, 1);
        }
    }
    state.sound(SoundCue::Collect);
}

/// Threshold achievements (idempotent; unlock announces only once)
fn check_achievements(state: &mut GameState) {
    if state.distance >= state.tuning.survivor_distance {
        state.unlock_achievement(AchievementId::Survivor);
    }
    if state.distance >= state.tuning.untouchable_distance && state.health == MAX_HEALTH {
        state.unlock_achievement(AchievementId::Untouchable);
    }
    if state.score >= state.tuning.high_score_threshold {
        state.unlock_achievement(AchievementId::HighScore);
    }
}
