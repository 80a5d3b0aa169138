//! Game state and core simulation types
//!
//! `GameState` is the simulation context: the host owns exactly one and
//! hands it to the tick, the renderer and the persistence layer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::{ActiveEffects, PowerUpKind, PowerUpStatus};
use super::events::{GameEvent, SoundCue};
use crate::achievements::{AchievementId, Progress};
use crate::consts::*;
use crate::persistence::Profile;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Boot splash, becomes Idle after a fixed delay
    Loading,
    /// Menus; no run in progress
    Idle,
    /// Active run, ticks advance the world
    Playing,
    /// Run frozen; no ticks occur
    Paused,
    /// Run ended, final stats on screen
    GameOver,
}

/// Lane change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

/// The player sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current horizontal position (eases toward `target_x`)
    pub x: f32,
    /// Feet baseline
    pub y: f32,
    /// Index into `LANES`
    pub lane: usize,
    pub target_x: f32,
    pub is_jumping: bool,
    pub jump_height: f32,
    /// Vertical speed (positive = rising)
    pub jump_speed: f32,
    /// Nominal apex for the default tuning; the arc itself is unclamped
    pub max_jump_height: f32,
    pub invincible: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let x = LANES[START_LANE];
        Self {
            x,
            y: GROUND_Y,
            lane: START_LANE,
            target_x: x,
            is_jumping: false,
            jump_height: 0.0,
            jump_speed: 0.0,
            max_jump_height: tuning.max_jump_height,
            invincible: false,
        }
    }

    /// Collision box, lifted by the current jump height
    pub fn aabb(&self) -> Aabb {
        Aabb::from_bottom_center(
            Vec2::new(self.x, self.y - self.jump_height),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        )
    }

    /// Select the adjacent lane. Returns false at the boundary lanes.
    pub fn shift_lane(&mut self, shift: LaneShift) -> bool {
        let lane = match shift {
            LaneShift::Left if self.lane > 0 => self.lane - 1,
            LaneShift::Right if self.lane + 1 < LANES.len() => self.lane + 1,
            _ => return false,
        };
        self.lane = lane;
        self.target_x = LANES[lane];
        true
    }

    /// Begin a jump. Returns false while already airborne.
    pub fn start_jump(&mut self, power: f32) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.jump_speed = power;
        true
    }

    /// Ease toward the target lane and integrate the jump arc (one tick)
    pub fn update(&mut self, move_step: f32, gravity: f32) {
        if self.x < self.target_x {
            self.x = (self.x + move_step).min(self.target_x);
        } else if self.x > self.target_x {
            self.x = (self.x - move_step).max(self.target_x);
        }

        if self.is_jumping {
            self.jump_height += self.jump_speed;
            self.jump_speed -= gravity;

            if self.jump_height <= 0.0 {
                self.jump_height = 0.0;
                self.jump_speed = 0.0;
                self.is_jumping = false;
            }
        }
    }
}

/// Ground and air hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Construction,
    Bird,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Car, ObstacleKind::Construction, ObstacleKind::Bird];

    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Car | ObstacleKind::Construction => Vec2::new(60.0, 40.0),
            ObstacleKind::Bird => Vec2::new(25.0, 20.0),
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, ObstacleKind::Bird)
    }
}

/// A hazard scrolling toward the player (anchored at its bottom center)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_bottom_center(self.pos, self.size)
    }
}

/// Pickup categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Score bonus
    Currency,
    Health,
    /// Triggers the speed power-up
    Boost,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::Currency,
        CollectibleKind::Health,
        CollectibleKind::Boost,
    ];
}

/// A pickup (anchored at its center)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Phase of the pulsing animation
    pub pulse: f32,
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A chaser running faster than the world (anchored at its bottom center)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Own leftward speed, fixed at spawn
    pub speed: f32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_bottom_center(self.pos, self.size)
    }
}

/// Particle color family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Hazard,
    Enemy,
    Collectible(CollectibleKind),
}

/// A particle for visual feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    /// Ticks remaining
    pub life: u32,
}

/// Read-only view handed to the render collaborator each frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: SessionPhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub enemies: &'a [Enemy],
    pub particles: &'a [Particle],
}

/// HUD numbers
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub distance: u64,
    pub health: u32,
    pub power_ups: Vec<PowerUpStatus>,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// High scores, achievements and settings
    pub profile: Profile,
    pub phase: SessionPhase,
    /// Time spent on the loading screen (ms)
    pub loading_ms: f64,

    // === Current run ===
    pub score: u64,
    /// Always within [0, MAX_HEALTH]
    pub health: u32,
    pub distance: f32,
    /// World speed before power-up multipliers
    pub base_speed: f32,
    /// Distance at which the next speed step happens
    pub next_speed_up_at: f32,
    /// Play clock (ms); only advances while Playing
    pub clock_ms: f64,
    /// Host-supplied display date of the run
    pub session_date: String,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub effects: ActiveEffects,

    events: Vec<GameEvent>,
    profile_dirty: bool,
    next_id: u32,
}

impl GameState {
    /// Create a simulation in the Loading phase
    pub fn new(seed: u64, profile: Profile, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            base_speed: tuning.base_speed,
            next_speed_up_at: tuning.speed_up_interval,
            tuning,
            profile,
            phase: SessionPhase::Loading,
            loading_ms: 0.0,
            score: 0,
            health: MAX_HEALTH,
            distance: 0.0,
            clock_ms: 0.0,
            session_date: String::new(),
            player,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            effects: ActiveEffects::default(),
            events: Vec::new(),
            profile_dirty: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current scroll speed, including the speed power-up
    pub fn world_speed(&self) -> f32 {
        if self.effects.is_active(PowerUpKind::Speed) {
            self.base_speed * self.tuning.boost_factor
        } else {
            self.base_speed
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            player: &self.player,
            obstacles: &self.obstacles,
            collectibles: &self.collectibles,
            enemies: &self.enemies,
            particles: &self.particles,
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            distance: self.distance.floor() as u64,
            health: self.health,
            power_ups: self.effects.status(self.clock_ms),
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns true (once) if the profile changed since the last call
    pub fn take_profile_dirty(&mut self) -> bool {
        std::mem::take(&mut self.profile_dirty)
    }

    pub(crate) fn mark_profile_dirty(&mut self) {
        self.profile_dirty = true;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn sound(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(cue));
    }

    pub(crate) fn message(&mut self, text: impl Into<String>) {
        self.emit(GameEvent::Message {
            text: text.into(),
            duration_ms: MESSAGE_MS,
        });
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    /// Apply damage (health floors at 0)
    pub(crate) fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.sound(SoundCue::Damage);
        self.emit(GameEvent::Vibrate { duration_ms: 200 });
    }

    /// Restore health (capped at MAX_HEALTH)
    pub(crate) fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
    }

    /// Spawn a burst of feedback particles
    pub(crate) fn burst(&mut self, at: Vec2, tint: Tint) {
        for _ in 0..PARTICLE_BURST {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 6.0,
                (self.rng.random::<f32>() - 0.5) * 6.0,
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                tint,
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Unlock an achievement, announcing it only on the first unlock
    pub fn unlock_achievement(&mut self, id: AchievementId) -> bool {
        if !self.profile.achievements.unlock(id) {
            return false;
        }
        self.announce_unlock(id);
        true
    }

    /// Advance a counter achievement (announces if it just unlocked)
    pub fn advance_achievement(&mut self, id: AchievementId, amount: u32) {
        match self.profile.achievements.advance(id, amount) {
            Progress::Unlocked => self.announce_unlock(id),
            Progress::Advanced => self.mark_profile_dirty(),
            Progress::Unchanged => {}
        }
    }

    fn announce_unlock(&mut self, id: AchievementId) {
        let info = id.info();
        log::info!("Achievement unlocked: {}", info.title);
        self.message(format!("{} {} unlocked!", info.icon, info.title));
        self.sound(SoundCue::Achievement);
        self.emit(GameEvent::Vibrate { duration_ms: 300 });
        self.emit(GameEvent::AchievementUnlocked(id));
        self.mark_profile_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_is_loading() {
        let state = GameState::new(1, Profile::default(), Tuning::default());
        assert_eq!(state.phase, SessionPhase::Loading);
        assert_eq!(state.health, MAX_HEALTH);
        assert_eq!(state.world_speed(), 2.0);
        assert_eq!(state.player.lane, START_LANE);
        assert_eq!(state.player.x, LANES[START_LANE]);
    }

    #[test]
    fn test_lane_shift_stops_at_boundaries() {
        let mut player = Player::new(&Tuning::default());
        assert!(player.shift_lane(LaneShift::Left));
        assert_eq!(player.lane, 0);
        assert!(!player.shift_lane(LaneShift::Left));
        assert_eq!(player.target_x, LANES[0]);

        assert!(player.shift_lane(LaneShift::Right));
        assert!(player.shift_lane(LaneShift::Right));
        assert!(!player.shift_lane(LaneShift::Right));
        assert_eq!(player.lane, 2);
        assert_eq!(player.target_x, LANES[2]);
    }

    #[test]
    fn test_ease_never_overshoots() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.shift_lane(LaneShift::Right);
        // 65 px at 8 px/tick: 8 full steps then a 1 px step
        for _ in 0..8 {
            player.update(tuning.move_step, tuning.gravity);
            assert!(player.x < player.target_x);
        }
        player.update(tuning.move_step, tuning.gravity);
        assert_eq!(player.x, LANES[2]);
        player.update(tuning.move_step, tuning.gravity);
        assert_eq!(player.x, LANES[2]);
    }

    #[test]
    fn test_jump_arc_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.start_jump(tuning.jump_power));
        assert!(!player.start_jump(tuning.jump_power));

        player.update(tuning.move_step, tuning.gravity);
        assert_eq!(player.jump_height, 15.0);

        let mut peak: f32 = 0.0;
        let mut ticks = 1;
        while player.is_jumping {
            player.update(tuning.move_step, tuning.gravity);
            peak = peak.max(player.jump_height);
            ticks += 1;
            assert!(ticks < 100, "jump never landed");
        }
        assert!(peak <= player.max_jump_height);
        assert!(peak > 140.0);
        assert_eq!(player.jump_height, 0.0);
        assert_eq!(player.jump_speed, 0.0);
    }

    #[test]
    fn test_high_jump_follows_full_arc() {
        let tuning = Tuning {
            jump_power: 30.0,
            ..Tuning::default()
        };
        let mut player = Player::new(&tuning);
        assert!(player.start_jump(tuning.jump_power));

        let mut heights = Vec::new();
        while player.is_jumping {
            player.update(tuning.move_step, tuning.gravity);
            heights.push(player.jump_height);
            assert!(heights.len() < 200, "jump never landed");
        }

        // Rises past the nominal apex, never plateaus, then descends to the ground
        let peak = heights.iter().copied().fold(0.0_f32, f32::max);
        assert!(peak > tuning.max_jump_height);
        assert!(heights.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(heights.last().copied(), Some(0.0));
        assert!((heights[5] - (heights[4] + 30.0 - 5.0 * tuning.gravity)).abs() < 1e-3);
    }

    #[test]
    fn test_burst_is_not_capped() {
        let mut state = GameState::new(1, Profile::default(), Tuning::default());
        for _ in 0..33 {
            state.burst(Vec2::new(100.0, 100.0), Tint::Hazard);
        }
        assert_eq!(state.particles.len(), 33 * PARTICLE_BURST);
    }

    #[test]
    fn test_player_box_lifts_with_jump() {
        let mut player = Player::new(&Tuning::default());
        let grounded = player.aabb();
        player.jump_height = 50.0;
        let airborne = player.aabb();
        assert_eq!(grounded.max.y - airborne.max.y, 50.0);
    }

    #[test]
    fn test_health_clamps() {
        let mut state = GameState::new(1, Profile::default(), Tuning::default());
        state.heal(50);
        assert_eq!(state.health, MAX_HEALTH);
        state.take_damage(250);
        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_burst_spawns_eight() {
        let mut state = GameState::new(1, Profile::default(), Tuning::default());
        state.burst(Vec2::new(100.0, 100.0), Tint::Hazard);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert!(state.particles.iter().all(|p| p.life == PARTICLE_LIFE));
        assert!(state.particles.iter().all(|p| p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0));
    }

    #[test]
    fn test_unlock_announced_once() {
        let mut state = GameState::new(1, Profile::default(), Tuning::default());
        assert!(state.unlock_achievement(AchievementId::Survivor));
        assert!(!state.unlock_achievement(AchievementId::Survivor));
        let unlocks = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::AchievementUnlocked(_)))
            .count();
        assert_eq!(unlocks, 1);
        assert!(state.take_profile_dirty());
        assert!(!state.take_profile_dirty());
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(ops in proptest::collection::vec((any::<bool>(), 0u32..150), 0..60)) {
            let mut state = GameState::new(3, Profile::default(), Tuning::default());
            for (is_damage, amount) in ops {
                if is_damage {
                    state.take_damage(amount);
                } else {
                    state.heal(amount);
                }
                prop_assert!(state.health <= MAX_HEALTH);
            }
        }

        #[test]
        fn prop_lane_stays_in_set(shifts in proptest::collection::vec(any::<bool>(), 0..50)) {
            let mut player = Player::new(&Tuning::default());
            for right in shifts {
                let before = player.lane;
                let shift = if right { LaneShift::Right } else { LaneShift::Left };
                let moved = player.shift_lane(shift);
                prop_assert!(player.lane < LANES.len());
                prop_assert!(LANES.contains(&player.target_x));
                if !moved {
                    prop_assert_eq!(player.lane, before);
                }
            }
        }
    }
}
