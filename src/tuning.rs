//! Data-driven game balance
//!
//! Every number that shapes how a run feels lives here instead of being
//! scattered through the simulation. Defaults reproduce the shipped game;
//! a partial JSON document can override any subset.

use serde::{Deserialize, Serialize};

/// Balance table consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal ease toward the target lane (px per tick)
    pub move_step: f32,
    /// Initial upward speed of a jump (px per tick)
    pub jump_power: f32,
    /// Vertical speed lost per tick while airborne
    pub gravity: f32,
    /// Jump height ceiling (px)
    pub max_jump_height: f32,

    // === World speed ===
    pub base_speed: f32,
    /// Distance between difficulty steps
    pub speed_up_interval: f32,
    pub speed_up_increment: f32,
    /// Multiplier applied while the speed power-up is active
    pub boost_factor: f32,

    // === Spawning (per tick probabilities before speed scaling) ===
    pub obstacle_rate: f32,
    pub collectible_rate: f32,
    pub enemy_rate: f32,
    /// Enemies run this much faster than the world
    pub enemy_speed_offset: f32,

    // === Damage & rewards ===
    pub obstacle_damage: u32,
    pub enemy_damage: u32,
    pub currency_bonus: u64,
    pub health_pickup: u32,
    /// Instant heal from the health power-up
    pub health_power_up: u32,

    // === Achievement thresholds ===
    pub survivor_distance: f32,
    pub untouchable_distance: f32,
    pub high_score_threshold: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_step: 8.0,
            jump_power: 15.0,
            gravity: 0.8,
            max_jump_height: 150.0,

            base_speed: 2.0,
            speed_up_interval: 500.0,
            speed_up_increment: 0.5,
            boost_factor: 1.5,

            obstacle_rate: 0.02,
            collectible_rate: 0.015,
            enemy_rate: 0.005,
            enemy_speed_offset: 1.0,

            obstacle_damage: 20,
            enemy_damage: 30,
            currency_bonus: 100,
            health_pickup: 20,
            health_power_up: 30,

            survivor_distance: 1000.0,
            untouchable_distance: 500.0,
            high_score_threshold: 10_000,
        }
    }
}

impl Tuning {
    /// Overlay a (possibly partial) JSON document on the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tuning with every spawn disabled (scripted scenarios, demos)
    pub fn without_spawns() -> Self {
        Self {
            obstacle_rate: 0.0,
            collectible_rate: 0.0,
            enemy_rate: 0.0,
            ..Self::default()
        }
    }
}
