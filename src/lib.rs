//! Lane Dash - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player motion, spawning, collisions, power-ups)
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `platform`: Browser input recognizers, storage and haptics
//! - `persistence`: Profile blob save/load with corruption fallback
//! - `audio`: Oscillator cues for simulation sound events
//! - `tuning`: Data-driven game balance

pub mod achievements;
pub mod audio;
pub mod content;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use achievements::{AchievementId, Achievements};
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Visible world size (logical pixels)
    pub const WORLD_WIDTH: f32 = 390.0;
    pub const WORLD_HEIGHT: f32 = 844.0;

    /// Horizontal lane centers, left to right
    pub const LANES: [f32; 3] = [130.0, 195.0, 260.0];
    /// Lane the player starts in (middle)
    pub const START_LANE: usize = 1;

    /// Ground line: player feet, ground hazards and enemies rest here
    pub const GROUND_Y: f32 = 700.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    pub const MAX_HEALTH: u32 = 100;

    /// Longest frame the simulation will accept (ms); longer gaps are clamped
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Loading screen duration before the menu becomes interactive (ms)
    pub const LOADING_DELAY_MS: f64 = 2000.0;

    /// Default on-screen message duration (ms)
    pub const MESSAGE_MS: u32 = 2000;

    /// Particles per feedback burst
    pub const PARTICLE_BURST: usize = 8;
    /// Particle lifetime (ticks)
    pub const PARTICLE_LIFE: u32 = 30;

    /// LocalStorage key holding the profile blob
    pub const STORAGE_KEY: &str = "lane_dash_profile";
}
