//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per host frame, play clock clamped per frame
//! - Seeded RNG only
//! - Entities kept in spawn (ID) order
//! - No rendering or platform dependencies; side effects leave as `GameEvent`s

pub mod collision;
pub mod effects;
pub mod events;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use effects::{ActiveEffect, ActiveEffects, PowerUpKind, PowerUpStatus, activate_power_up};
pub use events::{GameEvent, SoundCue};
pub use state::{
    Collectible, CollectibleKind, Enemy, GameState, Hud, LaneShift, Obstacle, ObstacleKind,
    Particle, Player, SessionPhase, Snapshot, Tint,
};
pub use tick::{Intent, TickInput, tick};
