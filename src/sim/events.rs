//! Outbound events
//!
//! The simulation never touches audio, haptics or the DOM. Everything the
//! host should react to is queued here and drained once per frame.

use serde::{Deserialize, Serialize};

use super::state::SessionPhase;
use crate::achievements::AchievementId;

/// Discrete sound/haptic cue tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Click,
    Collect,
    Damage,
    Jump,
    Move,
    Start,
    GameOver,
    Achievement,
}

/// Something the host should present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Vibrate { duration_ms: u32 },
    Message { text: String, duration_ms: u32 },
    PhaseChanged(SessionPhase),
    SpeedUp { speed: f32 },
    AchievementUnlocked(AchievementId),
    SessionEnded {
        score: u64,
        distance: u64,
        time_secs: u64,
        /// Leaderboard rank (1-indexed) if the run made the top 10
        rank: Option<usize>,
        quote: String,
    },
}
