//! Flavor text shown in transient on-screen messages

use rand::Rng;

/// Quote pools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteCategory {
    Start,
    Collect,
    Damage,
    GameOver,
}

const START: &[&str] = &["Let's go, mate!", "Gonna be a wild ride!", "Time for action!"];
const COLLECT: &[&str] = &["Good stuff!", "That saves the night!", "Perfect!"];
const DAMAGE: &[&str] = &["You got hit!", "That hurts more than withdrawal!", "Ouch!"];
const GAME_OVER: &[&str] = &["They caught you!", "Take another route next time!", "Game over!"];

/// Fixed messages
pub const ENEMY_HIT: &str = "Busted by a patrol!";
pub const HEALTH_RESTORED: &str = "Health restored!";
pub const SPEED_BOOST: &str = "Speed boost!";
pub const SPEED_UP: &str = "Faster!";
pub const DATA_RESET: &str = "Data reset!";

impl QuoteCategory {
    pub fn pool(&self) -> &'static [&'static str] {
        match self {
            QuoteCategory::Start => START,
            QuoteCategory::Collect => COLLECT,
            QuoteCategory::Damage => DAMAGE,
            QuoteCategory::GameOver => GAME_OVER,
        }
    }

    /// Pick a quote with the caller's RNG (keeps the simulation reproducible)
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &'static str {
        let pool = self.pool();
        pool[rng.random_range(0..pool.len())]
    }
}
