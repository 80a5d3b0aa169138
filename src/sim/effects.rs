//! Timed power-ups
//!
//! At most one effect per kind is active; re-activating a kind replaces its
//! expiry instead of stacking. The speed boost is never folded into
//! `base_speed`: `GameState::world_speed` applies the multiplier while the
//! effect is present, so expiry restores the pre-boost speed exactly.

use std::collections::BTreeMap;

use super::state::GameState;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerUpKind {
    Speed,
    Invincibility,
    /// Instant heal, recorded with zero duration
    Health,
}

/// Display metadata and duration
#[derive(Debug, Clone, Copy)]
pub struct PowerUpMeta {
    pub name: &'static str,
    pub icon: &'static str,
    pub duration_ms: f64,
}

impl PowerUpKind {
    pub fn meta(&self) -> PowerUpMeta {
        match self {
            PowerUpKind::Speed => PowerUpMeta {
                name: "Quick Rush",
                icon: "⚡",
                duration_ms: 5000.0,
            },
            PowerUpKind::Invincibility => PowerUpMeta {
                name: "Invisibility",
                icon: "👻",
                duration_ms: 3000.0,
            },
            PowerUpKind::Health => PowerUpMeta {
                name: "Extra Dose",
                icon: "💉",
                duration_ms: 0.0,
            },
        }
    }
}

/// A running effect
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub name: &'static str,
    pub icon: &'static str,
    /// Play-clock time at which the effect ends
    pub expires_at_ms: f64,
}

/// HUD line for one active effect
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpStatus {
    pub kind: PowerUpKind,
    pub icon: &'static str,
    /// Whole seconds remaining, rounded up
    pub secs_left: u64,
}

/// Active effects keyed by kind
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    effects: BTreeMap<PowerUpKind, ActiveEffect>,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn get(&self, kind: PowerUpKind) -> Option<&ActiveEffect> {
        self.effects.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Record (or replace) an effect
    fn insert(&mut self, kind: PowerUpKind, now_ms: f64) {
        let meta = kind.meta();
        self.effects.insert(
            kind,
            ActiveEffect {
                kind,
                name: meta.name,
                icon: meta.icon,
                expires_at_ms: now_ms + meta.duration_ms,
            },
        );
    }

    /// Remove and return every effect whose expiry has passed
    fn take_expired(&mut self, now_ms: f64) -> Vec<PowerUpKind> {
        let expired: Vec<PowerUpKind> = self
            .effects
            .values()
            .filter(|e| now_ms >= e.expires_at_ms)
            .map(|e| e.kind)
            .collect();
        for kind in &expired {
            self.effects.remove(kind);
        }
        expired
    }

    pub fn status(&self, now_ms: f64) -> Vec<PowerUpStatus> {
        self.effects
            .values()
            .map(|e| PowerUpStatus {
                kind: e.kind,
                icon: e.icon,
                secs_left: ((e.expires_at_ms - now_ms) / 1000.0).ceil().max(0.0) as u64,
            })
            .collect()
    }
}

/// Activate a power-up and apply its immediate effect
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    state.effects.insert(kind, state.clock_ms);
    match kind {
        PowerUpKind::Speed => {}
        PowerUpKind::Invincibility => state.player.invincible = true,
        PowerUpKind::Health => state.heal(state.tuning.health_power_up),
    }
    log::debug!("Power-up {:?} active (world speed {})", kind, state.world_speed());
}

/// Drop expired effects and reverse what they applied
pub fn sweep_expired(state: &mut GameState) {
    for kind in state.effects.take_expired(state.clock_ms) {
        match kind {
            PowerUpKind::Invincibility => state.player.invincible = false,
            PowerUpKind::Speed | PowerUpKind::Health => {}
        }
        log::debug!("Power-up {:?} expired", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_HEALTH;
    use crate::persistence::Profile;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(5, Profile::default(), Tuning::default())
    }

    #[test]
    fn test_speed_boost_does_not_stack() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::Speed);
        state.clock_ms = 1000.0;
        activate_power_up(&mut state, PowerUpKind::Speed);
        assert_eq!(state.world_speed(), 3.0);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects.get(PowerUpKind::Speed).unwrap().expires_at_ms, 6000.0);
    }

    #[test]
    fn test_speed_expiry_restores_speed() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::Speed);
        state.clock_ms = 4999.0;
        sweep_expired(&mut state);
        assert_eq!(state.world_speed(), 3.0);
        state.clock_ms = 5000.0;
        sweep_expired(&mut state);
        assert_eq!(state.world_speed(), 2.0);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_invincibility_sets_and_clears_flag() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::Invincibility);
        assert!(state.player.invincible);
        state.clock_ms = 3000.0;
        sweep_expired(&mut state);
        assert!(!state.player.invincible);
    }

    #[test]
    fn test_health_power_up_is_instant() {
        let mut state = state();
        state.health = 50;
        activate_power_up(&mut state, PowerUpKind::Health);
        assert_eq!(state.health, 80);
        assert!(state.effects.is_active(PowerUpKind::Health));
        sweep_expired(&mut state);
        assert!(!state.effects.is_active(PowerUpKind::Health));

        state.health = 90;
        activate_power_up(&mut state, PowerUpKind::Health);
        assert_eq!(state.health, MAX_HEALTH);
    }

    #[test]
    fn test_status_rounds_up() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::Speed);
        state.clock_ms = 1200.0;
        let status = state.effects.status(state.clock_ms);
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].secs_left, 4);
        assert_eq!(status[0].icon, "⚡");
    }
}
