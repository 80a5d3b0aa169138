//! Session lifecycle
//!
//! Loading → Idle → Playing ⇄ Paused, Playing/Paused → GameOver → Idle or
//! Playing. Calls that are not legal from the current phase are ignored and
//! return false.

use super::events::{GameEvent, SoundCue};
use super::state::{GameState, LaneShift, Player, SessionPhase};
use crate::achievements::AchievementId;
use crate::consts::*;
use crate::content::{self, QuoteCategory};
use crate::highscores::HighScoreEntry;
use crate::settings::Settings;

impl GameState {
    /// Count loading time; the menu opens after the fixed delay
    pub fn advance_loading(&mut self, dt_ms: f64) {
        if self.phase != SessionPhase::Loading {
            return;
        }
        self.loading_ms += dt_ms.max(0.0);
        if self.loading_ms >= LOADING_DELAY_MS {
            log::info!("Loading complete");
            self.set_phase(SessionPhase::Idle);
        }
    }

    /// Begin a fresh run (from Idle or GameOver)
    ///
    /// `date` is the host's display date recorded in the high-score entry.
    pub fn start(&mut self, date: impl Into<String>) -> bool {
        if !matches!(self.phase, SessionPhase::Idle | SessionPhase::GameOver) {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }

        self.score = 0;
        self.health = MAX_HEALTH;
        self.distance = 0.0;
        self.base_speed = self.tuning.base_speed;
        self.next_speed_up_at = self.tuning.speed_up_interval;
        self.clock_ms = 0.0;
        self.session_date = date.into();
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.collectibles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.effects.clear();

        log::info!("Run started (seed {}, {:?})", self.seed, self.profile.settings.difficulty);
        self.set_phase(SessionPhase::Playing);

        let quote = QuoteCategory::Start.pick(&mut self.rng);
        self.message(quote);
        self.unlock_achievement(AchievementId::FirstRun);
        self.sound(SoundCue::Start);
        true
    }

    /// Freeze the run (Playing only)
    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        log::info!("Paused at distance {:.0}", self.distance);
        self.set_phase(SessionPhase::Paused);
        true
    }

    /// Continue a paused run
    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        log::info!("Resumed");
        self.set_phase(SessionPhase::Playing);
        true
    }

    /// Finish the run, record the high score and show the summary
    pub fn end(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::Playing | SessionPhase::Paused) {
            return false;
        }

        let score = self.score;
        let distance = self.distance.floor() as u64;
        let time_secs = (self.clock_ms / 1000.0).floor() as u64;
        let rank = self.profile.high_scores.add_score(HighScoreEntry {
            score,
            distance,
            time: time_secs,
            date: self.session_date.clone(),
        });
        self.mark_profile_dirty();

        log::info!(
            "Run over: score {} distance {} time {}s rank {:?}",
            score,
            distance,
            time_secs,
            rank
        );
        self.set_phase(SessionPhase::GameOver);

        let quote = QuoteCategory::GameOver.pick(&mut self.rng).to_string();
        self.emit(GameEvent::SessionEnded {
            score,
            distance,
            time_secs,
            rank,
            quote,
        });
        self.sound(SoundCue::GameOver);
        true
    }

    /// Leave the game-over screen for the menu
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != SessionPhase::GameOver {
            return false;
        }
        self.set_phase(SessionPhase::Idle);
        true
    }

    /// Switch lanes (Playing only)
    pub fn move_lane(&mut self, shift: LaneShift) -> bool {
        if self.phase != SessionPhase::Playing || !self.player.shift_lane(shift) {
            return false;
        }
        self.sound(SoundCue::Move);
        true
    }

    /// Jump (Playing only, ignored while airborne)
    pub fn jump(&mut self) -> bool {
        if self.phase != SessionPhase::Playing || !self.player.start_jump(self.tuning.jump_power) {
            return false;
        }
        self.sound(SoundCue::Jump);
        true
    }

    pub fn update_settings(&mut self, settings: Settings) {
        if self.profile.settings != settings {
            self.profile.settings = settings;
            self.mark_profile_dirty();
        }
    }

    /// Forget high scores and achievement progress (settings survive)
    pub fn reset_profile(&mut self) {
        self.profile.high_scores.clear();
        self.profile.achievements.reset();
        self.mark_profile_dirty();
        log::info!("Profile reset");
        self.message(content::DATA_RESET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Profile;
    use crate::tuning::Tuning;

    fn idle_state() -> GameState {
        let mut state = GameState::new(21, Profile::default(), Tuning::without_spawns());
        state.advance_loading(LOADING_DELAY_MS);
        state
    }

    #[test]
    fn test_loading_becomes_idle_after_delay() {
        let mut state = GameState::new(21, Profile::default(), Tuning::default());
        state.advance_loading(1500.0);
        assert_eq!(state.phase, SessionPhase::Loading);
        state.advance_loading(500.0);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.drain_events().contains(&GameEvent::PhaseChanged(SessionPhase::Idle)));
    }

    #[test]
    fn test_start_only_from_idle_or_game_over() {
        let mut state = GameState::new(21, Profile::default(), Tuning::default());
        assert!(!state.start("today"));
        state.advance_loading(LOADING_DELAY_MS);
        assert!(state.start("today"));
        assert!(!state.start("today"));
        assert_eq!(state.phase, SessionPhase::Playing);
        assert!(state.profile.achievements.is_unlocked(AchievementId::FirstRun));
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = idle_state();
        state.start("today");
        state.score = 500;
        state.health = 10;
        state.distance = 900.0;
        state.base_speed = 4.0;
        state.player.shift_lane(LaneShift::Left);
        state.end();
        assert!(state.start("tomorrow"));
        assert_eq!(state.score, 0);
        assert_eq!(state.health, MAX_HEALTH);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.world_speed(), 2.0);
        assert_eq!(state.player.lane, START_LANE);
        assert_eq!(state.session_date, "tomorrow");
    }

    #[test]
    fn test_pause_resume_rules() {
        let mut state = idle_state();
        assert!(!state.pause());
        state.start("today");
        assert!(!state.resume());
        assert!(state.pause());
        assert!(!state.pause());
        assert_eq!(state.phase, SessionPhase::Paused);
        assert!(state.resume());
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_end_records_high_score() {
        let mut state = idle_state();
        state.start("16. 10. 2026");
        state.score = 1234;
        state.distance = 456.7;
        state.clock_ms = 12_900.0;
        state.drain_events();
        assert!(state.end());
        assert_eq!(state.phase, SessionPhase::GameOver);

        let entry = &state.profile.high_scores.entries[0];
        assert_eq!(entry.score, 1234);
        assert_eq!(entry.distance, 456);
        assert_eq!(entry.time, 12);
        assert_eq!(entry.date, "16. 10. 2026");

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::SessionEnded { score: 1234, rank: Some(1), .. }
        )));
        assert!(state.take_profile_dirty());
        assert!(!state.end());
    }

    #[test]
    fn test_end_from_paused() {
        let mut state = idle_state();
        state.start("today");
        state.pause();
        assert!(state.end());
        assert_eq!(state.profile.high_scores.len(), 1);
    }

    #[test]
    fn test_return_to_menu() {
        let mut state = idle_state();
        assert!(!state.return_to_menu());
        state.start("today");
        state.end();
        assert!(state.return_to_menu());
        assert_eq!(state.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_controls_ignored_outside_playing() {
        let mut state = idle_state();
        assert!(!state.jump());
        assert!(!state.move_lane(LaneShift::Left));
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.lane, START_LANE);
    }

    #[test]
    fn test_move_and_jump_emit_cues() {
        let mut state = idle_state();
        state.start("today");
        state.drain_events();
        assert!(state.move_lane(LaneShift::Left));
        assert!(!state.move_lane(LaneShift::Left));
        assert!(state.jump());
        assert!(!state.jump());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Sound(SoundCue::Move), GameEvent::Sound(SoundCue::Jump)]
        );
    }

    #[test]
    fn test_reset_profile_keeps_settings() {
        let mut state = idle_state();
        let mut settings = state.profile.settings.clone();
        settings.sound = false;
        state.update_settings(settings);
        state.start("today");
        state.end();
        state.reset_profile();
        assert!(state.profile.high_scores.is_empty());
        assert_eq!(state.profile.achievements.unlocked_count(), 0);
        assert!(!state.profile.settings.sound);
    }

    #[test]
    fn test_update_settings_marks_dirty_only_on_change() {
        let mut state = idle_state();
        let settings = state.profile.settings.clone();
        state.update_settings(settings.clone());
        assert!(!state.take_profile_dirty());
        state.update_settings(Settings {
            vibration: false,
            ..settings
        });
        assert!(state.take_profile_dirty());
    }
}
