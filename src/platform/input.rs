//! Raw input → intents
//!
//! Keyboard codes and touch swipes are translated here so the simulation
//! only ever sees `Intent`s.

use glam::Vec2;

use crate::sim::Intent;

/// Minimum swipe length (CSS px) before a gesture counts
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Map a `KeyboardEvent.code` to an intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Intent::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Intent::MoveRight),
        "ArrowUp" | "KeyW" | "Space" => Some(Intent::Jump),
        "Escape" => Some(Intent::Pause),
        _ => None,
    }
}

/// Single-touch swipe detector
///
/// The dominant axis of the start → end vector decides the gesture.
/// Downward swipes are recognized but produce no intent.
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    start: Option<Vec2>,
    min_distance: f32,
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(SWIPE_MIN_DISTANCE)
    }
}

impl SwipeRecognizer {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    /// Touch went down
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some(Vec2::new(x, y));
    }

    /// Touch lifted; returns the intent for the completed gesture, if any
    pub fn end(&mut self, x: f32, y: f32) -> Option<Intent> {
        let start = self.start.take()?;
        let delta = Vec2::new(x, y) - start;

        if delta.x.abs() > delta.y.abs() {
            if delta.x.abs() < self.min_distance {
                return None;
            }
            Some(if delta.x > 0.0 {
                Intent::MoveRight
            } else {
                Intent::MoveLeft
            })
        } else {
            // Screen y grows downward
            if delta.y.abs() < self.min_distance || delta.y > 0.0 {
                return None;
            }
            Some(Intent::Jump)
        }
    }

    /// Touch interrupted by the platform
    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key("KeyA"), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key("KeyD"), Some(Intent::MoveRight));
        assert_eq!(intent_for_key("Space"), Some(Intent::Jump));
        assert_eq!(intent_for_key("KeyW"), Some(Intent::Jump));
        assert_eq!(intent_for_key("Escape"), Some(Intent::Pause));
        assert_eq!(intent_for_key("KeyS"), None);
        assert_eq!(intent_for_key("ArrowDown"), None);
    }

    #[test]
    fn test_horizontal_swipes() {
        let mut swipe = SwipeRecognizer::default();
        swipe.begin(100.0, 400.0);
        assert_eq!(swipe.end(180.0, 420.0), Some(Intent::MoveRight));
        swipe.begin(200.0, 400.0);
        assert_eq!(swipe.end(120.0, 390.0), Some(Intent::MoveLeft));
    }

    #[test]
    fn test_up_swipe_jumps_down_is_ignored() {
        let mut swipe = SwipeRecognizer::default();
        swipe.begin(100.0, 400.0);
        assert_eq!(swipe.end(110.0, 300.0), Some(Intent::Jump));
        swipe.begin(100.0, 400.0);
        assert_eq!(swipe.end(110.0, 500.0), None);
    }

    #[test]
    fn test_short_swipe_is_a_tap() {
        let mut swipe = SwipeRecognizer::default();
        swipe.begin(100.0, 400.0);
        assert_eq!(swipe.end(140.0, 410.0), None);
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn test_end_without_begin() {
        let mut swipe = SwipeRecognizer::default();
        assert_eq!(swipe.end(300.0, 400.0), None);
        swipe.begin(0.0, 0.0);
        swipe.cancel();
        assert_eq!(swipe.end(300.0, 0.0), None);
    }
}
