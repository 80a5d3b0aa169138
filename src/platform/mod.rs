//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input recognition (keyboard codes, swipes)
//! - Storage (LocalStorage on web)
//! - Haptics (navigator.vibrate on web)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod haptics;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::{SWIPE_MIN_DISTANCE, SwipeRecognizer, intent_for_key};

#[cfg(target_arch = "wasm32")]
pub use haptics::Haptics;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
