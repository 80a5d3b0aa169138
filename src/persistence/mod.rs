//! Profile persistence
//!
//! The whole profile (high scores, achievements, settings) is one JSON blob
//! under `consts::STORAGE_KEY`. Loading never fails: missing, unreadable or
//! corrupt data yields defaults. Saving reports failures to the caller.

pub mod store;

use serde::{Deserialize, Serialize};

use crate::achievements::Achievements;
use crate::consts::STORAGE_KEY;
use crate::highscores::HighScores;
use crate::settings::Settings;

pub use store::{KeyValueStore, MemoryStore, StoreError};

/// Everything that outlives a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub high_scores: HighScores,
    pub achievements: Achievements,
    pub settings: Settings,
}

/// Save failures
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to encode profile: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write profile: {0}")]
    Store(#[from] StoreError),
}

impl Profile {
    /// Parse a saved blob, repairing ordering and bounds
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut profile: Profile = serde_json::from_str(json)?;
        profile.high_scores.normalize();
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Load the saved profile, falling back to defaults on any failure
pub fn load(store: &dyn KeyValueStore) -> Profile {
    let json = match store.get(STORAGE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No saved profile, using defaults");
            return Profile::default();
        }
        Err(e) => {
            log::warn!("Failed to read profile: {}", e);
            return Profile::default();
        }
    };

    match Profile::from_json(&json) {
        Ok(profile) => {
            log::info!(
                "Loaded profile: {} high scores, {} achievements unlocked",
                profile.high_scores.len(),
                profile.achievements.unlocked_count()
            );
            profile
        }
        Err(e) => {
            log::warn!("Corrupt profile, using defaults: {}", e);
            Profile::default()
        }
    }
}

/// Write the profile as a single blob
pub fn save(store: &mut dyn KeyValueStore, profile: &Profile) -> Result<(), PersistError> {
    let json = profile.to_json()?;
    store.set(STORAGE_KEY, &json)?;
    log::debug!("Saved profile ({} bytes)", json.len());
    Ok(())
}

/// Delete the saved profile
pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), PersistError> {
    store.remove(STORAGE_KEY)?;
    log::info!("Cleared saved profile");
    Ok(())
}
