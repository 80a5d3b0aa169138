//! Achievement catalog and progress
//!
//! The catalog is static; only the unlock flag and progress counter are
//! persisted. Both move forward only: progress never decreases and an
//! unlocked achievement never re-locks (short of a full profile reset).

use serde::{Deserialize, Serialize};

/// Achievement identifiers (stable, persisted as snake_case strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstRun,
    Collector,
    Survivor,
    Speedster,
    Untouchable,
    HighScore,
}

/// Static display data for an achievement
#[derive(Debug, Clone, Copy)]
pub struct AchievementInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Progress target for counter-based achievements
    pub target: Option<u32>,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstRun,
        AchievementId::Collector,
        AchievementId::Survivor,
        AchievementId::Speedster,
        AchievementId::Untouchable,
        AchievementId::HighScore,
    ];

    /// Persisted identifier
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstRun => "first_run",
            AchievementId::Collector => "collector",
            AchievementId::Survivor => "survivor",
            AchievementId::Speedster => "speedster",
            AchievementId::Untouchable => "untouchable",
            AchievementId::HighScore => "high_score",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn info(&self) -> AchievementInfo {
        match self {
            AchievementId::FirstRun => AchievementInfo {
                title: "First Escape",
                description: "Start your first run",
                icon: "🏃",
                target: None,
            },
            AchievementId::Collector => AchievementInfo {
                title: "Collector",
                description: "Pick up 50 stashes",
                icon: "💊",
                target: Some(50),
            },
            AchievementId::Survivor => AchievementInfo {
                title: "Survivor",
                description: "Run 1000 meters",
                icon: "🏃‍♂️",
                target: None,
            },
            AchievementId::Speedster => AchievementInfo {
                title: "Speedster",
                description: "Trigger 10 speed boosts",
                icon: "⚡",
                target: Some(10),
            },
            AchievementId::Untouchable => AchievementInfo {
                title: "Untouchable",
                description: "Reach 500 meters at full health",
                icon: "🛡️",
                target: None,
            },
            AchievementId::HighScore => AchievementInfo {
                title: "Record Holder",
                description: "Score more than 10,000",
                icon: "👑",
                target: None,
            },
        }
    }
}

/// Persisted achievement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

impl Achievement {
    fn fresh(id: AchievementId) -> Self {
        Self {
            id,
            unlocked: false,
            progress: id.info().target.map(|_| 0),
        }
    }
}

/// All achievements in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Achievements {
    entries: Vec<Achievement>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            entries: AchievementId::ALL.iter().map(|&id| Achievement::fresh(id)).collect(),
        }
    }
}

/// Saved lists are merged into the catalog: unknown ids are dropped,
/// missing ids start fresh, progress is clamped to the target.
impl<'de> Deserialize<'de> for Achievements {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Saved {
            id: String,
            #[serde(default)]
            unlocked: bool,
            #[serde(default)]
            progress: Option<u32>,
        }

        let saved = Vec::<Saved>::deserialize(deserializer)?;
        let mut achievements = Achievements::default();
        for record in saved {
            let Some(id) = AchievementId::from_key(&record.id) else {
                continue;
            };
            if let Some(entry) = achievements.entry_mut(id) {
                entry.unlocked = record.unlocked;
                if let (Some(target), Some(progress)) = (id.info().target, record.progress) {
                    entry.progress = Some(progress.min(target));
                }
            }
        }
        Ok(achievements)
    }
}

impl Achievements {
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn get(&self, id: AchievementId) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id == id)
    }

    fn entry_mut(&mut self, id: AchievementId) -> Option<&mut Achievement> {
        self.entries.iter_mut().find(|a| a.id == id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.get(id).is_some_and(|a| a.unlocked)
    }

    /// Unlock an achievement. Returns true only on the locked → unlocked flip.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        match self.entry_mut(id) {
            Some(entry) if !entry.unlocked => {
                entry.unlocked = true;
                true
            }
            _ => false,
        }
    }

    /// Advance a counter achievement.
    ///
    /// Returns `Progress::Unlocked` when this call pushed it over the target,
    /// `Progress::Advanced` for a plain increment, and `Progress::Unchanged`
    /// when the achievement is already unlocked or has no counter.
    pub fn advance(&mut self, id: AchievementId, amount: u32) -> Progress {
        let Some(target) = id.info().target else {
            return Progress::Unchanged;
        };
        let Some(entry) = self.entry_mut(id) else {
            return Progress::Unchanged;
        };
        if entry.unlocked {
            return Progress::Unchanged;
        }

        let progress = entry.progress.unwrap_or(0).saturating_add(amount).min(target);
        entry.progress = Some(progress);
        if progress >= target {
            entry.unlocked = true;
            Progress::Unlocked
        } else {
            Progress::Advanced
        }
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Wipe all progress (profile reset)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of [`Achievements::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Unchanged,
    Advanced,
    Unlocked,
}
