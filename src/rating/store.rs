// Profile persistence

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::profile::Profile;

/// Load/save capability for the single player profile
pub trait ProfileStore: Send + Sync {
    fn load_profile(&self) -> Result<Profile>;
    fn save_profile(&self, profile: &Profile) -> Result<()>;
}

/// Pretty-printed JSON file store
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonProfileStore {
    /// A missing or unreadable file yields a fresh default profile.
    fn load_profile(&self) -> Result<Profile> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No profile found, starting fresh");
            return Ok(Profile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read profile: {}", self.path.display()))?;

        match serde_json::from_str(&contents) {
            Ok(profile) => Ok(profile),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Profile is corrupt, starting fresh"
                );
                Ok(Profile::default())
            }
        }
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create profile directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

        // Write-then-rename so a crash never leaves a half-written profile
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write profile: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace profile: {}", self.path.display()))?;

        Ok(())
    }
}

/// In-memory store (tests, ephemeral runs)
#[derive(Default)]
pub struct MemoryProfileStore {
    profile: Mutex<Option<Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_profile(&self) -> Result<Profile> {
        let guard = self
            .profile
            .lock()
            .map_err(|_| anyhow::anyhow!("profile lock poisoned"))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|_| anyhow::anyhow!("profile lock poisoned"))?;
        *guard = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Rank;

    #[test]
    fn test_json_store_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path().join("user_data.json"));
        let profile = store.load_profile().unwrap();
        assert_eq!(profile.rating, 0);
        assert_eq!(profile.username, "Player");
    }

    #[test]
    fn test_json_store_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path().join("nested").join("user_data.json"));

        let profile = Profile {
            rating: 140,
            rank: Rank::Silver,
            wins: 9,
            ..Profile::default()
        };
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile().unwrap();
        assert_eq!(loaded, profile);
        assert!(!dir.path().join("nested").join("user_data.json.tmp").exists());
    }

    #[test]
    fn test_json_store_corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        fs::write(&path, "{ not json").unwrap();

        let profile = JsonProfileStore::new(&path).load_profile().unwrap();
        assert_eq!(profile.total_sessions, 0);
    }

    #[test]
    fn test_json_store_keeps_older_profile_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        fs::write(
            &path,
            "{\n  \"username\": \"Player\",\n  \"rank\": \"Silver\",\n  \"elo\": 140,\n  \
             \"streak_days\": 2,\n  \"last_played\": \"2026-10-15T21:04:11.532210\",\n  \
             \"total_debates\": 5,\n  \"wins\": 3,\n  \"losses\": 2,\n  \
             \"hot_takes_played\": 0,\n  \"ranked_played\": 5,\n  \"podcast_played\": 0,\n  \
             \"best_streak\": 2,\n  \"average_score\": 6.2,\n  \
             \"created_at\": \"2026-10-01T09:15:42.001337\"\n}",
        )
        .unwrap();

        let store = JsonProfileStore::new(&path);
        let profile = store.load_profile().unwrap();
        assert_eq!(profile.rating, 140);
        assert_eq!(profile.rank, Rank::Silver);
        assert_eq!(profile.total_sessions, 5);
        assert_eq!(
            profile.last_played,
            chrono::NaiveDate::from_ymd_opt(2026, 10, 15)
        );

        // Re-saving writes the current format, which loads back unchanged
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), profile);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryProfileStore::new();
        assert_eq!(store.load_profile().unwrap().rating, 0);

        let profile = Profile {
            rating: 42,
            ..Profile::default()
        };
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap().rating, 42);
    }
}
