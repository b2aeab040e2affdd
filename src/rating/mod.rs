// Rating engine
//
// Converts a finished session's overall score into a rating change, rank,
// win/loss and streak update. The profile is shared process-wide; every
// update is a read-modify-write under one lock and is only committed in
// memory once the store has accepted it.

pub mod elo;
mod profile;
mod store;

pub use elo::{apply_delta, is_win, rating_delta};
pub use profile::{Profile, Rank, RankProgress};
pub use store::{JsonProfileStore, MemoryProfileStore, ProfileStore};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{Difficulty, GameMode};
use crate::errors::{DebateError, DebateResult};

/// Outcome of recording one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionRating {
    pub rating_delta: i32,
    pub new_rating: u32,
    pub new_rank: Rank,
    pub won: bool,
}

pub struct RatingEngine {
    store: Arc<dyn ProfileStore>,
    profile: Mutex<Profile>,
}

impl RatingEngine {
    /// Load the profile from `store` and take ownership of it
    pub fn load(store: Arc<dyn ProfileStore>) -> DebateResult<Self> {
        let mut profile = store.load_profile().map_err(DebateError::persistence)?;
        // Rank is derived; repair files edited by hand
        profile.rank = Rank::for_rating(profile.rating);

        Ok(Self {
            store,
            profile: Mutex::new(profile),
        })
    }

    /// Current profile snapshot
    pub async fn profile(&self) -> Profile {
        self.profile.lock().await.clone()
    }

    /// Record a finished session played today (local calendar)
    pub async fn record_session(
        &self,
        mode: GameMode,
        overall_score: f64,
        difficulty: Difficulty,
    ) -> DebateResult<SessionRating> {
        self.record_session_on(mode, overall_score, difficulty, Local::now().date_naive())
            .await
    }

    /// Record a finished session played on `today`
    pub async fn record_session_on(
        &self,
        mode: GameMode,
        overall_score: f64,
        difficulty: Difficulty,
        today: NaiveDate,
    ) -> DebateResult<SessionRating> {
        let mut guard = self.profile.lock().await;
        let mut next = guard.clone();

        next.total_sessions += 1;
        let won = is_win(overall_score);
        if won {
            next.wins += 1;
        } else {
            next.losses += 1;
        }
        next.count_play(mode);

        let mut delta = 0;
        if mode == GameMode::Ranked {
            delta = rating_delta(overall_score, difficulty);
            next.rating = apply_delta(next.rating, delta);
            next.rank = Rank::for_rating(next.rating);
        }

        next.fold_average(overall_score);
        next.update_streak(today);

        // File stores do blocking IO; keep it off the runtime workers
        let store = Arc::clone(&self.store);
        let snapshot = next.clone();
        tokio::task::spawn_blocking(move || store.save_profile(&snapshot))
            .await
            .map_err(|e| DebateError::Persistence(format!("profile save task failed: {}", e)))?
            .map_err(DebateError::persistence)?;

        tracing::info!(
            %mode,
            %difficulty,
            score = overall_score,
            won,
            delta,
            rating = next.rating,
            rank = %next.rank,
            "Session recorded"
        );

        let result = SessionRating {
            rating_delta: delta,
            new_rating: next.rating,
            new_rank: next.rank,
            won,
        };
        *guard = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(profile: Profile) -> (RatingEngine, Arc<MemoryProfileStore>) {
        let store = Arc::new(MemoryProfileStore::with_profile(profile));
        let engine = RatingEngine::load(store.clone()).unwrap();
        (engine, store)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    #[tokio::test]
    async fn test_medium_loss_scenario() {
        let (engine, _) = engine_with(Profile {
            rating: 50,
            ..Profile::default()
        });

        let result = engine
            .record_session_on(GameMode::Ranked, 3.0, Difficulty::Medium, today())
            .await
            .unwrap();

        assert_eq!(result.rating_delta, -10);
        assert_eq!(result.new_rating, 40);
        assert_eq!(result.new_rank, Rank::Bronze);
        assert!(!result.won);

        let profile = engine.profile().await;
        assert_eq!(profile.losses, 1);
        assert_eq!(profile.ranked_played, 1);
    }

    #[tokio::test]
    async fn test_hard_win_scenario_promotes() {
        let (engine, store) = engine_with(Profile {
            rating: 180,
            rank: Rank::Silver,
            ..Profile::default()
        });

        let result = engine
            .record_session_on(GameMode::Ranked, 9.0, Difficulty::Hard, today())
            .await
            .unwrap();

        assert_eq!(result.rating_delta, 50);
        assert_eq!(result.new_rating, 230);
        assert_eq!(result.new_rank, Rank::Gold);
        assert!(result.won);
        assert_eq!(store.load_profile().unwrap().rating, 230);
    }

    #[tokio::test]
    async fn test_rating_floors_at_zero() {
        let (engine, _) = engine_with(Profile {
            rating: 5,
            ..Profile::default()
        });

        let result = engine
            .record_session_on(GameMode::Ranked, 0.0, Difficulty::Hard, today())
            .await
            .unwrap();

        assert_eq!(result.rating_delta, -20);
        assert_eq!(result.new_rating, 0);
    }

    #[tokio::test]
    async fn test_unranked_modes_leave_rating_alone() {
        let (engine, _) = engine_with(Profile {
            rating: 120,
            rank: Rank::Silver,
            ..Profile::default()
        });

        let hot = engine
            .record_session_on(GameMode::HotTakes, 9.5, Difficulty::Hard, today())
            .await
            .unwrap();
        let pod = engine
            .record_session_on(GameMode::Podcast, 2.0, Difficulty::Easy, today())
            .await
            .unwrap();

        assert_eq!(hot.rating_delta, 0);
        assert_eq!(hot.new_rating, 120);
        assert!(hot.won);
        assert!(!pod.won);

        let profile = engine.profile().await;
        assert_eq!(profile.rating, 120);
        assert_eq!(profile.rank, Rank::Silver);
        assert_eq!(profile.wins, 1);
        assert_eq!(profile.losses, 1);
        assert_eq!(profile.hot_takes_played, 1);
        assert_eq!(profile.podcast_played, 1);
        assert_eq!(profile.total_sessions, 2);
        assert!((profile.average_score - 5.75).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_streak_across_days() {
        let (engine, _) = engine_with(Profile::default());
        let day1 = today();
        let day2 = day1.succ_opt().unwrap();
        let day5 = day2 + chrono::Duration::days(3);

        engine
            .record_session_on(GameMode::Podcast, 7.0, Difficulty::Easy, day1)
            .await
            .unwrap();
        engine
            .record_session_on(GameMode::Podcast, 7.0, Difficulty::Easy, day2)
            .await
            .unwrap();
        assert_eq!(engine.profile().await.streak_days, 2);

        engine
            .record_session_on(GameMode::Podcast, 7.0, Difficulty::Easy, day5)
            .await
            .unwrap();
        let profile = engine.profile().await;
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 2);
    }

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn load_profile(&self) -> anyhow::Result<Profile> {
            Ok(Profile::default())
        }
        fn save_profile(&self, _profile: &Profile) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[tokio::test]
    async fn test_failed_save_leaves_profile_untouched() {
        let engine = RatingEngine::load(Arc::new(FailingStore)).unwrap();
        let err = engine
            .record_session_on(GameMode::Ranked, 9.0, Difficulty::Hard, today())
            .await
            .unwrap_err();

        assert!(matches!(err, DebateError::Persistence(_)));
        let profile = engine.profile().await;
        assert_eq!(profile.total_sessions, 0);
        assert_eq!(profile.rating, 0);
    }

    /// Blocks inside `save_profile` until the test releases it
    struct GatedStore {
        started: std::sync::Mutex<Option<tokio::sync::oneshot::Sender<()>>>,
        release: std::sync::Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl ProfileStore for GatedStore {
        fn load_profile(&self) -> anyhow::Result<Profile> {
            Ok(Profile::default())
        }
        fn save_profile(&self, _profile: &Profile) -> anyhow::Result<()> {
            if let Some(started) = self.started.lock().unwrap().take() {
                let _ = started.send(());
            }
            self.release
                .lock()
                .unwrap()
                .recv_timeout(std::time::Duration::from_secs(5))
                .map_err(|_| anyhow::anyhow!("save was never released"))
        }
    }

    // Single-threaded runtime: a save that blocked the runtime thread would
    // starve the task that releases it.
    #[tokio::test]
    async fn test_save_does_not_block_runtime() {
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let store = GatedStore {
            started: std::sync::Mutex::new(Some(started_tx)),
            release: std::sync::Mutex::new(release_rx),
        };
        let engine = Arc::new(RatingEngine::load(Arc::new(store)).unwrap());

        let record = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .record_session_on(GameMode::Ranked, 8.0, Difficulty::Easy, today())
                    .await
            })
        };

        started_rx.await.unwrap();
        // The profile lock is held for the whole save
        assert!(engine.profile.try_lock().is_err());
        release_tx.send(()).unwrap();

        let result = record.await.unwrap().unwrap();
        assert_eq!(result.new_rating, 20);
        assert_eq!(engine.profile().await.rating, 20);
    }

    #[tokio::test]
    async fn test_concurrent_records_are_serialized() {
        let (engine, _) = engine_with(Profile::default());
        let engine = Arc::new(engine);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    engine
                        .record_session_on(GameMode::Ranked, 6.0, Difficulty::Easy, today())
                        .await
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let profile = engine.profile().await;
        assert_eq!(profile.total_sessions, 16);
        assert_eq!(profile.wins, 16);
        assert_eq!(profile.rating, 16 * 12);
    }
}
