// Persistent player profile

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::config::GameMode;

/// Three-tier rank, a pure function of rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
}

impl Rank {
    pub fn for_rating(rating: u32) -> Self {
        match rating {
            0..=99 => Rank::Bronze,
            100..=199 => Rank::Silver,
            _ => Rank::Gold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
        }
    }

    /// Display colour as a hex code
    pub fn color(self) -> &'static str {
        match self {
            Rank::Bronze => "#cd7f32",
            Rank::Silver => "#c0c0c0",
            Rank::Gold => "#ffd700",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress toward the next rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    pub current: u32,
    pub needed: Option<u32>,
    pub percentage: u32,
    pub next_rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    pub rank: Rank,
    #[serde(alias = "elo")]
    pub rating: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    #[serde(deserialize_with = "lenient_day")]
    pub last_played: Option<NaiveDate>,
    #[serde(alias = "total_debates")]
    pub total_sessions: u32,
    pub wins: u32,
    pub losses: u32,
    pub ranked_played: u32,
    pub hot_takes_played: u32,
    pub podcast_played: u32,
    pub average_score: f64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

// Older profile files store both fields as offset-less ISO timestamps
// ("2026-10-15T21:04:11.532210"), so accept those alongside dates and RFC 3339.

fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(day) = raw.parse::<NaiveDate>() {
        return Some(day);
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.date_naive())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_day(raw.trim())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw))),
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim())
        .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "Player".to_string(),
            rank: Rank::Bronze,
            rating: 0,
            streak_days: 0,
            best_streak: 0,
            last_played: None,
            total_sessions: 0,
            wins: 0,
            losses: 0,
            ranked_played: 0,
            hot_takes_played: 0,
            podcast_played: 0,
            average_score: 0.0,
            created_at: Utc::now(),
        }
    }
}

impl Profile {
    pub fn played_in(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Ranked => self.ranked_played,
            GameMode::HotTakes => self.hot_takes_played,
            GameMode::Podcast => self.podcast_played,
        }
    }

    pub(crate) fn count_play(&mut self, mode: GameMode) {
        let counter = match mode {
            GameMode::Ranked => &mut self.ranked_played,
            GameMode::HotTakes => &mut self.hot_takes_played,
            GameMode::Podcast => &mut self.podcast_played,
        };
        *counter += 1;
    }

    /// Advance the daily streak for a session played on `today`.
    pub(crate) fn update_streak(&mut self, today: NaiveDate) {
        if let Some(last) = self.last_played {
            match (today - last).num_days() {
                0 => return,
                1 => self.streak_days += 1,
                _ => self.streak_days = 1,
            }
        } else {
            self.streak_days = 1;
        }

        self.best_streak = self.best_streak.max(self.streak_days);
        self.last_played = Some(today);
    }

    /// Fold a session score into the cumulative mean. `total_sessions` must
    /// already include the session.
    pub(crate) fn fold_average(&mut self, overall_score: f64) {
        let n = f64::from(self.total_sessions.max(1));
        self.average_score += (overall_score - self.average_score) / n;
    }

    /// Win percentage, 0 when nothing has been played
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(total) * 100.0
    }

    pub fn rank_progress(&self) -> RankProgress {
        match self.rank {
            Rank::Bronze => RankProgress {
                current: self.rating,
                needed: Some(100),
                percentage: self.rating.min(100),
                next_rank: Rank::Silver.to_string(),
            },
            Rank::Silver => {
                let current = self.rating.saturating_sub(100);
                RankProgress {
                    current,
                    needed: Some(100),
                    percentage: current.min(100),
                    next_rank: Rank::Gold.to_string(),
                }
            }
            Rank::Gold => RankProgress {
                current: self.rating,
                needed: None,
                percentage: 100,
                next_rank: "MAX RANK!".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(Rank::for_rating(0), Rank::Bronze);
        assert_eq!(Rank::for_rating(99), Rank::Bronze);
        assert_eq!(Rank::for_rating(100), Rank::Silver);
        assert_eq!(Rank::for_rating(199), Rank::Silver);
        assert_eq!(Rank::for_rating(200), Rank::Gold);
        assert_eq!(Rank::for_rating(5000), Rank::Gold);
    }

    #[test]
    fn test_streak_first_session() {
        let mut profile = Profile {
            best_streak: 4,
            ..Profile::default()
        };
        profile.update_streak(day(2026, 3, 10));
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 4);
        assert_eq!(profile.last_played, Some(day(2026, 3, 10)));
    }

    #[test]
    fn test_streak_consecutive_day_increments() {
        let mut profile = Profile {
            streak_days: 2,
            best_streak: 2,
            last_played: Some(day(2026, 2, 28)),
            ..Profile::default()
        };
        profile.update_streak(day(2026, 3, 1));
        assert_eq!(profile.streak_days, 3);
        assert_eq!(profile.best_streak, 3);
    }

    #[test]
    fn test_streak_same_day_unchanged() {
        let mut profile = Profile {
            streak_days: 5,
            best_streak: 7,
            last_played: Some(day(2026, 3, 1)),
            ..Profile::default()
        };
        profile.update_streak(day(2026, 3, 1));
        assert_eq!(profile.streak_days, 5);
        assert_eq!(profile.best_streak, 7);
    }

    #[test]
    fn test_streak_gap_resets() {
        let mut profile = Profile {
            streak_days: 5,
            best_streak: 5,
            last_played: Some(day(2026, 3, 1)),
            ..Profile::default()
        };
        profile.update_streak(day(2026, 3, 4));
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 5);
        assert_eq!(profile.last_played, Some(day(2026, 3, 4)));
    }

    #[test]
    fn test_fold_average() {
        let mut profile = Profile::default();
        for (i, score) in [6.0, 8.0, 4.0].into_iter().enumerate() {
            profile.total_sessions = i as u32 + 1;
            profile.fold_average(score);
        }
        assert!((profile.average_score - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_win_rate() {
        let mut profile = Profile::default();
        assert_eq!(profile.win_rate(), 0.0);
        profile.wins = 3;
        profile.losses = 1;
        assert_eq!(profile.win_rate(), 75.0);
    }

    #[test]
    fn test_rank_progress() {
        let silver = Profile {
            rating: 150,
            rank: Rank::Silver,
            ..Profile::default()
        };
        let progress = silver.rank_progress();
        assert_eq!(progress.current, 50);
        assert_eq!(progress.needed, Some(100));
        assert_eq!(progress.next_rank, "Gold");

        let gold = Profile {
            rating: 260,
            rank: Rank::Gold,
            ..Profile::default()
        };
        assert_eq!(gold.rank_progress().needed, None);
        assert_eq!(gold.rank_progress().percentage, 100);
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let raw = r#"{"username":"Ada","rank":"Silver","elo":120,"total_debates":4,"wins":3,"losses":1}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.rating, 120);
        assert_eq!(profile.total_sessions, 4);
        assert_eq!(profile.rank, Rank::Silver);
        assert_eq!(profile.streak_days, 0);
    }

    #[test]
    fn test_reads_offsetless_timestamps() {
        let raw = r#"{
  "username": "Player",
  "rank": "Silver",
  "elo": 140,
  "streak_days": 3,
  "last_played": "2026-10-15T21:04:11.532210",
  "total_debates": 7,
  "wins": 5,
  "losses": 2,
  "hot_takes_played": 1,
  "ranked_played": 6,
  "podcast_played": 0,
  "best_streak": 4,
  "average_score": 6.4,
  "created_at": "2026-09-01T08:30:00.125000"
}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.rating, 140);
        assert_eq!(profile.total_sessions, 7);
        assert_eq!(profile.last_played, Some(day(2026, 10, 15)));
        assert_eq!(
            profile.created_at.to_rfc3339(),
            "2026-09-01T08:30:00.125+00:00"
        );
    }

    #[test]
    fn test_timestamp_fields_accept_current_format() {
        let profile = Profile {
            last_played: Some(day(2026, 3, 1)),
            ..Profile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);

        let raw = r#"{"last_played":null,"created_at":"2026-03-01T10:00:00+02:00"}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.last_played, None);
        assert_eq!(profile.created_at.to_rfc3339(), "2026-03-01T08:00:00+00:00");

        assert!(serde_json::from_str::<Profile>(r#"{"last_played":"yesterday"}"#).is_err());
    }
}
