// Match history logger
//
// Appends one JSON line per finished session to `<dir>/YYYY-MM-DD.jsonl`,
// dated by the record's UTC timestamp.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{MatchRecord, MatchSummary};

pub struct MatchLogger {
    history_dir: PathBuf,
}

impl MatchLogger {
    pub fn new(history_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&history_dir).with_context(|| {
            format!(
                "Failed to create history directory: {}",
                history_dir.display()
            )
        })?;

        Ok(Self { history_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.history_dir
    }

    fn day_file(&self, date: NaiveDate) -> PathBuf {
        self.history_dir
            .join(format!("{}.jsonl", date.format("%Y-%m-%d")))
    }

    pub fn log(&self, record: &MatchRecord) -> Result<()> {
        let log_file = self.day_file(record.timestamp.date_naive());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .with_context(|| format!("Failed to open match history: {}", log_file.display()))?;

        let json = serde_json::to_string(record).context("Failed to serialize match record")?;
        writeln!(file, "{}", json).context("Failed to write match record")?;

        Ok(())
    }

    /// Records for one day; a day with no file is empty
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<MatchRecord>> {
        let log_file = self.day_file(date);

        if !log_file.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&log_file)
            .with_context(|| format!("Failed to read match history: {}", log_file.display()))?;

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse match history: {}", log_file.display()))
    }

    pub fn summary_for(&self, date: NaiveDate) -> Result<MatchSummary> {
        Ok(MatchSummary::from_records(&self.read_day(date)?))
    }

    pub fn today_summary(&self) -> Result<MatchSummary> {
        self.summary_for(Utc::now().date_naive())
    }
}
