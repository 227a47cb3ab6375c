//! Highscores module - bounded, persisted top-N score ledger
//!
//! The ledger is process-wide: it is loaded once at startup, outlives individual
//! games, and writes the whole list back through a [`HighscoreStore`] on every
//! insertion. Storage problems never reach the caller. A missing or corrupt store
//! yields placeholder rows, and a failed write keeps the in-memory list and parks
//! the error for the host to report.
//!
//! The list is always exactly `max_store` rows long, sorted by descending score,
//! padded with `{ score: 0, date: "--" }` placeholders.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Key under which the serialized list is stored.
pub const HIGHSCORES_KEY: &str = "highscores";

/// Date shown on placeholder rows.
pub const PLACEHOLDER_DATE: &str = "--";

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Highscore {
    pub score: u32,
    pub date: String,
}

impl Highscore {
    pub fn placeholder() -> Self {
        Self {
            score: 0,
            date: PLACEHOLDER_DATE.to_string(),
        }
    }
}

/// Key-value text store backing the ledger.
pub trait HighscoreStore: Send + fmt::Debug {
    /// Read the value stored under `key`, `Ok(None)` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One file per key (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl HighscoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(raw))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl HighscoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The top-N score list.
#[derive(Debug)]
pub struct HighscoreLedger {
    store: Box<dyn HighscoreStore>,
    max_store: usize,
    entries: Vec<Highscore>,
    persist_error: Option<anyhow::Error>,
}

impl HighscoreLedger {
    /// Load the persisted list, degrading to placeholders on any storage problem.
    pub fn load(store: Box<dyn HighscoreStore>, max_store: usize) -> Self {
        let max_store = max_store.max(1);
        let (entries, persist_error) = match read_entries(store.as_ref()) {
            Ok(Some(entries)) => (normalize(entries, max_store), None),
            Ok(None) => (placeholders(max_store), None),
            Err(e) => (placeholders(max_store), Some(e)),
        };
        Self {
            store,
            max_store,
            entries,
            persist_error,
        }
    }

    /// Ledger backed by a fresh [`MemoryStore`].
    pub fn in_memory(max_store: usize) -> Self {
        Self::load(Box::new(MemoryStore::new()), max_store)
    }

    /// Record `score` with today's date.
    pub fn add(&mut self, score: u32) -> &[Highscore] {
        self.add_dated(score, today())
    }

    /// Record `score` with an explicit date string.
    ///
    /// Equal scores keep their insertion order, so a new entry ranks below
    /// existing entries with the same score.
    pub fn add_dated(&mut self, score: u32, date: impl Into<String>) -> &[Highscore] {
        self.entries.push(Highscore {
            score,
            date: date.into(),
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.max_store);
        if let Err(e) = self.persist() {
            self.persist_error = Some(e);
        }
        &self.entries
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries).context("failed to encode highscores")?;
        self.store.set(HIGHSCORES_KEY, &json)
    }

    pub fn entries(&self) -> &[Highscore] {
        &self.entries
    }

    /// Highest recorded score (0 when only placeholders exist).
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn max_store(&self) -> usize {
        self.max_store
    }

    /// Take the last load/persist failure, if any.
    pub fn take_persist_error(&mut self) -> Option<anyhow::Error> {
        self.persist_error.take()
    }

    pub fn store(&self) -> &dyn HighscoreStore {
        self.store.as_ref()
    }
}

fn read_entries(store: &dyn HighscoreStore) -> Result<Option<Vec<Highscore>>> {
    let Some(raw) = store.get(HIGHSCORES_KEY)? else {
        return Ok(None);
    };
    let entries: Vec<Highscore> =
        serde_json::from_str(&raw).context("stored highscores are not a valid score list")?;
    Ok(Some(entries))
}

fn placeholders(max_store: usize) -> Vec<Highscore> {
    vec![Highscore::placeholder(); max_store]
}

fn normalize(mut entries: Vec<Highscore>, max_store: usize) -> Vec<Highscore> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(max_store);
    entries.resize(max_store, Highscore::placeholder());
    entries
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    date_string(Utc::now().date_naive())
}

fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenStore;

    impl HighscoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("storage unavailable")
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("storage is read-only")
        }
    }

    fn scores(ledger: &HighscoreLedger) -> Vec<u32> {
        ledger.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn empty_store_yields_placeholders() {
        let ledger = HighscoreLedger::in_memory(5);
        assert_eq!(ledger.entries().len(), 5);
        assert!(ledger
            .entries()
            .iter()
            .all(|e| e.score == 0 && e.date == PLACEHOLDER_DATE));
        assert_eq!(ledger.best(), 0);
    }

    #[test]
    fn corrupt_store_yields_placeholders_and_a_warning() {
        let store = MemoryStore::with_value(HIGHSCORES_KEY, "{not json");
        let mut ledger = HighscoreLedger::load(Box::new(store), 3);
        assert_eq!(scores(&ledger), vec![0, 0, 0]);
        assert!(ledger.take_persist_error().is_some());
        assert!(ledger.take_persist_error().is_none());
    }

    #[test]
    fn unreadable_store_does_not_fail_the_caller() {
        let mut ledger = HighscoreLedger::load(Box::new(BrokenStore), 5);
        assert_eq!(ledger.entries().len(), 5);
        assert!(ledger.take_persist_error().is_some());

        // Writes fail too, but the in-memory list still updates.
        ledger.add_dated(120, "2024-01-01");
        assert_eq!(ledger.best(), 120);
        assert!(ledger.take_persist_error().is_some());
    }

    #[test]
    fn add_inserts_in_descending_order_and_truncates() {
        let stored = r#"[{"score":500,"date":"a"},{"score":300,"date":"b"},{"score":100,"date":"c"},{"score":0,"date":"--"},{"score":0,"date":"--"}]"#;
        let store = MemoryStore::with_value(HIGHSCORES_KEY, stored);
        let mut ledger = HighscoreLedger::load(Box::new(store), 5);

        ledger.add_dated(400, "d");

        assert_eq!(scores(&ledger), vec![500, 400, 300, 100, 0]);
        assert_eq!(ledger.entries()[1].date, "d");
    }

    #[test]
    fn add_never_exceeds_capacity() {
        let mut ledger = HighscoreLedger::in_memory(3);
        for s in [10, 50, 20, 70, 5, 60] {
            let len = ledger.add_dated(s, "x").len();
            assert_eq!(len, 3);
        }
        assert_eq!(scores(&ledger), vec![70, 60, 50]);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let mut ledger = HighscoreLedger::in_memory(4);
        ledger.add_dated(100, "first");
        ledger.add_dated(100, "second");
        assert_eq!(ledger.entries()[0].date, "first");
        assert_eq!(ledger.entries()[1].date, "second");
    }

    #[test]
    fn every_insertion_is_persisted() {
        let mut ledger = HighscoreLedger::in_memory(2);
        ledger.add_dated(42, "2024-05-06");

        let raw = ledger.store().get(HIGHSCORES_KEY).unwrap().unwrap();
        let persisted: Vec<Highscore> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, ledger.entries());
    }

    #[test]
    fn short_stored_lists_are_padded() {
        let store = MemoryStore::with_value(HIGHSCORES_KEY, r#"[{"score":9,"date":"x"}]"#);
        let ledger = HighscoreLedger::load(Box::new(store), 3);
        assert_eq!(scores(&ledger), vec![9, 0, 0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let ledger = HighscoreLedger::in_memory(0);
        assert_eq!(ledger.max_store(), 1);
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn dates_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(date_string(date), "2024-02-09");
    }

    #[test]
    fn today_looks_like_a_date() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert_eq!(&d[4..5], "-");
        assert_eq!(&d[7..8], "-");
    }
}
