//! High score leaderboard
//!
//! Persisted to LocalStorage as a bare JSON array of `{name, score}`,
//! descending by score, top 5 only.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Storage key for the leaderboard
pub const STORAGE_KEY: &str = "alien_barrage_highscores";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// High score leaderboard (sorted descending, at most `MAX_HIGH_SCORES`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, restoring order and size limits
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Add an entry. Ties rank below existing entries with the same score.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());

        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Load from storage. Missing or corrupt data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Vec<ScoreEntry>>(storage, STORAGE_KEY) {
            Some(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                Self::from_entries(entries)
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        persistence::save_json(storage, STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Read the persisted leaderboard; never fails
pub fn load_leaderboard(storage: &dyn Storage) -> Leaderboard {
    Leaderboard::load(storage)
}

/// Append a finished run to the persisted leaderboard.
///
/// Returns the updated board and the rank achieved. A failed write is logged
/// and the in-memory board is still returned.
pub fn record_score(
    storage: &mut dyn Storage,
    name: &str,
    score: u64,
) -> (Leaderboard, Option<usize>) {
    let mut board = Leaderboard::load(storage);
    let rank = board.insert(ScoreEntry::new(name, score));
    if let Err(e) = board.save(storage) {
        log::warn!("Failed to save high scores: {}", e);
    }
    (board, rank)
}
