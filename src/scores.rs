//! High-score table persisted as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ScoreResult, ScoreStoreError};
use crate::types::GameMode;

/// Entries kept per mode.
pub const MAX_ENTRIES: usize = 10;

pub const SCORES_FILE: &str = "scores.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Normal,
    Item,
}

impl From<GameMode> for ScoreMode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Normal => ScoreMode::Normal,
            GameMode::Item => ScoreMode::Item,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub mode: ScoreMode,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the table from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> ScoreResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(ScoreStoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut scores: HighScores =
            serde_json::from_str(&text).map_err(|source| ScoreStoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        scores.normalize();
        Ok(scores)
    }

    /// Like [`load`](Self::load), but a broken file only logs a warning.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring unreadable score file");
            Self::new()
        })
    }

    pub fn save(&self, path: &Path) -> ScoreResult<()> {
        let io_err = |source| ScoreStoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)?;
        debug!(path = %path.display(), "saved scores");
        Ok(())
    }

    /// Insert a result. Returns its 1-based rank if it made the table.
    pub fn record(&mut self, mode: GameMode, score: u32, lines: u32, level: u32) -> Option<usize> {
        let mode = ScoreMode::from(mode);
        let entry = ScoreEntry {
            mode,
            score,
            lines,
            level,
        };

        // Older results win ties.
        let rank = 1 + self.for_mode_raw(mode).filter(|e| e.score >= score).count();
        let pos = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.normalize();

        (rank <= MAX_ENTRIES).then_some(rank)
    }

    fn for_mode_raw(&self, mode: ScoreMode) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter().filter(move |e| e.mode == mode)
    }

    /// Entries of one mode, best first.
    pub fn for_mode(&self, mode: GameMode) -> impl Iterator<Item = &ScoreEntry> {
        self.for_mode_raw(ScoreMode::from(mode))
    }

    pub fn best(&self, mode: GameMode) -> Option<u32> {
        self.for_mode(mode).next().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort by score (stable) and cut each mode to [`MAX_ENTRIES`].
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        let mut kept = [0usize; 2];
        self.entries.retain(|e| {
            let slot = &mut kept[e.mode as usize];
            *slot += 1;
            *slot <= MAX_ENTRIES
        });
    }
}

/// Default location of the score file.
pub fn default_path() -> Option<PathBuf> {
    crate::config::data_dir().map(|dir| dir.join(SCORES_FILE))
}
