use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failure reading or writing a persisted high score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Narrow get/set contract for persisting a single high score.
pub trait HighScoreStore {
    /// Returns the stored high score, `0` when nothing was stored yet.
    fn high_score(&self) -> Result<u32, ScoreError>;

    fn set_high_score(&mut self, score: u32) -> Result<(), ScoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn high_score(&self) -> Result<u32, ScoreError> {
        (**self).high_score()
    }

    fn set_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        (**self).set_high_score(score)
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MemoryHighScoreStore {
    high_score: u32,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        Ok(self.high_score)
    }

    fn set_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        self.high_score = score;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// JSON file store under the platform data directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct default location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn set_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}
