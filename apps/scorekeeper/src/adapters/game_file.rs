//! JSON file persistence for a single game.
//!
//! The file holds the persisted snapshot shape at its top level plus a format
//! version and a save timestamp. Writers hold an exclusive OS lock on a
//! sibling `.lock` file for the whole load-mutate-save cycle, so two
//! processes never interleave updates to the same game.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::GameState;
use crate::error::AppError;

pub const STATE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    pub format_version: u32,
    pub saved_at: String,
    #[serde(flatten)]
    pub game: GameSnapshot,
}

/// Held while a process owns the state file. Unlocks on drop.
#[derive(Debug)]
pub struct GameFileLock {
    file: File,
    lock_path: PathBuf,
}

impl Drop for GameFileLock {
    fn drop(&mut self) {
        use fs4::fs_std::FileExt;

        if let Err(e) = FileExt::unlock(&self.file) {
            // Unlock errors are usually benign; the OS drops the lock with the handle anyway
            warn!(
                lock_path = %self.lock_path.display(),
                error = %e,
                "State file unlock returned error"
            );
        } else {
            debug!(lock_path = %self.lock_path.display(), "State file lock released");
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameFile {
    path: PathBuf,
}

impl GameFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut s: OsString = self.path.as_os_str().to_owned();
        s.push(".lock");
        PathBuf::from(s)
    }

    fn ensure_parent(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Block until this process holds the exclusive lock for the state file.
    pub fn lock(&self) -> Result<GameFileLock, AppError> {
        use fs4::fs_std::FileExt;

        self.ensure_parent()?;
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&lock_path)?;

        FileExt::lock_exclusive(&file)?;
        debug!(lock_path = %lock_path.display(), "State file lock acquired");
        Ok(GameFileLock { file, lock_path })
    }

    /// Load and validate the stored game. `Ok(None)` when no file exists yet.
    pub fn load(&self) -> Result<Option<GameState>, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No stored game");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        let stored: StoredGame = serde_json::from_str(&raw)?;
        if stored.format_version != STATE_FORMAT_VERSION {
            return Err(AppError::Integrity {
                detail: format!(
                    "unsupported state format version {} (expected {STATE_FORMAT_VERSION})",
                    stored.format_version
                ),
            });
        }

        let game = GameState::from_snapshot(stored.game)?;
        debug!(
            path = %self.path.display(),
            round = game.current_round_number(),
            players = game.players().len(),
            "Stored game loaded"
        );
        Ok(Some(game))
    }

    /// Write the game, replacing any previous file in one rename.
    pub fn save(&self, game: &GameState) -> Result<(), AppError> {
        self.ensure_parent()?;

        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| AppError::internal(format!("timestamp formatting failed: {e}")))?;
        let stored = StoredGame {
            format_version: STATE_FORMAT_VERSION,
            saved_at,
            game: game.to_snapshot(),
        };
        let body = serde_json::to_string_pretty(&stored)?;

        let mut tmp: OsString = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Game saved");
        Ok(())
    }

    /// Delete the stored game. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Stored game removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
