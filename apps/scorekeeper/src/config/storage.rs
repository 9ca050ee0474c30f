use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const STATE_FILE_VAR: &str = "SCOREKEEPER_STATE_FILE";
pub const DEFAULT_STATE_FILE: &str = "scorekeeper-game.json";

/// Where the persisted game lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub state_file: PathBuf,
}

impl StorageConfig {
    /// Resolve the state file: explicit override, then env, then the default.
    pub fn resolve(override_path: Option<PathBuf>) -> Result<Self, AppError> {
        Self::resolve_with(override_path, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(override_path: Option<PathBuf>, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = override_path {
            return Self::checked(path);
        }
        match lookup(STATE_FILE_VAR) {
            Some(v) if !v.trim().is_empty() => Self::checked(PathBuf::from(v.trim())),
            _ => Ok(Self {
                state_file: PathBuf::from(DEFAULT_STATE_FILE),
            }),
        }
    }

    fn checked(path: PathBuf) -> Result<Self, AppError> {
        if path.is_dir() {
            return Err(AppError::config(format!(
                "state file path '{}' is a directory",
                path.display()
            )));
        }
        Ok(Self { state_file: path })
    }
}
