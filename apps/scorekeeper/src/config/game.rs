//! Game rule policies that are deliberately left to the operator.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub const TRICKS_SUM_POLICY_VAR: &str = "SCOREKEEPER_TRICKS_SUM_POLICY";

/// What to do when the tricks recorded for a round do not add up to the
/// number of hands in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TricksSumPolicy {
    /// Log a warning and report the mismatch, but accept the submission.
    #[default]
    Warn,
    /// Reject the submission and leave the game unchanged.
    Enforce,
}

impl FromStr for TricksSumPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(TricksSumPolicy::Warn),
            "enforce" => Ok(TricksSumPolicy::Enforce),
            other => Err(AppError::config(format!(
                "{TRICKS_SUM_POLICY_VAR} must be 'warn' or 'enforce', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub tricks_sum_policy: TricksSumPolicy,
}

impl GameConfig {
    pub fn new(tricks_sum_policy: TricksSumPolicy) -> Self {
        Self { tricks_sum_policy }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (unset or blank means default).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tricks_sum_policy = match lookup(TRICKS_SUM_POLICY_VAR) {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => TricksSumPolicy::default(),
        };
        Ok(Self { tricks_sum_policy })
    }
}
