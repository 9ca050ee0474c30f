//! Environment-driven configuration.

pub mod game;
pub mod storage;

pub use game::{GameConfig, TricksSumPolicy};
pub use storage::StorageConfig;
