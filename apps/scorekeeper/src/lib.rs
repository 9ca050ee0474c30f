#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;


// Re-exports for public API
pub use adapters::game_file::GameFile;
pub use config::{GameConfig, StorageConfig, TricksSumPolicy};
pub use domain::state::{GameState, GameStatus};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use services::game_flow::{GameFlowOutcome, GameFlowService, RoundDetails, TricksOutcome};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
