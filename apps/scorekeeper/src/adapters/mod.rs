//! Adapters for external collaborators.

pub mod game_file;

pub use game_file::{GameFile, GameFileLock, StoredGame};
