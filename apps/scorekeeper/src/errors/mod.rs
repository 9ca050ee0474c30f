//! Error handling for the scorekeeper.

pub mod domain;
pub mod error_code;

pub use domain::{DomainError, StateKind, ValidationKind};
pub use error_code::ErrorCode;
