use serde::Serialize;
use thiserror::Error;

use crate::errors::{DomainError, ErrorCode};

/// Error body printed by collaborators (CLI, any hosting layer).
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub detail: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("State error: {detail}")]
    State { code: ErrorCode, detail: String },
    #[error("Integrity error: {detail}")]
    Integrity { detail: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid state file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::State { code, .. } => *code,
            AppError::Integrity { .. } => ErrorCode::DataCorruption,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Json(_) => ErrorCode::InvalidStateFile,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::State { detail, .. } => detail.clone(),
            AppError::Integrity { detail } => detail.clone(),
            AppError::Io(e) => e.to_string(),
            AppError::Json(e) => e.to_string(),
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().as_str().to_string(),
            detail: self.detail(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// True for failures that originated in the domain layer.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::State { .. } | AppError::Integrity { .. }
        )
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let code = e.code();
        match e {
            DomainError::Validation(_, detail) => AppError::Validation { code, detail },
            DomainError::State(_, detail) => AppError::State { code, detail },
            DomainError::Integrity(detail) => AppError::Integrity { detail },
        }
    }
}
