//! Application layer errors.
//!
//! These errors represent failures in orchestration, not domain rules.
//! Domain errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A path that must exist does not.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Serializing the snapshot into its output format failed.
    #[error("Emission failed: {reason}")]
    EmissionFailed { reason: String },

    /// A snapshot document could not be parsed.
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// An external command could not be started or exited non-zero.
    #[error("Command '{command}' failed in {cwd}: {reason}")]
    CommandFailed {
        command: String,
        cwd: PathBuf,
        reason: String,
    },

    /// A setup step failed; subsequent steps were not run.
    #[error("{step} failed: {reason}")]
    SetupStepFailed {
        step: String,
        command: String,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::NotFound { path } => vec![
                format!("Nothing exists at {}", path.display()),
                "Check the path and try again".into(),
            ],
            Self::InvalidSnapshot { .. } => vec![
                "The snapshot file is not a valid snapgen JSON document".into(),
                "Regenerate it with: snapgen generate --format json".into(),
            ],
            Self::CommandFailed { command, .. } | Self::SetupStepFailed { command, .. } => vec![
                format!("Command failed: {}", command),
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::EmissionFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::EmissionFailed { .. } => ErrorCategory::Internal,
            Self::InvalidSnapshot { .. } => ErrorCategory::Validation,
            Self::CommandFailed { .. } | Self::SetupStepFailed { .. } => ErrorCategory::Internal,
        }
    }
}
