// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: String },

    #[error("Invalid setup step '{step}': {reason}")]
    InvalidSetupStep { step: String, reason: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("Snapshot format version {found} is not supported (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPattern { pattern, .. } => vec![
                format!("Check the exclusion pattern '{}'", pattern),
                "Use a bare name (node_modules) or a relative path (backend/database)".into(),
            ],
            Self::InvalidEntryName { name, .. } => vec![
                format!("The snapshot contains an unsafe entry name: '{}'", name),
                "Entry names must be single path segments (no '/', '..' or '.')".into(),
                "Regenerate the snapshot with: snapgen generate --format json".into(),
            ],
            Self::UnsupportedFormatVersion { .. } => vec![
                "The snapshot was produced by an incompatible snapgen version".into(),
                "Regenerate it with the installed version of snapgen".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPattern { .. }
            | Self::InvalidEntryName { .. }
            | Self::InvalidSetupStep { .. } => ErrorCategory::Validation,
            Self::UnsupportedFormatVersion { .. } => ErrorCategory::Compatibility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}
