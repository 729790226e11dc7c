//! Snapshot document: the captured tree plus its setup plan and provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, setup::SetupPlan, tree::Directory};

/// Current snapshot document version.
pub const FORMAT_VERSION: u32 = 1;

/// Everything an emitter needs: the retained tree and the setup plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    /// `name version` of the tool that produced the snapshot.
    pub generator: String,
    pub generated_at: DateTime<Utc>,
    pub root: Directory,
    #[serde(default)]
    pub setup: SetupPlan,
}

impl Snapshot {
    pub fn new(root: Directory, setup: SetupPlan) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            generator: format!("snapgen {}", crate::VERSION),
            generated_at: Utc::now(),
            root,
            setup,
        }
    }

    /// Check version, entry names and setup paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.format_version != FORMAT_VERSION {
            return Err(DomainError::UnsupportedFormatVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        self.root.validate()?;
        self.setup.validate()
    }
}
