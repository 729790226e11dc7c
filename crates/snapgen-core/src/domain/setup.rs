//! Post-materialization setup plan.
//!
//! A [`SetupPlan`] is the ordered list of commands that run after the tree
//! has been recreated, together with the instructions printed on failure
//! (`fallback`) and on success (`next_steps`). Both the emitted Node.js
//! script and `snapgen apply` execute the same plan.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::tree::join_relative;

/// Precondition for running a step, checked against the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum StepCondition {
    /// Slash-separated path relative to the target root.
    DirectoryExists(String),
    FileExists(String),
}

impl StepCondition {
    pub fn path(&self) -> &str {
        match self {
            Self::DirectoryExists(p) | Self::FileExists(p) => p,
        }
    }
}

/// One command in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStep {
    /// Human-readable label, e.g. "Installing backend dependencies".
    pub description: String,
    /// Shell command line.
    pub command: String,
    /// Slash-separated directory relative to the target root; empty for the
    /// root itself.
    pub working_dir: String,
    pub when: StepCondition,
}

impl SetupStep {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.command.trim().is_empty() {
            return Err(DomainError::InvalidSetupStep {
                step: self.description.clone(),
                reason: "command cannot be empty".into(),
            });
        }
        for path in [self.working_dir.as_str(), self.when.path()] {
            if path.starts_with('/') || path.split('/').any(|s| s == "..") {
                return Err(DomainError::InvalidSetupStep {
                    step: self.description.clone(),
                    reason: format!("path '{path}' must stay inside the target directory"),
                });
            }
        }
        Ok(())
    }
}

/// Ordered setup commands plus the text shown around them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPlan {
    pub steps: Vec<SetupStep>,
    /// Printed after a failing step.
    pub fallback: Vec<String>,
    /// Printed after every applicable step succeeded.
    pub next_steps: Vec<String>,
}

impl SetupPlan {
    /// A plan that runs nothing and prints nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard backend/frontend plan for `profile`.
    pub fn from_profile(profile: &SetupProfile) -> Self {
        let install = format!("{} install", profile.package_manager);
        let backend = profile.backend_dir.as_str();
        let frontend = profile.frontend_dir.as_str();

        let steps = vec![
            SetupStep {
                description: "Installing backend dependencies".into(),
                command: install.clone(),
                working_dir: backend.into(),
                when: StepCondition::DirectoryExists(backend.into()),
            },
            SetupStep {
                description: "Installing frontend dependencies".into(),
                command: install.clone(),
                working_dir: frontend.into(),
                when: StepCondition::DirectoryExists(frontend.into()),
            },
            SetupStep {
                description: "Seeding initial data".into(),
                command: format!("{} {}", profile.seed_runtime, profile.seed_script),
                working_dir: backend.into(),
                when: StepCondition::FileExists(join_relative(backend, &profile.seed_script)),
            },
        ];

        let fallback = vec![
            format!("1. Backend: cd {backend} && {install}"),
            format!("2. Frontend: cd {frontend} && {install}"),
        ];

        let next_steps = vec![
            format!(
                "1. Start the backend: cd {backend} && {} run {}",
                profile.package_manager, profile.backend_start_script
            ),
            format!(
                "2. Start the frontend (in a new terminal): cd {frontend} && {} run {}",
                profile.package_manager, profile.frontend_start_script
            ),
        ];

        Self {
            steps,
            fallback,
            next_steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.steps.iter().try_for_each(SetupStep::validate)
    }
}

/// Inputs for [`SetupPlan::from_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupProfile {
    pub package_manager: String,
    pub seed_runtime: String,
    pub seed_script: String,
    pub backend_dir: String,
    pub frontend_dir: String,
    pub backend_start_script: String,
    pub frontend_start_script: String,
}

impl Default for SetupProfile {
    fn default() -> Self {
        Self {
            package_manager: "npm".into(),
            seed_runtime: "node".into(),
            seed_script: "seed-services.js".into(),
            backend_dir: "backend".into(),
            frontend_dir: "frontend".into(),
            backend_start_script: "dev".into(),
            frontend_start_script: "serve".into(),
        }
    }
}
