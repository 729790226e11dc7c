//! Setup Service - recreate a snapshot tree and run its setup plan.
//!
//! This is the Rust counterpart of the emitted Node.js script:
//! 1. Materialize directories (create-if-absent) and files (overwrite)
//! 2. Run each plan step whose condition holds, in order
//! 3. Stop at the first failing step

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
    },
    domain::{Directory, SetupPlan, SetupStep, StepCondition, TreeNode},
    error::{SnapgenError, SnapgenResult},
};

/// Paths touched by [`SetupService::materialize`], in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories_created: Vec<PathBuf>,
    pub files_written: Vec<PathBuf>,
}

/// Progress notifications from [`SetupService::run_setup`].
#[derive(Debug, Clone, Copy)]
pub enum StepEvent<'a> {
    Started(&'a SetupStep),
    Finished(&'a SetupStep),
    /// The step's condition did not hold.
    Skipped(&'a SetupStep),
}

/// Descriptions of the steps that ran or were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupOutcome {
    pub completed: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct SetupService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
}

impl SetupService {
    pub fn new(filesystem: Box<dyn Filesystem>, runner: Box<dyn CommandRunner>) -> Self {
        Self { filesystem, runner }
    }

    /// Write `tree` below `target`.
    ///
    /// Directories that already exist are left alone; files are always
    /// rewritten. The first failure aborts and nothing is rolled back.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn materialize(&self, tree: &Directory, target: &Path) -> SnapgenResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        self.materialize_into(tree, target, &mut report)?;
        info!(
            directories = report.directories_created.len(),
            files = report.files_written.len(),
            "Tree materialized"
        );
        Ok(report)
    }

    fn materialize_into(
        &self,
        tree: &Directory,
        dir: &Path,
        report: &mut MaterializeReport,
    ) -> SnapgenResult<()> {
        for (name, node) in tree.iter() {
            let path = dir.join(name);
            match node {
                TreeNode::Directory(child) => {
                    if !self.filesystem.exists(&path) {
                        self.filesystem.create_dir_all(&path)?;
                        debug!(path = %path.display(), "Created directory");
                        report.directories_created.push(path.clone());
                    }
                    self.materialize_into(child, &path, report)?;
                }
                TreeNode::File(file) => {
                    self.filesystem.write_file(&path, &file.content)?;
                    debug!(path = %path.display(), "Created file");
                    report.files_written.push(path);
                }
            }
        }
        Ok(())
    }

    /// Run every applicable step of `plan` inside `target`.
    ///
    /// Returns [`ApplicationError::SetupStepFailed`] for the first step whose
    /// command fails; the remaining steps are not attempted.
    #[instrument(skip_all, fields(target = %target.display(), steps = plan.steps.len()))]
    pub fn run_setup<F>(
        &self,
        plan: &SetupPlan,
        target: &Path,
        mut observe: F,
    ) -> SnapgenResult<SetupOutcome>
    where
        F: FnMut(StepEvent<'_>),
    {
        let mut outcome = SetupOutcome::default();

        for step in &plan.steps {
            if !self.condition_holds(&step.when, target) {
                debug!(step = %step.description, "Condition not met, skipping");
                observe(StepEvent::Skipped(step));
                outcome.skipped.push(step.description.clone());
                continue;
            }

            observe(StepEvent::Started(step));
            let cwd = resolve(target, &step.working_dir);
            info!(step = %step.description, command = %step.command, "Running setup step");

            if let Err(e) = self.runner.run(&step.command, &cwd) {
                warn!(step = %step.description, error = %e, "Setup step failed");
                return Err(step_failed(step, e));
            }

            observe(StepEvent::Finished(step));
            outcome.completed.push(step.description.clone());
        }

        Ok(outcome)
    }

    fn condition_holds(&self, condition: &StepCondition, target: &Path) -> bool {
        let path = resolve(target, condition.path());
        match condition {
            StepCondition::DirectoryExists(_) => self.filesystem.is_dir(&path),
            StepCondition::FileExists(_) => self.filesystem.is_file(&path),
        }
    }
}

/// Join a slash-separated relative path onto `target`.
fn resolve(target: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(target.to_path_buf(), |acc, segment| acc.join(segment))
}

fn step_failed(step: &SetupStep, cause: SnapgenError) -> SnapgenError {
    let reason = match cause {
        SnapgenError::Application(ApplicationError::CommandFailed { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::SetupStepFailed {
        step: step.description.clone(),
        command: step.command.clone(),
        reason,
    }
    .into()
}
