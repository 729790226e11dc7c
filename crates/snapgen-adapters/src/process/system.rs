//! Runs setup commands through the platform shell.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use snapgen_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::{SnapgenError, SnapgenResult},
};

/// Executes commands with `sh -c` (or `cmd /C` on Windows).
///
/// Standard streams are inherited so installer output reaches the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner {
    quiet: bool,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the child's stdout instead of inheriting it.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self), fields(cwd = %cwd.display()))]
    fn run(&self, command: &str, cwd: &Path) -> SnapgenResult<()> {
        let failed = |reason: String| {
            SnapgenError::from(ApplicationError::CommandFailed {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                reason,
            })
        };

        let stdout = if self.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        let status = Self::shell(command)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| failed(format!("failed to spawn: {e}")))?;

        debug!(%status, "Command exited");

        if status.success() {
            Ok(())
        } else {
            Err(failed(status.to_string()))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn successful_command_is_ok() {
        let temp = TempDir::new().unwrap();
        SystemCommandRunner::new()
            .quiet(true)
            .run("true", temp.path())
            .unwrap();
    }

    #[test]
    fn failing_command_reports_status() {
        let temp = TempDir::new().unwrap();
        let err = SystemCommandRunner::new()
            .quiet(true)
            .run("exit 3", temp.path())
            .unwrap_err();
        match err {
            SnapgenError::Application(ApplicationError::CommandFailed { command, reason, .. }) => {
                assert_eq!(command, "exit 3");
                assert!(reason.contains('3'), "reason was {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn command_runs_in_working_directory() {
        let temp = TempDir::new().unwrap();
        SystemCommandRunner::new()
            .quiet(true)
            .run("touch marker", temp.path())
            .unwrap();
        assert!(temp.path().join("marker").is_file());
    }

    #[test]
    fn missing_working_directory_fails_to_spawn() {
        let temp = TempDir::new().unwrap();
        let err = SystemCommandRunner::new()
            .run("true", &temp.path().join("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }
}
