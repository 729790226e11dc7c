//! Implementation of `snapgen apply`.
//!
//! Recreates a project from a JSON snapshot and runs its setup plan, the
//! same work the emitted Node.js script does, without needing `node`.

use std::path::PathBuf;

use serde_json::json;
use tracing::{info, instrument};

use snapgen_adapters::{LocalFilesystem, SystemCommandRunner, load_snapshot};
use snapgen_core::application::{SetupService, StepEvent};

use crate::{
    cli::{ApplyArgs, OutputFormat},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(snapshot = %args.snapshot.display()))]
pub fn execute(args: ApplyArgs, output: OutputManager) -> CliResult<()> {
    if !args.snapshot.is_file() {
        return Err(CliError::SnapshotNotFound {
            path: args.snapshot,
        });
    }

    let text = std::fs::read_to_string(&args.snapshot)
        .with_cli_context(|| format!("Failed to read snapshot '{}'", args.snapshot.display()))?;
    let snapshot = load_snapshot(&text)?;

    let target = args.target.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&target)
        .with_cli_context(|| format!("Failed to create target directory '{}'", target.display()))?;

    output.header(&format!(
        "Restoring snapshot from {} ({})",
        snapshot
            .generated_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M"),
        snapshot.generator
    ))?;

    // Child output would interleave with the JSON document on stdout.
    let runner = SystemCommandRunner::new()
        .quiet(output.is_quiet() || output.format() == OutputFormat::Json);
    let service = SetupService::new(Box::new(LocalFilesystem::new()), Box::new(runner));

    let materialized = service.materialize(&snapshot.root, &target)?;
    output.success(&format!(
        "Created {} directories and {} files in {}",
        materialized.directories_created.len(),
        materialized.files_written.len(),
        target.display()
    ))?;

    let setup = if args.skip_setup || snapshot.setup.is_empty() {
        info!(skip = args.skip_setup, "Setup not run");
        None
    } else {
        let outcome = service
            .run_setup(&snapshot.setup, &target, |event| {
                // Progress lines are best-effort; a closed stdout must not
                // abort a running install.
                let _ = match event {
                    StepEvent::Started(step) => output.info(&format!("{}...", step.description)),
                    StepEvent::Finished(step) => output.success(&format!("{}: done", step.description)),
                    StepEvent::Skipped(step) => {
                        output.detail(&format!("{}: skipped ({} missing)", step.description, step.when.path()))
                    }
                };
            })
            .map_err(|e| CliError::from_setup(e, &snapshot.setup.fallback))?;
        Some(outcome)
    };

    let summary = json!({
        "target": target.display().to_string(),
        "directories_created": materialized.directories_created.len(),
        "files_written": materialized.files_written.len(),
        "steps_completed": setup.as_ref().map(|o| o.completed.clone()).unwrap_or_default(),
        "steps_skipped": setup.as_ref().map(|o| o.skipped.clone()).unwrap_or_default(),
    });
    if output.json(&summary)? {
        return Ok(());
    }

    if setup.is_some() {
        output.print("")?;
        output.success("All done!")?;
        if !snapshot.setup.next_steps.is_empty() {
            output.print("Start the services with:")?;
            for line in &snapshot.setup.next_steps {
                output.print(&format!("  {line}"))?;
            }
        }
    }

    Ok(())
}
