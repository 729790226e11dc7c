//! Implementation of `snapgen generate`, also run when no subcommand is given.
//!
//! Responsibility: resolve the root, output path, format and exclusion set
//! from flags and config, call the snapshot service, and display results.

use std::path::{Component, Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use snapgen_adapters::{JsonSnapshotEmitter, LocalFilesystem, NodeScriptEmitter};
use snapgen_core::{
    application::{BuildReport, ScriptEmitter, SnapshotService},
    domain::{Directory, ExclusionPattern, PathMatcher, SetupPlan},
};

use crate::{
    cli::{ArtifactFormat, GenerateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let format = resolve_format(args.format, &config)?;
    let emitter = emitter_for(format);

    let output_path = args.output.clone().unwrap_or_else(|| {
        let name = config
            .snapshot
            .output
            .clone()
            .unwrap_or_else(|| emitter.default_file_name().to_string());
        root.join(name)
    });

    let cwd = std::env::current_dir()?;
    let matcher = build_matcher(&config, &args.exclude, &root, &output_path, &cwd)?;
    debug!(
        root = %root.display(),
        output = %output_path.display(),
        patterns = matcher.patterns().len(),
        "Generate configured"
    );

    let plan = if args.no_setup {
        SetupPlan::empty()
    } else {
        SetupPlan::from_profile(&config.setup_profile())
    };

    let service = SnapshotService::new(Box::new(LocalFilesystem::new()), emitter);

    if args.dry_run {
        let outcome = service.snapshot(&root, &matcher)?;
        return print_dry_run(&outcome.root, &outcome.report, &output_path, &output);
    }

    let spinner = output.spinner("Capturing project tree...");
    let result = service.generate(&root, &matcher, plan, &output_path);
    spinner.finish_and_clear();
    let report = result?;

    info!(
        files = report.stats.files,
        bytes = report.bytes_written,
        "Artifact generated"
    );

    let summary = json!({
        "output": report.output_path.display().to_string(),
        "files": report.stats.files,
        "directories": report.stats.directories,
        "bytes": report.bytes_written,
        "excluded": report.build.excluded,
        "skipped": report
            .build
            .skipped
            .iter()
            .map(|s| json!({ "path": s.path.display().to_string(), "reason": s.reason }))
            .collect::<Vec<_>>(),
    });
    if output.json(&summary)? {
        return Ok(());
    }

    report_skipped(&report.build, &output)?;
    output.success(&format!(
        "Wrote {} ({} files, {} directories)",
        report.output_path.display(),
        report.stats.files,
        report.stats.directories,
    ))?;
    if format == ArtifactFormat::Script {
        output.info(&format!(
            "Copy it into an empty directory and run: node {}",
            file_name(&report.output_path)
        ))?;
    } else {
        output.info(&format!(
            "Recreate with: snapgen apply {}",
            report.output_path.display()
        ))?;
    }

    Ok(())
}

fn resolve_format(flag: Option<ArtifactFormat>, config: &AppConfig) -> CliResult<ArtifactFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.snapshot.format.as_str() {
        "script" | "js" => Ok(ArtifactFormat::Script),
        "json" => Ok(ArtifactFormat::Json),
        other => Err(CliError::ConfigError {
            message: format!("Unknown snapshot.format '{other}' (expected 'script' or 'json')"),
            source: None,
        }),
    }
}

fn emitter_for(format: ArtifactFormat) -> Box<dyn ScriptEmitter> {
    match format {
        ArtifactFormat::Script => Box::new(NodeScriptEmitter::new()),
        ArtifactFormat::Json => Box::new(JsonSnapshotEmitter::new()),
    }
}

/// Configured patterns plus the artifact itself, so a rerun never captures
/// the previous output. An artifact outside the root needs no pattern.
fn build_matcher(
    config: &AppConfig,
    extra: &[String],
    root: &Path,
    output_path: &Path,
    cwd: &Path,
) -> CliResult<PathMatcher> {
    let mut matcher = config.matcher(extra)?;

    let root = lexical_absolute(root, cwd);
    let output_path = lexical_absolute(output_path, cwd);
    let artifact = output_path
        .strip_prefix(&root)
        .ok()
        .map(|relative| {
            relative
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/")
        })
        .filter(|relative| !relative.is_empty());

    if let Some(artifact) = artifact {
        matcher = matcher.with_pattern(ExclusionPattern::new(artifact)?);
    }
    Ok(matcher)
}

/// `path` made absolute against `cwd`, with `.` and `..` folded away.
fn lexical_absolute(path: &Path, cwd: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}

fn print_dry_run(
    tree: &Directory,
    report: &BuildReport,
    output_path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let stats = tree.stats();
    let files = tree.files();

    let summary = json!({
        "dry_run": true,
        "output": output_path.display().to_string(),
        "files": files.iter().map(|(path, _)| path).collect::<Vec<_>>(),
        "directories": stats.directories,
        "bytes": stats.bytes,
        "excluded": report.excluded,
    });
    if output.json(&summary)? {
        return Ok(());
    }

    output.header(&format!("Dry run: would write {}", output_path.display()))?;
    for (path, content) in &files {
        output.detail(&format!("{path} ({} bytes)", content.len()))?;
    }
    report_skipped(report, output)?;
    output.info(&format!(
        "{} files, {} directories, {} bytes; {} paths excluded",
        stats.files, stats.directories, stats.bytes, report.excluded
    ))?;
    Ok(())
}

fn report_skipped(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    for skipped in &report.skipped {
        output.warning(&format!(
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ))?;
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_configured_format() {
        let mut config = AppConfig::default();
        config.snapshot.format = "script".into();
        assert_eq!(
            resolve_format(Some(ArtifactFormat::Json), &config).unwrap(),
            ArtifactFormat::Json
        );
    }

    #[test]
    fn unknown_configured_format_is_a_config_error() {
        let mut config = AppConfig::default();
        config.snapshot.format = "yaml".into();
        let err = resolve_format(None, &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn artifact_inside_root_is_excluded_by_relative_path() {
        let matcher = build_matcher(
            &AppConfig::default(),
            &[],
            Path::new("/p"),
            Path::new("/p/out/snap.json"),
            Path::new("/"),
        )
        .unwrap();
        assert!(matcher.should_exclude("out/snap.json"));
        assert!(!matcher.should_exclude("snap.json"));
    }

    #[test]
    fn relative_output_under_dot_root_is_excluded_by_its_path() {
        let matcher = build_matcher(
            &AppConfig::default(),
            &[],
            Path::new("."),
            Path::new("sub/out.js"),
            Path::new("/work"),
        )
        .unwrap();
        assert!(matcher.should_exclude("sub/out.js"));
        assert!(!matcher.should_exclude("other/out.js"));
        assert!(!matcher.should_exclude("out.js"));
    }

    #[test]
    fn artifact_outside_root_adds_no_pattern() {
        let config = AppConfig::default();
        let matcher = build_matcher(
            &config,
            &[],
            Path::new("/p"),
            Path::new("/elsewhere/custom.js"),
            Path::new("/"),
        )
        .unwrap();
        assert!(!matcher.should_exclude("custom.js"));
        assert!(!matcher.should_exclude("lib/custom.js"));
        assert_eq!(matcher.patterns().len(), config.exclusion_patterns(&[]).count());
    }

    #[test]
    fn parent_segments_are_folded_before_comparing() {
        let matcher = build_matcher(
            &AppConfig::default(),
            &[],
            Path::new("../p"),
            Path::new("/p/gen/../snap.json"),
            Path::new("/work"),
        )
        .unwrap();
        assert!(matcher.should_exclude("snap.json"));
    }

    #[test]
    fn extra_excludes_are_applied() {
        let matcher = build_matcher(
            &AppConfig::default(),
            &["coverage".to_string()],
            Path::new("."),
            Path::new("./setup-project.js"),
            Path::new("/work"),
        )
        .unwrap();
        assert!(matcher.should_exclude("frontend/coverage/index.html"));
        assert!(matcher.should_exclude("setup-project.js"));
    }

    #[test]
    fn empty_extra_exclude_is_rejected() {
        assert!(
            build_matcher(
                &AppConfig::default(),
                &["  ".to_string()],
                Path::new("."),
                Path::new("./x.js"),
                Path::new("/work"),
            )
            .is_err()
        );
    }
}
