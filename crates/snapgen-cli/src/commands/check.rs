//! `snapgen check`: explain the exclusion decision for each path.

use serde_json::json;

use snapgen_core::domain::normalize_separators;

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let matcher = config.matcher(&args.exclude)?;

    let verdicts = args
        .paths
        .iter()
        .map(|path| {
            let path = relative_to_root(path)?;
            let pattern = matcher.matching_pattern(&path).map(|p| p.to_string());
            Ok((path, pattern))
        })
        .collect::<CliResult<Vec<(String, Option<String>)>>>()?;

    let document: Vec<_> = verdicts
        .iter()
        .map(|(path, pattern)| {
            json!({ "path": path, "excluded": pattern.is_some(), "pattern": pattern })
        })
        .collect();
    if output.json(&document)? {
        return Ok(());
    }

    for (path, pattern) in &verdicts {
        match pattern {
            Some(pattern) => output.warning(&format!("excluded  {path}  (matches '{pattern}')"))?,
            None => output.success(&format!("kept      {path}"))?,
        }
    }

    Ok(())
}

/// Normalize `path` to the slash-joined, root-relative form patterns match against.
fn relative_to_root(path: &str) -> CliResult<String> {
    let normalized = normalize_separators(path);
    let invalid = |why: &str| CliError::InvalidInput {
        message: format!("'{path}' {why}; pass a path relative to the project root"),
        source: None,
    };

    if normalized.starts_with('/') || std::path::Path::new(path).is_absolute() {
        return Err(invalid("is absolute"));
    }
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.contains(&"..") {
        return Err(invalid("leaves the project root"));
    }
    if segments.is_empty() {
        return Err(invalid("is empty"));
    }
    Ok(segments.join("/"))
}
