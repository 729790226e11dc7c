//! `snapgen config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if !output.json(&serde_json::json!({ "key": key, "value": value }))? {
                output.print(&format!("{key} = {value}"))?;
            }
        }

        ConfigCommands::List => {
            if output.json(&config)? {
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let snapshot = &config.snapshot;
    let setup = &config.setup;
    match key {
        "snapshot.exclude" => Ok(snapshot.exclude.join(",")),
        "snapshot.extra_exclude" => Ok(snapshot.extra_exclude.join(",")),
        "snapshot.prefix_mode" => Ok(match snapshot.prefix_mode {
            snapgen_core::domain::PrefixMode::Literal => "literal".into(),
            snapgen_core::domain::PrefixMode::SegmentBoundary => "segment-boundary".into(),
        }),
        "snapshot.output" => Ok(snapshot.output.clone().unwrap_or_default()),
        "snapshot.format" => Ok(snapshot.format.clone()),
        "setup.package_manager" => Ok(setup.package_manager.clone()),
        "setup.seed_runtime" => Ok(setup.seed_runtime.clone()),
        "setup.seed_script" => Ok(setup.seed_script.clone()),
        "setup.backend_dir" => Ok(setup.backend_dir.clone()),
        "setup.frontend_dir" => Ok(setup.frontend_dir.clone()),
        "setup.backend_start_script" => Ok(setup.backend_start_script.clone()),
        "setup.frontend_start_script" => Ok(setup.frontend_start_script.clone()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "setup.package_manager").unwrap(), "npm");
        assert_eq!(get_config_value(&cfg, "snapshot.prefix_mode").unwrap(), "literal");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn exclude_list_is_comma_joined() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "snapshot.exclude").unwrap();
        assert!(value.starts_with("node_modules,.git,"));
    }
}
