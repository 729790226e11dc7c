//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values derived from it
//! ([`PathMatcher`], [`SetupProfile`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SNAPGEN_` environment variables, `__` between sections
//!    (`SNAPGEN_SETUP__PACKAGE_MANAGER=pnpm`)
//! 3. The file passed with `--config` (must exist)
//! 4. `.snapgen.toml` in the current directory
//! 5. The global config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use snapgen_core::domain::{DomainError, PathMatcher, PrefixMode, SetupProfile};

/// File name of the per-project configuration.
pub const LOCAL_CONFIG_NAME: &str = ".snapgen.toml";

/// Paths left out of every snapshot unless the configuration says otherwise.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "setup-project.js",
    "generate-setup.js",
    "database",
    "dist",
    "build",
    ".env",
    ".gitignore",
    ".idea",
    ".vscode",
    "backend/database",
    "backend/node_modules",
    "backend/package-lock.json",
    "frontend/node_modules",
    "frontend/package-lock.json",
    LOCAL_CONFIG_NAME,
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to capture and where to write it.
    pub snapshot: SnapshotConfig,
    /// Commands baked into the setup plan.
    pub setup: SetupConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Replaces the built-in exclusion list.
    pub exclude: Vec<String>,
    /// Appended to `exclude`.
    pub extra_exclude: Vec<String>,
    pub prefix_mode: PrefixMode,
    /// Artifact file name; the emitter's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// `script` or `json`.
    pub format: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            extra_exclude: Vec::new(),
            prefix_mode: PrefixMode::default(),
            output: None,
            format: "script".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub package_manager: String,
    pub seed_runtime: String,
    pub seed_script: String,
    pub backend_dir: String,
    pub frontend_dir: String,
    pub backend_start_script: String,
    pub frontend_start_script: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        let profile = SetupProfile::default();
        Self {
            package_manager: profile.package_manager,
            seed_runtime: profile.seed_runtime,
            seed_script: profile.seed_script,
            backend_dir: profile.backend_dir,
            frontend_dir: profile.frontend_dir,
            backend_start_script: profile.backend_start_script,
            frontend_start_script: profile.frontend_start_script,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path passed via `--config`; unlike the implicit
    /// files it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(Some(Self::config_path()), Path::new("."), config_file)
    }

    /// [`Self::load`] with explicit locations, for tests.
    pub fn load_from(
        global: Option<PathBuf>,
        cwd: &Path,
        config_file: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(global) = global {
            builder = builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(cwd.join(LOCAL_CONFIG_NAME))
                .format(FileFormat::Toml)
                .required(false),
        );

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SNAPGEN")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("snapshot.exclude")
                .with_list_parse_key("snapshot.extra_exclude")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration sources")?;
        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.snapgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "snapgen", "snapgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_NAME))
    }

    /// Effective exclusion list: `exclude`, then `extra_exclude`, then `extra`.
    pub fn exclusion_patterns<'a>(&'a self, extra: &'a [String]) -> impl Iterator<Item = &'a str> {
        self.snapshot
            .exclude
            .iter()
            .chain(&self.snapshot.extra_exclude)
            .chain(extra)
            .map(String::as_str)
    }

    /// Build the matcher for this configuration plus call-site patterns.
    pub fn matcher(&self, extra: &[String]) -> Result<PathMatcher, DomainError> {
        PathMatcher::from_patterns(self.exclusion_patterns(extra), self.snapshot.prefix_mode)
    }

    pub fn setup_profile(&self) -> SetupProfile {
        let setup = self.setup.clone();
        SetupProfile {
            package_manager: setup.package_manager,
            seed_runtime: setup.seed_runtime,
            seed_script: setup.seed_script,
            backend_dir: setup.backend_dir,
            frontend_dir: setup.frontend_dir,
            backend_start_script: setup.backend_start_script,
            frontend_start_script: setup.frontend_start_script,
        }
    }
}
