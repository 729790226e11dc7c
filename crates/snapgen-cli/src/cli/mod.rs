//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "snapgen",
    bin_name = "snapgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4f8} Snapshot a project into a self-contained setup script",
    long_about = "Snapgen captures the files of a project directory, minus \
                  dependency folders and local artifacts, into a script that \
                  recreates the project and installs its dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 snapgen                                # write ./setup-project.js\n\
        \x20 snapgen generate --exclude coverage --dry-run\n\
        \x20 snapgen generate --format json -o snapshot.json\n\
        \x20 snapgen apply snapshot.json --target ../restored\n\
        \x20 snapgen check backend/database/schema.sql"
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Snapshot a directory into a setup artifact.
    #[command(
        visible_alias = "gen",
        about = "Snapshot the project (default command)",
        after_help = "EXAMPLES:\n\
            \x20 snapgen generate\n\
            \x20 snapgen generate --root ./app --output ./setup-project.js\n\
            \x20 snapgen generate -e coverage -e tmp --no-setup\n\
            \x20 snapgen generate --format json"
    )]
    Generate(GenerateArgs),

    /// Recreate a project from a JSON snapshot.
    #[command(
        about = "Recreate a project from a JSON snapshot",
        after_help = "EXAMPLES:\n\
            \x20 snapgen apply setup-project.json\n\
            \x20 snapgen apply setup-project.json --target ./restored --skip-setup"
    )]
    Apply(ApplyArgs),

    /// Explain whether paths would be excluded.
    #[command(
        about = "Check paths against the exclusion list",
        after_help = "EXAMPLES:\n\
            \x20 snapgen check node_modules/x.txt my_node_modules_backup/z.txt"
    )]
    Check(CheckArgs),

    /// Initialise a Snapgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 snapgen init           # global config\n\
            \x20 snapgen init --local   # .snapgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 snapgen completions bash > ~/.local/share/bash-completion/completions/snapgen\n\
            \x20 snapgen completions zsh  > ~/.zfunc/_snapgen\n\
            \x20 snapgen completions fish > ~/.config/fish/completions/snapgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 snapgen config get setup.package_manager\n\
            \x20 snapgen config list\n\
            \x20 snapgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `snapgen generate`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Directory to snapshot.
    #[arg(long = "root", value_name = "DIR", help = "Directory to snapshot (default: current directory)")]
    pub root: Option<PathBuf>,

    /// Where to write the artifact.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (default: setup-project.js inside the root)"
    )]
    pub output: Option<PathBuf>,

    /// Artifact format.
    #[arg(long = "format", value_enum, help = "Artifact format")]
    pub format: Option<ArtifactFormat>,

    /// Additional exclusion patterns.
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        help = "Exclude an extra path or name (repeatable)"
    )]
    pub exclude: Vec<String>,

    /// Emit an empty setup plan.
    #[arg(long = "no-setup", help = "Only recreate files, skip dependency installation")]
    pub no_setup: bool,

    /// Print what would be captured without writing.
    #[arg(long = "dry-run", help = "Show what would be captured without writing")]
    pub dry_run: bool,
}

/// Artifact formats understood by `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactFormat {
    /// Standalone Node.js program.
    Script,
    /// JSON snapshot for `snapgen apply`.
    Json,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `snapgen apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Snapshot document produced by `generate --format json`.
    #[arg(value_name = "SNAPSHOT", help = "JSON snapshot file")]
    pub snapshot: PathBuf,

    /// Directory to recreate the project in.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DIR",
        help = "Target directory (default: current directory)"
    )]
    pub target: Option<PathBuf>,

    /// Only write files.
    #[arg(long = "skip-setup", help = "Do not run the setup steps")]
    pub skip_setup: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `snapgen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Relative paths to test.
    #[arg(value_name = "PATH", required = true, help = "Relative paths to check")]
    pub paths: Vec<String>,

    /// Additional exclusion patterns.
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN", help = "Extra pattern (repeatable)")]
    pub exclude: Vec<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `snapgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.snapgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `snapgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `snapgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `setup.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["snapgen"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn exclude_is_repeatable() {
        let cli = Cli::parse_from(["snapgen", "generate", "-e", "coverage", "--exclude", "tmp"]);
        match cli.command {
            Some(Commands::Generate(args)) => assert_eq!(args.exclude, vec!["coverage", "tmp"]),
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn gen_alias_and_format() {
        let cli = Cli::parse_from(["snapgen", "gen", "--format", "json"]);
        match cli.command {
            Some(Commands::Generate(args)) => assert_eq!(args.format, Some(ArtifactFormat::Json)),
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn apply_requires_snapshot() {
        assert!(Cli::try_parse_from(["snapgen", "apply"]).is_err());
    }

    #[test]
    fn check_requires_a_path() {
        assert!(Cli::try_parse_from(["snapgen", "check"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["snapgen", "--quiet", "--verbose", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["snapgen", "check", "x", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }
}
