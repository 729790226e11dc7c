//! Command handlers, one module per subcommand.

pub mod apply;
pub mod check;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
