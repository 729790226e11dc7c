//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `snapgen-adapters` crate provides implementations.

use std::ffi::OsString;
use std::path::Path;

use crate::domain::Snapshot;
use crate::error::SnapgenResult;

/// File type of a directory entry, as reported without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, sockets, devices.
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `snapgen_adapters::filesystem::LocalFilesystem` (production)
/// - `snapgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// List the immediate entries of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> SnapgenResult<Vec<DirEntry>>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> SnapgenResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SnapgenResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> SnapgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;
}

/// Port for turning a snapshot into an output artifact.
///
/// Implemented by:
/// - `snapgen_adapters::emitter::NodeScriptEmitter` (self-contained setup script)
/// - `snapgen_adapters::emitter::JsonSnapshotEmitter` (data file for `snapgen apply`)
pub trait ScriptEmitter: Send + Sync {
    /// Render the full artifact text.
    fn emit(&self, snapshot: &Snapshot) -> SnapgenResult<String>;

    /// File name used when the caller does not pick one.
    fn default_file_name(&self) -> &'static str;
}

/// Port for running setup commands.
///
/// The command inherits the caller's stdio; only the exit status is
/// inspected.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str, cwd: &Path) -> SnapgenResult<()>;
}
