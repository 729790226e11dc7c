//! Application layer for Snapgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SnapshotService, SetupService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! matching or tree rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BuildOutcome, BuildReport, GenerateReport, MaterializeReport, SetupOutcome, SetupService,
    SkippedFile, SnapshotService, StepEvent, TreeBuilder,
};

pub use ports::{CommandRunner, DirEntry, EntryKind, Filesystem, ScriptEmitter};

pub use error::ApplicationError;
