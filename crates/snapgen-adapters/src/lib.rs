//! Infrastructure adapters for Snapgen.
//!
//! This crate implements the ports defined in `snapgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod emitter;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use emitter::{JsonSnapshotEmitter, NodeScriptEmitter, load_snapshot};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemCommandRunner;
