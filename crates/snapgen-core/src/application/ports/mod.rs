//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `snapgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory listing, file reads and writes
//!   - `ScriptEmitter`: snapshot serialization
//!   - `CommandRunner`: setup command execution

pub mod output;

pub use output::{CommandRunner, DirEntry, EntryKind, Filesystem, ScriptEmitter};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem};
