//! Snapshot emitters.

mod json;
mod node;

pub use json::{DEFAULT_SNAPSHOT_NAME, JsonSnapshotEmitter, load_snapshot};
pub use node::{DEFAULT_SCRIPT_NAME, NodeScriptEmitter};
