//! JSON snapshot emitter and loader.
//!
//! The document is the serialized [`Snapshot`] and is the input of
//! `snapgen apply`.

use snapgen_core::{
    application::{ApplicationError, ports::ScriptEmitter},
    domain::Snapshot,
    error::{SnapgenError, SnapgenResult},
};
use tracing::{debug, instrument};

pub const DEFAULT_SNAPSHOT_NAME: &str = "setup-project.json";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotEmitter;

impl JsonSnapshotEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptEmitter for JsonSnapshotEmitter {
    fn emit(&self, snapshot: &Snapshot) -> SnapgenResult<String> {
        let mut document = serde_json::to_string_pretty(snapshot).map_err(|e| {
            SnapgenError::from(ApplicationError::EmissionFailed {
                reason: format!("failed to serialise snapshot: {e}"),
            })
        })?;
        document.push('\n');
        Ok(document)
    }

    fn default_file_name(&self) -> &'static str {
        DEFAULT_SNAPSHOT_NAME
    }
}

/// Parse and validate a snapshot document.
///
/// Entry names are checked so a crafted document cannot write outside the
/// target directory.
#[instrument(skip_all, fields(bytes = text.len()))]
pub fn load_snapshot(text: &str) -> SnapgenResult<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(text).map_err(|e| {
        SnapgenError::from(ApplicationError::InvalidSnapshot {
            reason: e.to_string(),
        })
    })?;
    snapshot.validate()?;
    debug!(generator = %snapshot.generator, "Snapshot loaded");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use snapgen_core::domain::{
        Directory, DomainError, SetupPlan, SetupProfile, TreeNode,
    };

    use super::*;

    fn snapshot() -> Snapshot {
        let root = Directory::new()
            .with_directory("backend", Directory::new().with_file("server.js", "console.log(1)"))
            .with_directory("empty", Directory::new())
            .with_file("blank.txt", "");
        Snapshot::new(root, SetupPlan::from_profile(&SetupProfile::default()))
    }

    #[test]
    fn emitted_document_loads_back() {
        let original = snapshot();
        let text = JsonSnapshotEmitter::new().emit(&original).unwrap();
        let loaded = load_snapshot(&text).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.root.get("empty"), Some(&TreeNode::Directory(Directory::new())));
        assert_eq!(loaded.root.get("blank.txt"), Some(&TreeNode::file("")));
    }

    #[test]
    fn garbage_is_an_invalid_snapshot() {
        let err = load_snapshot("not json").unwrap_err();
        assert!(matches!(
            err,
            SnapgenError::Application(ApplicationError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn traversal_entry_names_are_rejected() {
        let text = r#"{
            "format_version": 1,
            "generator": "snapgen 0.1.0",
            "generated_at": "2026-01-01T00:00:00Z",
            "root": {"..": {"escape.txt": "x"}}
        }"#;
        let err = load_snapshot(text).unwrap_err();
        assert!(matches!(
            err,
            SnapgenError::Domain(DomainError::InvalidEntryName { .. })
        ));
    }

    #[test]
    fn default_name_is_json() {
        assert!(JsonSnapshotEmitter::new().default_file_name().ends_with(".json"));
    }
}
