//! Snapshot Service - capture a directory and emit the setup artifact.
//!
//! Workflow:
//! 1. Build the tree (excluded paths dropped, unreadable files skipped)
//! 2. Wrap it with the setup plan in a [`Snapshot`]
//! 3. Emit and write the artifact, overwriting any previous one

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Filesystem, ScriptEmitter},
        services::tree_builder::{BuildOutcome, BuildReport, TreeBuilder},
    },
    domain::{PathMatcher, SetupPlan, Snapshot, TreeStats},
    error::SnapgenResult,
};

/// Summary of a completed `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub stats: TreeStats,
    pub build: BuildReport,
    pub bytes_written: usize,
}

/// Orchestrates tree building and emission.
pub struct SnapshotService {
    filesystem: Box<dyn Filesystem>,
    emitter: Box<dyn ScriptEmitter>,
}

impl SnapshotService {
    /// Create a new snapshot service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use snapgen_core::application::SnapshotService;
    ///
    /// let service = SnapshotService::new(
    ///     filesystem, // impl Filesystem
    ///     emitter,    // impl ScriptEmitter
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, emitter: Box<dyn ScriptEmitter>) -> Self {
        Self {
            filesystem,
            emitter,
        }
    }

    /// Build the tree without emitting anything.
    pub fn snapshot(&self, root: &Path, matcher: &PathMatcher) -> SnapgenResult<BuildOutcome> {
        TreeBuilder::new(self.filesystem.as_ref(), matcher).build_root(root)
    }

    /// Snapshot `root` and write the emitted artifact to `output_path`.
    #[instrument(
        skip_all,
        fields(root = %root.display(), output = %output_path.display())
    )]
    pub fn generate(
        &self,
        root: &Path,
        matcher: &PathMatcher,
        plan: SetupPlan,
        output_path: &Path,
    ) -> SnapgenResult<GenerateReport> {
        info!("Scanning project tree");
        let BuildOutcome { root: tree, report } = self.snapshot(root, matcher)?;
        let stats = tree.stats();
        info!(
            files = stats.files,
            directories = stats.directories,
            skipped = report.skipped.len(),
            "Tree captured"
        );

        let snapshot = Snapshot::new(tree, plan);
        let artifact = self.emitter.emit(&snapshot)?;

        self.filesystem.write_file(output_path, &artifact)?;
        info!(bytes = artifact.len(), "Artifact written");

        Ok(GenerateReport {
            output_path: output_path.to_path_buf(),
            stats,
            build: report,
            bytes_written: artifact.len(),
        })
    }

    /// File name the configured emitter writes to by default.
    pub fn default_file_name(&self) -> &'static str {
        self.emitter.default_file_name()
    }
}
