//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "snapshot a project" or "recreate a project".

pub mod setup_service;
pub mod snapshot_service;
pub mod tree_builder;

pub use setup_service::{MaterializeReport, SetupOutcome, SetupService, StepEvent};
pub use snapshot_service::{GenerateReport, SnapshotService};
pub use tree_builder::{BuildOutcome, BuildReport, SkippedFile, TreeBuilder};
