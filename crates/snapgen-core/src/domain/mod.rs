//! Core domain layer for Snapgen.
//!
//! This module contains pure logic with no I/O. Filesystem access and
//! command execution are reached through ports (traits) defined in the
//! application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process calls
//! - **Immutable values**: patterns, trees and plans are `Clone + PartialEq`

pub mod error;
pub mod exclusion;
pub mod setup;
pub mod snapshot;
pub mod tree;

pub use error::{DomainError, ErrorCategory};
pub use exclusion::{ExclusionPattern, PathMatcher, PatternKind, PrefixMode, normalize_separators};
pub use setup::{SetupPlan, SetupProfile, SetupStep, StepCondition};
pub use snapshot::{FORMAT_VERSION, Snapshot};
pub use tree::{Directory, FileNode, TreeNode, TreeStats, join_relative, validate_entry_name};
