//! Snapgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Snapgen
//! project snapshot tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           snapgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (SnapshotService, SetupService,        │
//! │   TreeBuilder)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ScriptEmitter, Commands)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    snapgen-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (PathMatcher, Directory, SetupPlan)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use snapgen_core::prelude::*;
//!
//! let matcher = PathMatcher::from_patterns(["node_modules", ".git"], PrefixMode::Literal)?;
//! let plan = SetupPlan::from_profile(&SetupProfile::default());
//!
//! let service = SnapshotService::new(filesystem, emitter);
//! service.generate(root, &matcher, plan, &root.join("setup-project.js"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        SetupService, SnapshotService, TreeBuilder,
        ports::{CommandRunner, Filesystem, ScriptEmitter},
    };
    pub use crate::domain::{
        Directory, ExclusionPattern, FileNode, PathMatcher, PrefixMode, SetupPlan, SetupProfile,
        Snapshot, TreeNode,
    };
    pub use crate::error::{SnapgenError, SnapgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
