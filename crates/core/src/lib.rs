//! bazel-leaf - Bridges a single Bazel target into a host build tool and IDE model
//!
//! This crate provides functionality to:
//! - Query Bazel targets out of process through aspect scripts
//! - Infer source roots from the package declarations of source files
//! - Register build and test tasks, and their artifacts, with a host project
pub mod aspect;
pub mod command;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod source;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod testutil;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use aspect::{AspectQuery, AspectRunner, AspectScript};
pub use command::{BazelCommand, CommandType};
pub use config::{BazelLeafConfig, DecoratedConfig};
pub use coordinator::{BuildCoordinator, ConfigureOutcome, TargetOutcome};
pub use host::{
    Artifact, ArtifactPublisher, HostProject, IdeModel, InMemoryHost, TaskHandle, TaskRegistry,
    TaskSpec, TaskStatus,
};
pub use source::{SourceFileEntry, SourceRootResolver, WorkspacePathResolver};
pub use strategy::{RuleKind, Strategy, StrategyFactory};
