//! Interfaces of the host build tool and IDE model the core registers into

mod memory;

pub use memory::InMemoryHost;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::{command::BazelCommand, error::Result};

/// Name of a task registered with the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a strategy asks the host to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub description: String,
    pub command: BazelCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TaskStatus {
    Pending,
    Succeeded,
    Failed { code: Option<i32> },
}

/// A file produced by a task; only valid once that task has succeeded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    pub task: TaskHandle,
    pub path: PathBuf,
    /// File extension, e.g. `jar`
    pub kind: String,
}

impl Artifact {
    pub fn is_valid<R: TaskRegistry + ?Sized>(&self, tasks: &R) -> bool {
        tasks.task_status(&self.task) == Some(TaskStatus::Succeeded)
    }
}

/// Task registration and execution facility of the host build tool
pub trait TaskRegistry {
    /// Register `spec`, or return the existing handle when an identical task
    /// is already registered under the same name. A different task under the
    /// same name is a configuration error.
    fn register_task(&mut self, spec: TaskSpec) -> Result<TaskHandle>;

    fn task(&self, handle: &TaskHandle) -> Option<&TaskSpec>;

    fn task_status(&self, handle: &TaskHandle) -> Option<TaskStatus>;

    /// Execute the task's command and record the outcome
    fn run_task(&mut self, handle: &TaskHandle) -> Result<TaskStatus>;
}

/// Outgoing artifacts of the host project
pub trait ArtifactPublisher {
    fn publish_artifact(&mut self, artifact: Artifact) -> Result<()>;

    fn artifacts(&self) -> &[Artifact];
}

/// The IDE project model
pub trait IdeModel {
    fn set_source_roots(&mut self, roots: BTreeSet<PathBuf>);

    fn set_test_source_roots(&mut self, roots: BTreeSet<PathBuf>);

    /// Adds to, rather than replaces, the directories already excluded
    fn add_excluded_dirs(&mut self, dirs: Vec<PathBuf>);
}

/// Everything the coordinator needs from the host
pub trait HostProject: TaskRegistry + ArtifactPublisher + IdeModel {}

impl<T: TaskRegistry + ArtifactPublisher + IdeModel> HostProject for T {}
