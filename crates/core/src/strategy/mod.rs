//! Per-rule-kind policies turning a Bazel target into a host task and artifacts

mod android_library;
mod library;
mod test_target;

pub use android_library::AndroidLibraryStrategy;
pub use library::LibraryStrategy;
pub use test_target::TestStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    config::DecoratedConfig,
    error::{Error, Result},
    host::{Artifact, TaskHandle, TaskRegistry},
    types::Label,
};

/// Bazel's classification of a target, e.g. `java_library`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleKind(String);

impl RuleKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Fallback for a main target whose rule kind query returned nothing
    pub fn default_library() -> Self {
        Self::new("library")
    }

    /// Fallback for a test target whose rule kind query returned nothing
    pub fn default_test() -> Self {
        Self::new("test")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of strategies; one variant per supported family of rules
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Library(LibraryStrategy),
    AndroidLibrary(AndroidLibraryStrategy),
    Test(TestStrategy),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Library(_) => "library",
            Strategy::AndroidLibrary(_) => "android_library",
            Strategy::Test(_) => "test",
        }
    }

    pub fn label(&self) -> &Label {
        match self {
            Strategy::Library(s) => &s.label,
            Strategy::AndroidLibrary(s) => &s.label,
            Strategy::Test(s) => &s.label,
        }
    }

    /// Register the bazel task for this target; safe to call more than once
    pub fn create_build_task<R: TaskRegistry + ?Sized>(&self, host: &mut R) -> Result<TaskHandle> {
        let spec = match self {
            Strategy::Library(s) => s.task_spec(),
            Strategy::AndroidLibrary(s) => s.task_spec(),
            Strategy::Test(s) => s.task_spec(),
        };
        host.register_task(spec)
    }

    /// Artifacts `task` produces. Enumerating them does not run the task.
    pub fn list_artifacts<R: TaskRegistry + ?Sized>(
        &self,
        host: &R,
        task: &TaskHandle,
    ) -> Result<Vec<Artifact>> {
        if host.task(task).is_none() {
            return Err(Error::Configuration(format!(
                "cannot list artifacts of unregistered task `{task}`"
            )));
        }

        let artifacts = match self {
            Strategy::Library(s) => s.artifacts(task),
            Strategy::AndroidLibrary(s) => s.artifacts(task),
            Strategy::Test(_) => Vec::new(),
        };
        Ok(artifacts)
    }
}

/// Maps rule kinds onto strategies
pub struct StrategyFactory;

impl StrategyFactory {
    /// Select the strategy for `kind`; unknown kinds are a configuration error
    pub fn build(kind: &RuleKind, config: &DecoratedConfig, label: &Label) -> Result<Strategy> {
        let kind_str = kind.as_str();
        let strategy = if LibraryStrategy::can_handle(kind_str) {
            Strategy::Library(LibraryStrategy::new(config, label))
        } else if AndroidLibraryStrategy::can_handle(kind_str) {
            Strategy::AndroidLibrary(AndroidLibraryStrategy::new(config, label))
        } else if TestStrategy::can_handle(kind_str) {
            Strategy::Test(TestStrategy::new(config, label))
        } else {
            return Err(Error::Configuration(format!(
                "no strategy for rule kind `{kind}` of {label}"
            )));
        };

        debug!("Selected {} strategy for {} ({})", strategy.name(), label, kind);
        Ok(strategy)
    }
}

/// `<output_dir>/bin/<package-path>/lib<name>.<ext>`
pub(crate) fn library_artifact_path(output_dir: &Path, label: &Label, extension: &str) -> PathBuf {
    let mut path = output_dir.join("bin");
    if let Some(package_dir) = label.host_path().parent() {
        path.push(package_dir);
    }
    path.push(format!("lib{}.{}", label.name(), extension));
    path
}
