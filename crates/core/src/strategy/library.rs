//! Strategy for JVM library rules

use std::path::PathBuf;

use crate::{
    command::BazelCommand,
    config::DecoratedConfig,
    host::{Artifact, TaskHandle, TaskSpec},
    types::Label,
};

use super::library_artifact_path;

/// Builds the target and publishes its `lib<name>.jar`
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStrategy {
    pub(super) label: Label,
    bazel_bin: String,
    workspace_root: PathBuf,
    output_dir: PathBuf,
}

impl LibraryStrategy {
    pub(super) fn can_handle(rule_kind: &str) -> bool {
        matches!(rule_kind, "library" | "java_library" | "kt_jvm_library")
    }

    pub(super) fn new(config: &DecoratedConfig, label: &Label) -> Self {
        Self {
            label: label.clone(),
            bazel_bin: config.bazel_bin.clone(),
            workspace_root: config.workspace_root.clone(),
            output_dir: config.build_output_dir.clone(),
        }
    }

    pub(super) fn task_spec(&self) -> TaskSpec {
        TaskSpec {
            name: format!("bazelBuild({})", self.label),
            description: format!("Builds {} with bazel", self.label),
            command: BazelCommand::build(&self.bazel_bin, &self.output_dir, &self.label)
                .with_working_dir(&self.workspace_root),
        }
    }

    pub(super) fn artifacts(&self, task: &TaskHandle) -> Vec<Artifact> {
        vec![Artifact {
            task: task.clone(),
            path: library_artifact_path(&self.output_dir, &self.label, "jar"),
            kind: "jar".to_string(),
        }]
    }
}
