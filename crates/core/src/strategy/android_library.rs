//! Strategy for `android_library` rules

use std::path::PathBuf;

use crate::{
    command::BazelCommand,
    config::DecoratedConfig,
    host::{Artifact, TaskHandle, TaskSpec},
    types::Label,
};

use super::library_artifact_path;

/// Builds the target and publishes its `lib<name>.aar`
#[derive(Debug, Clone, PartialEq)]
pub struct AndroidLibraryStrategy {
    pub(super) label: Label,
    bazel_bin: String,
    workspace_root: PathBuf,
    output_dir: PathBuf,
}

impl AndroidLibraryStrategy {
    pub(super) fn can_handle(rule_kind: &str) -> bool {
        rule_kind == "android_library"
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
            description: format!("Builds Android library {} with bazel", self.label),
            command: BazelCommand::build(&self.bazel_bin, &self.output_dir, &self.label)
                .with_working_dir(&self.workspace_root),
        }
    }

    pub(super) fn artifacts(&self, task: &TaskHandle) -> Vec<Artifact> {
        vec![Artifact {
            task: task.clone(),
            path: library_artifact_path(&self.output_dir, &self.label, "aar"),
            kind: "aar".to_string(),
        }]
    }
}
