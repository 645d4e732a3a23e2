//! Strategy for test rules

use std::path::PathBuf;

use crate::{
    command::BazelCommand,
    config::DecoratedConfig,
    host::TaskSpec,
    types::Label,
};

/// Runs `bazel test`; test targets publish nothing
#[derive(Debug, Clone, PartialEq)]
pub struct TestStrategy {
    pub(super) label: Label,
    bazel_bin: String,
    workspace_root: PathBuf,
    output_dir: PathBuf,
}

impl TestStrategy {
    pub(super) fn can_handle(rule_kind: &str) -> bool {
        matches!(
            rule_kind,
            "test" | "java_test" | "kt_jvm_test" | "android_local_test"
        )
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
            name: format!("bazelTest({})", self.label),
            description: format!("Runs {} with bazel test", self.label),
            command: BazelCommand::test(&self.bazel_bin, &self.output_dir, &self.label)
                .with_working_dir(&self.workspace_root),
        }
    }
}
