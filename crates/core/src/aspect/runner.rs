//! Runs aspect scripts through the bazel binary

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    command::BazelCommand,
    config::{DecoratedConfig, DEFAULT_ASPECTS_DIR},
    error::{Error, Result},
    types::Label,
};

use super::{parse_framed_output, AspectQuery, AspectScript};

/// Invokes bazel once per query, blocking until the process exits.
///
/// There is no timeout: a hung bazel server hangs the caller.
#[derive(Debug, Clone)]
pub struct AspectRunner {
    bazel_bin: String,
    workspace_root: PathBuf,
    output_dir: PathBuf,
    aspects_package: String,
}

impl AspectRunner {
    pub fn new(
        bazel_bin: impl Into<String>,
        workspace_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bazel_bin: bazel_bin.into(),
            workspace_root: workspace_root.into(),
            output_dir: output_dir.into(),
            aspects_package: format!("//{DEFAULT_ASPECTS_DIR}"),
        }
    }

    pub fn from_config(config: &DecoratedConfig) -> Self {
        Self::new(
            config.bazel_bin.clone(),
            config.workspace_root.clone(),
            config.build_output_dir.clone(),
        )
        .with_aspects_package(config.aspects_package())
    }

    pub fn with_aspects_package(mut self, package: impl Into<String>) -> Self {
        self.aspects_package = package.into();
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The command a query for `script` against `target` runs
    pub fn command_for(&self, script: AspectScript, target: &Label) -> BazelCommand {
        BazelCommand::aspect(
            &self.bazel_bin,
            &self.output_dir,
            &self.aspects_package,
            script.file_name(),
            script.aspect_name(),
            target,
        )
        .with_working_dir(&self.workspace_root)
    }
}

impl AspectQuery for AspectRunner {
    fn run_query(&self, script: AspectScript, target: &Label) -> Result<Vec<String>> {
        let command = self.command_for(script, target);
        let shell = command.to_shell_command();
        debug!("Running aspect {} for {}: {}", script, target, shell);

        let output = command.output().map_err(|source| Error::ToolLaunch {
            command: shell.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if !stderr.is_empty() {
                debug!("bazel stderr: {}", stderr);
            }
            return Err(Error::ExternalTool {
                command: shell,
                target: target.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let records = parse_framed_output(&stdout, script, target)?;
        debug!("Aspect {} returned {} records for {}", script, records.len(), target);
        Ok(records)
    }
}
