use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use crate::types::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Build,
    Test,
    Aspect,
}

/// A single bazel invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BazelCommand {
    pub command_type: CommandType,
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl BazelCommand {
    fn new(command_type: CommandType, program: &str, args: Vec<String>) -> Self {
        Self {
            command_type,
            program: program.to_string(),
            args,
            working_dir: None,
        }
    }

    /// `<bin> build --symlink_prefix=<out>/ <label>`
    pub fn build(bin: &str, output_dir: &Path, label: &Label) -> Self {
        Self::new(
            CommandType::Build,
            bin,
            vec![
                "build".to_string(),
                symlink_prefix(output_dir),
                label.to_string(),
            ],
        )
    }

    /// `<bin> test --symlink_prefix=<out>/ <label>`
    pub fn test(bin: &str, output_dir: &Path, label: &Label) -> Self {
        Self::new(
            CommandType::Test,
            bin,
            vec![
                "test".to_string(),
                symlink_prefix(output_dir),
                label.to_string(),
            ],
        )
    }

    /// `<bin> build --symlink_prefix=<out>/ --aspects=<pkg>:<script>%<aspect> <label>`
    pub fn aspect(
        bin: &str,
        output_dir: &Path,
        aspects_package: &str,
        script_file: &str,
        aspect_name: &str,
        label: &Label,
    ) -> Self {
        Self::new(
            CommandType::Aspect,
            bin,
            vec![
                "build".to_string(),
                symlink_prefix(output_dir),
                format!("--aspects={aspects_package}:{script_file}%{aspect_name}"),
                label.to_string(),
            ],
        )
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote(&self.program);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote(arg));
        }
        cmd
    }

    fn to_process(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }

    /// Run with inherited stdio and wait for the exit status
    pub fn execute(&self) -> io::Result<ExitStatus> {
        self.to_process().status()
    }

    /// Run with stdout and stderr captured
    pub fn output(&self) -> io::Result<Output> {
        self.to_process()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

fn symlink_prefix(output_dir: &Path) -> String {
    let dir = output_dir.to_string_lossy();
    format!("--symlink_prefix={}/", dir.trim_end_matches('/'))
}

fn quote(arg: &str) -> String {
    if arg.contains(' ') {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}
