//! Test doubles for bazel: an in-memory query stub and a scripted fake binary

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::aspect::{AspectQuery, AspectScript};
use crate::error::{Error, Result};
use crate::types::Label;

/// Answers queries from a fixed table and records every call
#[derive(Default)]
pub struct StubQuery {
    responses: HashMap<(AspectScript, String), Vec<String>>,
    calls: RefCell<Vec<(AspectScript, String)>>,
}

impl StubQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, script: AspectScript, target: &str, lines: &[&str]) -> Self {
        self.responses.insert(
            (script, target.to_string()),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<(AspectScript, String)> {
        self.calls.borrow().clone()
    }
}

impl AspectQuery for StubQuery {
    fn run_query(&self, script: AspectScript, target: &Label) -> Result<Vec<String>> {
        let key = (script, target.to_string());
        self.calls.borrow_mut().push(key.clone());
        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::ExternalTool {
                command: format!("stub {script}"),
                target: target.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "no stubbed response".to_string(),
            })
    }
}

/// A shell script standing in for the bazel binary.
///
/// Prints the response registered for the `--aspects` script (or the default
/// response), mirrors it on stderr, records argv and cwd, then exits with the
/// configured code.
#[cfg(unix)]
pub struct FakeBazel {
    dir: TempDir,
    workspace: PathBuf,
}

#[cfg(unix)]
impl FakeBazel {
    pub fn new(stdout: &str, exit_code: i32) -> Self {
        Self::with_responses(stdout, &[], exit_code)
    }

    pub fn with_responses(
        default: &str,
        responses: &[(AspectScript, &str)],
        exit_code: i32,
    ) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let workspace = root.join("workspace");
        fs::create_dir_all(&workspace).unwrap();

        let default_out = root.join("default.out");
        fs::write(&default_out, default).unwrap();

        let mut cases = String::new();
        for (script, body) in responses {
            let out = root.join(format!("{}.out", script.file_name()));
            fs::write(&out, body).unwrap();
            cases.push_str(&format!(
                "    --aspects=*{}*) response='{}' ;;\n",
                script.file_name(),
                out.display()
            ));
        }

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > '{args}'\n\
             pwd -P > '{cwd}'\n\
             echo call >> '{calls}'\n\
             response='{default}'\n\
             for arg in \"$@\"; do\n\
               case \"$arg\" in\n\
             {cases}\
               esac\n\
             done\n\
             cat \"$response\"\n\
             cat \"$response\" >&2\n\
             exit {exit_code}\n",
            args = root.join("args").display(),
            cwd = root.join("cwd").display(),
            calls = root.join("calls").display(),
            default = default_out.display(),
        );

        let bin = root.join("bazel");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, workspace }
    }

    pub fn bin(&self) -> String {
        self.dir.path().join("bazel").to_string_lossy().to_string()
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("args"))
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    pub fn recorded_cwd(&self) -> PathBuf {
        PathBuf::from(
            fs::read_to_string(self.dir.path().join("cwd"))
                .unwrap()
                .trim(),
        )
    }

    pub fn invocations(&self) -> usize {
        fs::read_to_string(self.dir.path().join("calls"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }
}
