use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::{Artifact, ArtifactPublisher, IdeModel, TaskHandle, TaskRegistry, TaskSpec, TaskStatus};

#[derive(Debug, Clone, Serialize)]
struct RegisteredTask {
    #[serde(flatten)]
    spec: TaskSpec,
    status: TaskStatus,
}

/// A host project that keeps its model in memory and serialises it as JSON
#[derive(Debug, Clone, Default, Serialize)]
pub struct InMemoryHost {
    tasks: BTreeMap<String, RegisteredTask>,
    artifacts: Vec<Artifact>,
    source_roots: BTreeSet<PathBuf>,
    test_source_roots: BTreeSet<PathBuf>,
    excluded_dirs: BTreeSet<PathBuf>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_handles(&self) -> Vec<TaskHandle> {
        self.tasks.keys().map(TaskHandle::new).collect()
    }

    pub fn source_roots(&self) -> &BTreeSet<PathBuf> {
        &self.source_roots
    }

    pub fn test_source_roots(&self) -> &BTreeSet<PathBuf> {
        &self.test_source_roots
    }

    pub fn excluded_dirs(&self) -> &BTreeSet<PathBuf> {
        &self.excluded_dirs
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TaskRegistry for InMemoryHost {
    fn register_task(&mut self, spec: TaskSpec) -> Result<TaskHandle> {
        if let Some(existing) = self.tasks.get(&spec.name) {
            if existing.spec == spec {
                debug!("Task {} already registered", spec.name);
                return Ok(TaskHandle::new(spec.name));
            }
            return Err(Error::Configuration(format!(
                "task `{}` is already registered with a different command: `{}`",
                spec.name,
                existing.spec.command.to_shell_command()
            )));
        }

        debug!("Registering task {}: {}", spec.name, spec.command.to_shell_command());
        let handle = TaskHandle::new(spec.name.clone());
        self.tasks.insert(
            spec.name.clone(),
            RegisteredTask {
                spec,
                status: TaskStatus::Pending,
            },
        );
        Ok(handle)
    }

    fn task(&self, handle: &TaskHandle) -> Option<&TaskSpec> {
        self.tasks.get(handle.name()).map(|t| &t.spec)
    }

    fn task_status(&self, handle: &TaskHandle) -> Option<TaskStatus> {
        self.tasks.get(handle.name()).map(|t| t.status)
    }

    fn run_task(&mut self, handle: &TaskHandle) -> Result<TaskStatus> {
        let task = self
            .tasks
            .get_mut(handle.name())
            .ok_or_else(|| Error::Configuration(format!("unknown task `{handle}`")))?;

        let shell = task.spec.command.to_shell_command();
        info!("Running {}: {}", handle, shell);

        let status = match task.spec.command.execute() {
            Ok(status) => status,
            Err(source) => {
                task.status = TaskStatus::Failed { code: None };
                return Err(Error::ToolLaunch {
                    command: shell,
                    source,
                });
            }
        };

        if status.success() {
            task.status = TaskStatus::Succeeded;
            Ok(task.status)
        } else {
            task.status = TaskStatus::Failed {
                code: status.code(),
            };
            let target = task.spec.command.args.last().cloned().unwrap_or_default();
            Err(Error::ExternalTool {
                command: shell,
                target,
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }
}

impl ArtifactPublisher for InMemoryHost {
    fn publish_artifact(&mut self, artifact: Artifact) -> Result<()> {
        if !self.tasks.contains_key(artifact.task.name()) {
            return Err(Error::Configuration(format!(
                "artifact {} refers to unknown task `{}`",
                artifact.path.display(),
                artifact.task
            )));
        }
        if !self.artifacts.contains(&artifact) {
            debug!("Publishing artifact {}", artifact.path.display());
            self.artifacts.push(artifact);
        }
        Ok(())
    }

    fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl IdeModel for InMemoryHost {
    fn set_source_roots(&mut self, roots: BTreeSet<PathBuf>) {
        self.source_roots = roots;
    }

    fn set_test_source_roots(&mut self, roots: BTreeSet<PathBuf>) {
        self.test_source_roots = roots;
    }

    fn add_excluded_dirs(&mut self, dirs: Vec<PathBuf>) {
        self.excluded_dirs.extend(dirs);
    }
}
