//! Wires rule-kind classification, strategies and source-root inference per target

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::{
    aspect::AspectQuery,
    config::DecoratedConfig,
    error::Result,
    host::{Artifact, HostProject, TaskHandle},
    source::SourceRootResolver,
    strategy::{RuleKind, StrategyFactory},
    types::Label,
};

/// What configuring a single target registered with the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetOutcome {
    pub label: Label,
    pub rule_kind: RuleKind,
    pub strategy: &'static str,
    pub task: TaskHandle,
    pub artifacts: Vec<Artifact>,
    pub source_roots: BTreeSet<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigureOutcome {
    pub main: TargetOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TargetOutcome>,
}

impl ConfigureOutcome {
    pub fn tasks(&self) -> Vec<&TaskHandle> {
        std::iter::once(&self.main)
            .chain(self.test.as_ref())
            .map(|outcome| &outcome.task)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetRole {
    Main,
    Test,
}

pub struct BuildCoordinator<'a, Q: AspectQuery + ?Sized> {
    config: &'a DecoratedConfig,
    query: &'a Q,
}

impl<'a, Q: AspectQuery + ?Sized> BuildCoordinator<'a, Q> {
    pub fn new(config: &'a DecoratedConfig, query: &'a Q) -> Self {
        Self { config, query }
    }

    /// Register the configured target, and its test target if any, with `host`.
    ///
    /// Excluded directories are added first; any failure afterwards aborts the
    /// pass without touching the remaining targets.
    pub fn configure<H: HostProject + ?Sized>(&self, host: &mut H) -> Result<ConfigureOutcome> {
        host.add_excluded_dirs(self.config.excluded_dirs());

        let main = self.configure_target(host, &self.config.target.label, TargetRole::Main)?;
        host.set_source_roots(main.source_roots.clone());

        let test = match &self.config.target.test_label {
            Some(test_label) => {
                let outcome = self.configure_target(host, test_label, TargetRole::Test)?;
                host.set_test_source_roots(outcome.source_roots.clone());
                Some(outcome)
            }
            None => {
                debug!("No test target configured for {}", self.config.target.label);
                None
            }
        };

        Ok(ConfigureOutcome { main, test })
    }

    fn configure_target<H: HostProject + ?Sized>(
        &self,
        host: &mut H,
        label: &Label,
        role: TargetRole,
    ) -> Result<TargetOutcome> {
        let rule_kind = match self.query.rule_kind(label)? {
            Some(kind) => kind,
            None => {
                let fallback = match role {
                    TargetRole::Main => RuleKind::default_library(),
                    TargetRole::Test => RuleKind::default_test(),
                };
                debug!("No rule kind reported for {}, assuming {}", label, fallback);
                fallback
            }
        };

        let strategy = StrategyFactory::build(&rule_kind, self.config, label)?;
        let task = strategy.create_build_task(host)?;

        // Only the main target publishes outgoing artifacts
        let artifacts = match role {
            TargetRole::Main => {
                let artifacts = strategy.list_artifacts(&*host, &task)?;
                for artifact in &artifacts {
                    host.publish_artifact(artifact.clone())?;
                }
                artifacts
            }
            TargetRole::Test => Vec::new(),
        };

        let files = self.query.source_files(label)?;
        let source_roots = SourceRootResolver::resolve_roots(&files, self.config)?;

        info!(
            "Configured {} as {} (task {}, {} artifacts, {} source roots)",
            label,
            strategy.name(),
            task,
            artifacts.len(),
            source_roots.len()
        );

        Ok(TargetOutcome {
            label: label.clone(),
            rule_kind,
            strategy: strategy.name(),
            task,
            artifacts,
            source_roots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::AspectScript;
    use crate::config::BazelLeafConfig;
    use crate::error::Error;
    use crate::host::{ArtifactPublisher, InMemoryHost, TaskRegistry};
    use crate::testutil::StubQuery;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(ws: &Path, test_target: Option<&str>) -> DecoratedConfig {
        BazelLeafConfig {
            target: Some("//src:acme".to_string()),
            test_target: test_target.map(str::to_string),
            ..Default::default()
        }
        .decorate(ws)
        .unwrap()
    }

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("src/com/acme");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("Foo.lang"),
            "// Copyright\n\npackage com.acme;\n\nclass Foo {}\n",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_library_end_to_end() {
        let temp_dir = workspace();
        let ws = temp_dir.path();
        let config = config(ws, None);
        let query = StubQuery::new()
            .with(AspectScript::RuleKind, "//src:acme", &["library"])
            .with(AspectScript::SourceFiles, "//src:acme", &["src/com/acme/Foo.lang"]);
        let mut host = InMemoryHost::new();

        let outcome = BuildCoordinator::new(&config, &query)
            .configure(&mut host)
            .unwrap();

        assert_eq!(outcome.main.strategy, "library");
        assert_eq!(host.task_handles(), vec![TaskHandle::new("bazelBuild(//src:acme)")]);
        assert_eq!(host.artifacts().len(), 1);
        let jar = ws.join("build/bazel-leaf/bin/src/libacme.jar");
        assert_eq!(host.artifacts()[0].path, jar);
        assert_eq!(host.source_roots(), &BTreeSet::from([ws.join("src")]));
        assert!(host.test_source_roots().is_empty());
        assert!(outcome.test.is_none());
        assert!(host.excluded_dirs().contains(&ws.join("bazel-out")));
    }

    #[test]
    fn test_unmapped_kind_creates_no_task() {
        let temp_dir = workspace();
        let config = config(temp_dir.path(), None);
        let query = StubQuery::new()
            .with(AspectScript::RuleKind, "//src:acme", &["genrule"])
            .with(AspectScript::SourceFiles, "//src:acme", &["src/com/acme/Foo.lang"]);
        let mut host = InMemoryHost::new();

        let result = BuildCoordinator::new(&config, &query).configure(&mut host);

        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(host.task_handles().is_empty());
        assert!(host.artifacts().is_empty());
    }

    #[test]
    fn test_each_query_runs_once_per_target() {
        let temp_dir = workspace();
        let config = config(temp_dir.path(), Some("//src:acme_test"));
        let query = StubQuery::new()
            .with(AspectScript::RuleKind, "//src:acme", &["java_library"])
            .with(AspectScript::SourceFiles, "//src:acme", &["src/com/acme/Foo.lang"])
            .with(AspectScript::RuleKind, "//src:acme_test", &[])
            .with(AspectScript::SourceFiles, "//src:acme_test", &["src/com/acme/Foo.lang"]);
        let mut host = InMemoryHost::new();

        let outcome = BuildCoordinator::new(&config, &query)
            .configure(&mut host)
            .unwrap();

        let test = outcome.test.as_ref().unwrap();
        assert_eq!(test.rule_kind, RuleKind::default_test());
        assert_eq!(test.strategy, "test");
        assert_eq!(host.test_source_roots(), &BTreeSet::from([temp_dir.path().join("src")]));
        assert_eq!(outcome.tasks().len(), 2);
        assert_eq!(host.task(&test.task).unwrap().command.args[0], "test");

        let calls = query.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls
                .iter()
                .filter(|(script, _)| *script == AspectScript::RuleKind)
                .count(),
            2
        );
    }

    #[test]
    fn test_missing_rule_kind_falls_back_to_library() {
        let temp_dir = workspace();
        let config = config(temp_dir.path(), None);
        let query = StubQuery::new()
            .with(AspectScript::RuleKind, "//src:acme", &[])
            .with(AspectScript::SourceFiles, "//src:acme", &[]);
        let mut host = InMemoryHost::new();

        let outcome = BuildCoordinator::new(&config, &query)
            .configure(&mut host)
            .unwrap();

        assert_eq!(outcome.main.rule_kind, RuleKind::default_library());
        assert!(outcome.main.source_roots.is_empty());
    }

    #[test]
    fn test_query_failure_aborts_before_test_target() {
        let temp_dir = workspace();
        let config = config(temp_dir.path(), Some("//src:acme_test"));
        let query = StubQuery::new().with(AspectScript::RuleKind, "//src:acme", &["library"]);
        let mut host = InMemoryHost::new();

        let result = BuildCoordinator::new(&config, &query).configure(&mut host);

        assert!(matches!(result, Err(Error::ExternalTool { .. })));
        assert!(query
            .calls()
            .iter()
            .all(|(_, target)| target == "//src:acme"));
        assert!(!host.excluded_dirs().is_empty());
    }

    #[test]
    fn test_test_target_publishes_nothing() {
        let temp_dir = workspace();
        let config = config(temp_dir.path(), Some("//src:acme_fixtures"));
        let query = StubQuery::new()
            .with(AspectScript::RuleKind, "//src:acme", &["java_library"])
            .with(AspectScript::SourceFiles, "//src:acme", &["src/com/acme/Foo.lang"])
            .with(AspectScript::RuleKind, "//src:acme_fixtures", &["java_library"])
            .with(AspectScript::SourceFiles, "//src:acme_fixtures", &[]);
        let mut host = InMemoryHost::new();

        let outcome = BuildCoordinator::new(&config, &query)
            .configure(&mut host)
            .unwrap();

        let test = outcome.test.unwrap();
        assert_eq!(test.strategy, "library");
        assert!(test.artifacts.is_empty());
        assert_eq!(host.task_handles().len(), 2);
        assert_eq!(host.artifacts().len(), 1);
        assert!(host.artifacts()[0].path.ends_with("src/libacme.jar"));
    }
}
