//! Out-of-process introspection of Bazel targets through aspect scripts

pub mod output;
pub mod runner;

pub use output::{parse_dependency_line, parse_framed_output, FRAME_BEGIN, FRAME_END};
pub use runner::AspectRunner;

use std::fmt;
use tracing::warn;

use crate::{error::Result, strategy::RuleKind, types::Label};

/// The fixed set of introspection scripts bazel-leaf knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectScript {
    RuleKind,
    Dependencies,
    SourceFiles,
}

impl AspectScript {
    pub fn file_name(&self) -> &'static str {
        match self {
            AspectScript::RuleKind => "get_rule_kind.bzl",
            AspectScript::Dependencies => "get_deps.bzl",
            AspectScript::SourceFiles => "get_source_files.bzl",
        }
    }

    /// Name of the aspect symbol exported by the script
    pub fn aspect_name(&self) -> &'static str {
        match self {
            AspectScript::RuleKind => "get_rule_kind",
            AspectScript::Dependencies => "get_deps",
            AspectScript::SourceFiles => "get_source_files",
        }
    }
}

impl fmt::Display for AspectScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Asks structured questions about a target.
///
/// Every call is a fresh query; implementations must not cache between calls.
pub trait AspectQuery {
    /// Run `script` against `target` and return its output records in order
    fn run_query(&self, script: AspectScript, target: &Label) -> Result<Vec<String>>;

    /// First non-empty record of the rule-kind script, if any
    fn rule_kind(&self, target: &Label) -> Result<Option<RuleKind>> {
        let lines = self.run_query(AspectScript::RuleKind, target)?;
        Ok(lines
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .map(RuleKind::new))
    }

    /// Source files as reported by Bazel, relative to the workspace root
    fn source_files(&self, target: &Label) -> Result<Vec<String>> {
        let lines = self.run_query(AspectScript::SourceFiles, target)?;
        Ok(lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Direct dependencies; malformed records are skipped
    fn dependencies(&self, target: &Label) -> Result<Vec<Label>> {
        let lines = self.run_query(AspectScript::Dependencies, target)?;
        let mut deps = Vec::new();
        for line in &lines {
            let Some(raw) = parse_dependency_line(line) else {
                continue;
            };
            match Label::parse(raw) {
                Ok(label) => deps.push(label),
                Err(e) => warn!("Skipping dependency record {:?} of {}: {}", line, target, e),
            }
        }
        Ok(deps)
    }
}
