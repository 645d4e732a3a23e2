use crate::{
    error::{Error, Result},
    types::{Label, Target},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".bazel-leaf.json";
pub const DEFAULT_BAZEL_BIN: &str = "bazel";
pub const DEFAULT_ASPECTS_DIR: &str = "build/bazel_aspects";
pub const DEFAULT_OUTPUT_DIR: &str = "build/bazel-leaf";

/// User-facing configuration, as stored in `.bazel-leaf.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct BazelLeafConfig {
    /// The bazel binary (default: "bazel")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bazel_bin: Option<String>,

    /// Directory holding the WORKSPACE / MODULE.bazel file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Canonical output directory passed as `--symlink_prefix`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_output_dir: Option<PathBuf>,

    /// Workspace-relative directory the aspect scripts are installed into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspects_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_target: Option<String>,
}

impl BazelLeafConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::Configuration(format!("Failed to parse {}: {e}", path.display()))
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge_with(&mut self, other: BazelLeafConfig) {
        if other.bazel_bin.is_some() {
            self.bazel_bin = other.bazel_bin;
        }
        if other.workspace_root.is_some() {
            self.workspace_root = other.workspace_root;
        }
        if other.build_output_dir.is_some() {
            self.build_output_dir = other.build_output_dir;
        }
        if other.aspects_dir.is_some() {
            self.aspects_dir = other.aspects_dir;
        }
        if other.target.is_some() {
            self.target = other.target;
        }
        if other.test_target.is_some() {
            self.test_target = other.test_target;
        }
    }

    /// Check the fields that are required before any bazel invocation
    pub fn validate(&self) -> Result<()> {
        match self.target.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(Error::Configuration(
                    "`target` is required (e.g. \"//path/to:name\")".to_string(),
                ));
            }
            Some(target) => {
                Label::parse(target)?;
            }
        }

        if let Some(test_target) = self.test_target.as_deref().map(str::trim) {
            if !test_target.is_empty() {
                Label::parse(test_target)?;
            }
        }

        if let Some(bin) = &self.bazel_bin {
            if bin.trim().is_empty() {
                return Err(Error::Configuration("`bazel_bin` is empty".to_string()));
            }
        }

        if let Some(dir) = &self.aspects_dir {
            if Path::new(dir).is_absolute() {
                return Err(Error::Configuration(format!(
                    "`aspects_dir` must be relative to the workspace root, got {dir}"
                )));
            }
        }

        Ok(())
    }

    /// Resolve defaults against `base_dir` and parse the labels
    pub fn decorate(&self, base_dir: &Path) -> Result<DecoratedConfig> {
        self.validate()?;

        let workspace_root = match &self.workspace_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base_dir.join(root),
            None => base_dir.to_path_buf(),
        };

        let build_output_dir = match &self.build_output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => workspace_root.join(dir),
            None => workspace_root.join(DEFAULT_OUTPUT_DIR),
        };

        let label = Label::parse(self.target.as_deref().unwrap_or_default())?;
        let mut target = Target::new(label);
        if let Some(raw) = self.test_target.as_deref().map(str::trim) {
            if !raw.is_empty() {
                target = target.with_test(Label::parse(raw)?);
            }
        }

        Ok(DecoratedConfig {
            bazel_bin: self
                .bazel_bin
                .clone()
                .unwrap_or_else(|| DEFAULT_BAZEL_BIN.to_string()),
            workspace_root,
            build_output_dir,
            aspects_dir: self
                .aspects_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_ASPECTS_DIR.to_string()),
            target,
        })
    }
}

/// Fully resolved configuration every core component works from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedConfig {
    pub bazel_bin: String,
    pub workspace_root: PathBuf,
    pub build_output_dir: PathBuf,
    pub aspects_dir: String,
    pub target: Target,
}

impl DecoratedConfig {
    /// Bazel package label the aspect scripts live in, e.g. `//build/bazel_aspects`
    pub fn aspects_package(&self) -> String {
        format!("//{}", self.aspects_dir.trim_matches('/'))
    }

    /// Directories an IDE should not index
    pub fn excluded_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.workspace_root.join("bazel-out"),
            self.workspace_root.join(&self.aspects_dir),
            self.build_output_dir.clone(),
        ]
    }
}
