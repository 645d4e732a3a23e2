//! Path resolution against the Bazel workspace root
//!
//! Bazel reports source files relative to its workspace root, which is not
//! necessarily the directory the host project lives in.

use std::path::{Path, PathBuf};

use crate::config::DecoratedConfig;

pub trait WorkspacePathResolver {
    /// Directory holding the WORKSPACE / MODULE.bazel file
    fn workspace_root(&self) -> &Path;

    /// Absolute form of a path reported by bazel
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root().join(path)
        }
    }
}

impl WorkspacePathResolver for Path {
    fn workspace_root(&self) -> &Path {
        self
    }
}

impl WorkspacePathResolver for PathBuf {
    fn workspace_root(&self) -> &Path {
        self.as_path()
    }
}

impl WorkspacePathResolver for DecoratedConfig {
    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}
