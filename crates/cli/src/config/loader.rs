use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use bazel_leaf_core::{BazelLeafConfig, DecoratedConfig};

use crate::cli::ConfigArgs;

/// Absolute location of the configuration file named on the command line
pub fn config_path(args: &ConfigArgs) -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(&args.config))
}

/// Load the config file (if present), layer the command-line overrides on top
/// and resolve it. `label` replaces the configured target when given.
pub fn load_config(args: &ConfigArgs, label: Option<&str>) -> Result<DecoratedConfig> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let path = cwd.join(&args.config);

    let mut config = if path.is_file() {
        BazelLeafConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        debug!("No config file at {}, using command-line settings only", path.display());
        BazelLeafConfig::default()
    };

    let mut overrides = args.overrides();
    // Paths given on the command line are relative to where we were invoked
    overrides.workspace_root = overrides.workspace_root.map(|root| cwd.join(root));
    config.merge_with(overrides);

    if let Some(label) = label {
        config.target = Some(label.to_string());
    }

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
    debug!("Resolving configuration against {}", base_dir.display());
    config
        .decorate(&base_dir)
        .context("Invalid bazel-leaf configuration")
}
