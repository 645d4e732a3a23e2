use anyhow::{Context, Result};

use bazel_leaf_core::{AspectQuery, AspectRunner};

use crate::cli::ConfigArgs;
use crate::config::load_config;

pub fn deps_command(args: &ConfigArgs, label: Option<&str>) -> Result<()> {
    let config = load_config(args, label)?;
    let target = &config.target.label;

    let deps = AspectRunner::from_config(&config)
        .dependencies(target)
        .with_context(|| format!("Failed to query the dependencies of {target}"))?;

    for dep in deps {
        println!("{dep}");
    }
    Ok(())
}
