use anyhow::{Context, Result};

use bazel_leaf_core::{AspectQuery, AspectRunner};

use crate::cli::ConfigArgs;
use crate::config::load_config;

pub fn kind_command(args: &ConfigArgs, label: Option<&str>) -> Result<()> {
    let config = load_config(args, label)?;
    let target = &config.target.label;

    let kind = AspectRunner::from_config(&config)
        .rule_kind(target)
        .with_context(|| format!("Failed to query the rule kind of {target}"))?;

    match kind {
        Some(kind) => println!("{kind}"),
        None => println!("<unknown>"),
    }
    Ok(())
}
