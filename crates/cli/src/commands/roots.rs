use anyhow::{Context, Result};
use std::collections::BTreeSet;

use bazel_leaf_core::{AspectQuery, AspectRunner, SourceRootResolver};

use crate::cli::ConfigArgs;
use crate::config::load_config;
use crate::display::print_source_entries;

pub fn roots_command(args: &ConfigArgs, label: Option<&str>, verbose: bool) -> Result<()> {
    let config = load_config(args, label)?;
    let target = &config.target.label;

    let files = AspectRunner::from_config(&config)
        .source_files(target)
        .with_context(|| format!("Failed to list source files of {target}"))?;

    let entries = SourceRootResolver::resolve_entries(&files, &config)
        .with_context(|| format!("Failed to infer source roots of {target}"))?;

    if verbose {
        print_source_entries(&entries);
        return Ok(());
    }

    let roots: BTreeSet<_> = entries.into_iter().map(|entry| entry.root).collect();
    for root in roots {
        println!("{}", root.display());
    }
    Ok(())
}
