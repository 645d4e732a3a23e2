use anyhow::{Context, Result};
use std::{env, path::Path};
use tracing::info;

use bazel_leaf_core::config::CONFIG_FILE_NAME;

use crate::cli::ConfigArgs;
use crate::config::{config_path, starter_config};

pub fn init_command(args: &ConfigArgs, cwd: Option<&Path>, force: bool) -> Result<()> {
    let path = match cwd {
        Some(dir) => env::current_dir()
            .context("Failed to get current directory")?
            .join(dir)
            .join(CONFIG_FILE_NAME),
        None => config_path(args)?,
    };

    if path.exists() && !force {
        println!("❌ Config already exists at: {}", path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut config = starter_config(args.target.as_deref(), args.test_target.as_deref());
    if args.bazel_bin.is_some() {
        config.bazel_bin = args.bazel_bin.clone();
    }
    config
        .save_to_file(&path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    info!("Wrote {}", path.display());
    println!("✅ Created config: {}", path.display());
    if args.target.is_none() {
        println!("\n📌 Set \"target\" to the Bazel label you want to work on");
    }
    Ok(())
}
