use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use bazel_leaf_core::{
    AspectRunner, BuildCoordinator, ConfigureOutcome, DecoratedConfig, InMemoryHost,
};

use crate::cli::ConfigArgs;
use crate::config::load_config;

#[derive(Serialize)]
struct ConfigureReport<'a> {
    outcome: &'a ConfigureOutcome,
    host: &'a InMemoryHost,
}

/// Run the coordinator for the configured targets against a fresh in-memory host
pub(crate) fn configure_host(config: &DecoratedConfig) -> Result<(ConfigureOutcome, InMemoryHost)> {
    let runner = AspectRunner::from_config(config);
    let mut host = InMemoryHost::new();

    debug!(
        "Configuring {} in {}",
        config.target.label,
        config.workspace_root.display()
    );
    let outcome = BuildCoordinator::new(config, &runner)
        .configure(&mut host)
        .with_context(|| format!("Failed to configure {}", config.target.label))?;

    Ok((outcome, host))
}

pub fn configure_command(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args, None)?;
    let (outcome, host) = configure_host(&config)?;

    let report = ConfigureReport {
        outcome: &outcome,
        host: &host,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize host model")?;
    println!("{json}");
    Ok(())
}
