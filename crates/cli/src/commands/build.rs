use anyhow::{Context, Result};
use tracing::{info, warn};

use bazel_leaf_core::{ArtifactPublisher, TaskRegistry};

use crate::cli::ConfigArgs;
use crate::commands::configure::configure_host;
use crate::config::load_config;
use crate::display::{print_artifacts, print_outcome_summary};

pub fn build_command(args: &ConfigArgs, with_tests: bool) -> Result<()> {
    let config = load_config(args, None)?;
    let (outcome, mut host) = configure_host(&config)?;

    print_outcome_summary(&outcome.main);
    let mut tasks = vec![outcome.main.task.clone()];

    if with_tests {
        match &outcome.test {
            Some(test) => {
                print_outcome_summary(test);
                tasks.push(test.task.clone());
            }
            None => warn!("--with-tests given but no test target is configured"),
        }
    }

    for task in &tasks {
        let command = host
            .task(task)
            .map(|spec| spec.command.to_shell_command())
            .unwrap_or_default();
        info!("Running {}: {}", task, command);
        println!("🚀 {command}");

        host.run_task(task)
            .with_context(|| format!("Task {task} failed"))?;
    }

    print_artifacts(host.artifacts(), &host);
    println!("✅ Done");
    Ok(())
}
