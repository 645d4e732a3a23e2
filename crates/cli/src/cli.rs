use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bazel_leaf_core::{config::CONFIG_FILE_NAME, BazelLeafConfig};

use crate::commands::{
    build_command, configure_command, deps_command, init_command, kind_command, roots_command,
};

#[derive(Parser, Debug)]
#[command(name = "bazel-leaf")]
#[command(version, about = "Bridge a Bazel target into a host build model", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the configuration comes from, and the fields that can be overridden
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file
    #[arg(long = "config", global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Main Bazel target (e.g. //java/com/acme:core)
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Test target configured next to the main target
    #[arg(long, global = true)]
    pub test_target: Option<String>,

    /// Bazel binary to invoke
    #[arg(long, global = true)]
    pub bazel_bin: Option<String>,

    /// Directory holding the WORKSPACE / MODULE.bazel file
    #[arg(long, global = true)]
    pub workspace_root: Option<PathBuf>,
}

impl ConfigArgs {
    /// The command-line layer merged over the config file
    pub fn overrides(&self) -> BazelLeafConfig {
        BazelLeafConfig {
            bazel_bin: self.bazel_bin.clone(),
            workspace_root: self.workspace_root.clone(),
            target: self.target.clone(),
            test_target: self.test_target.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the target's tasks, artifacts and source roots; print the model as JSON
    #[command(visible_alias = "c")]
    Configure,
    /// Configure, then run the build task
    #[command(visible_alias = "b")]
    Build {
        /// Also run the test target's task
        #[arg(long)]
        with_tests: bool,
    },
    /// Print the rule kind of a target
    Kind {
        /// Target label (defaults to the configured target)
        label: Option<String>,
    },
    /// Print the source roots of a target
    Roots {
        /// Target label (defaults to the configured target)
        label: Option<String>,

        /// Show the namespace and root of every source file
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the direct dependencies of a target
    Deps {
        /// Target label (defaults to the configured target)
        label: Option<String>,
    },
    /// Write a starter configuration file
    Init {
        /// Directory to write the configuration into (defaults to current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Force overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let config = &self.config;
        match self.command {
            Commands::Configure => configure_command(config),
            Commands::Build { with_tests } => build_command(config, with_tests),
            Commands::Kind { label } => kind_command(config, label.as_deref()),
            Commands::Roots { label, verbose } => roots_command(config, label.as_deref(), verbose),
            Commands::Deps { label } => deps_command(config, label.as_deref()),
            Commands::Init { cwd, force } => init_command(config, cwd.as_deref(), force),
        }
    }
}
