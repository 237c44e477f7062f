//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, ConfigFlags, OutputFlags};
use crate::commands;
use crate::domain::{ConfigOverrides, Environment};

/// Deploy and tear down the ML platform CloudFormation stack
#[derive(Parser, Debug)]
#[command(name = "stackctl", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project name (first half of the stack name)
    #[arg(long, global = true, env = "STACKCTL_PROJECT")]
    pub project: Option<String>,

    /// Target environment
    #[arg(long, global = true, env = "STACKCTL_ENVIRONMENT")]
    pub environment: Option<Environment>,

    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Config file [default: ./stackctl.yaml]
    #[arg(long, global = true, env = "STACKCTL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or update the stack (default)
    Deploy(commands::deploy::DeployArgs),

    /// Delete the stack and, optionally, its key pair
    Cleanup,

    /// Show stack name, status, and creation time
    Status,

    /// Show every stack output
    Outputs,

    /// Check the bundled template
    Validate(commands::validate::ValidateArgs),

    /// Show version
    Version,
}

impl Cli {
    /// The subcommand to run; no subcommand means `deploy`.
    #[must_use]
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Deploy(commands::deploy::DeployArgs::default()))
    }

    fn flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
            },
            behaviour: BehaviourFlags { yes: self.yes },
            config: ConfigFlags {
                path: self.config.clone(),
                overrides: ConfigOverrides {
                    project: self.project.clone(),
                    environment: self.environment,
                    region: self.region.clone(),
                },
            },
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let command = self.resolved_command();
        if command == Command::Version {
            return commands::version::run(self.json);
        }

        let app = AppContext::new(&self.flags())?;
        match command {
            Command::Deploy(args) => commands::deploy::run(&app, &args).await,
            Command::Cleanup => commands::cleanup::run(&app).await,
            Command::Status => commands::status::run(&app).await,
            Command::Outputs => commands::outputs::run(&app).await,
            Command::Validate(args) => commands::validate::run(&app, &args).await,
            Command::Version => commands::version::run(self.json),
        }
    }
}
