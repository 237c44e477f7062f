//! stackctl - deploy and tear down the ML platform CloudFormation stack

use clap::Parser;
use stackctl::cli::Cli;
use stackctl::domain::{ConfigError, DeployError, StackError};
use stackctl::logging;
use stackctl::output::json;

/// Machine-readable code for the `--json` error object.
fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<StackError>() {
        e.code()
    } else if let Some(e) = err.downcast_ref::<DeployError>() {
        e.code()
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "INVALID_CONFIG"
    } else {
        "ERROR"
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let json = cli.json;

    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        match json::format_error(&format!("{e:#}"), error_code(&e)) {
            Ok(doc) if json => println!("{doc}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
