mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use std::panic::{self, AssertUnwindSafe};

/// Reported when a command panics instead of returning an error
const INTERNAL_ERROR: &str = "INTERNAL: Internal error";

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Install(args) => commands::install::execute_install(args),
        Commands::Resolve { tool, json } => commands::resolve::execute_resolve(tool, json),
        Commands::Tools { config, json } => commands::tools::execute_tools(config, json),
    }
}

/// Message to fail the job with, if the command did not succeed
fn failure_message(outcome: std::thread::Result<anyhow::Result<()>>) -> Option<String> {
    match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(INTERNAL_ERROR.to_string()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    panic::set_hook(Box::new(|info| {
        tracing::error!("{}", info);
    }));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(cli)));
    let Some(message) = failure_message(outcome) else {
        return;
    };

    if output::print_failure(&message).is_err() {
        eprintln!("Error: {}", message);
    }
    std::process::exit(1);
}
