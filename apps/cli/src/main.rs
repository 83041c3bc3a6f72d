//! Mealdesk request validation CLI.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod commands;
mod settings;

use crate::cli::{Cli, Command};
use crate::commands::{Outcome, run_rules, run_validate};
use crate::settings::{Overrides, Settings};

/// Exit status of a rejected request body.
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let policy = match &cli.command {
        Command::Validate(args) => args.policy.map(Into::into),
        Command::Rules => None,
    };
    let overrides = Overrides {
        policy,
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.map(Into::into),
    };
    let settings = Settings::load(cli.config.as_deref(), overrides)?;
    let _log_guard =
        mealdesk_log::init_with(settings.log_config()).context("failed to initialise logging")?;
    tracing::debug!(policy = %settings.policy, "settings loaded");

    match cli.command {
        Command::Validate(args) => match run_validate(&args, &settings)? {
            Outcome::Passed => {
                println!("{}", serde_json::json!({ "success": true }));
                Ok(ExitCode::SUCCESS)
            }
            Outcome::Rejected(envelope) => {
                println!("{}", serde_json::to_string(&envelope)?);
                Ok(ExitCode::from(EXIT_REJECTED))
            }
        },
        Command::Rules => {
            run_rules(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
