//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mealdesk_log::Format;
use mealdesk_validator::FailurePolicy;

#[derive(Parser)]
#[command(
    name = "mealdesk",
    version,
    about = "Validate Mealdesk API request bodies against rule sets",
    long_about = "Validate a JSON request body against a rule set of `field = \"rule|rule:param\"` \
                  entries and print the API's response envelope.\n\n\
                  Exit status: 0 when the body passes, 2 when it is rejected, 1 on errors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: ./mealdesk.toml when present).
    #[arg(long, value_name = "PATH", env = "MEALDESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `mealdesk_validator=trace`.
    #[arg(long = "log-level", value_name = "FILTER", global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a request body.
    Validate(ValidateArgs),

    /// List every rule with its message template.
    Rules,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Rule set: a TOML or JSON map of field name to rule string.
    #[arg(long, short = 'r', value_name = "FILE")]
    pub rules: PathBuf,

    /// Request body (JSON).
    #[arg(long, short = 'p', value_name = "FILE")]
    pub payload: PathBuf,

    /// Records for `exists`/`unique`: a JSON or TOML map of collection to rows.
    #[arg(long, value_name = "FILE")]
    pub records: Option<PathBuf>,

    /// Stop at the first failure or report the first failure of every field.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Validate the body as-is, without trimming strings or dropping
    /// undeclared fields.
    #[arg(long)]
    pub raw: bool,
}

/// CLI failure policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    StopOnFirst,
    FirstPerField,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::StopOnFirst => Self::StopOnFirst,
            PolicyArg::FirstPerField => Self::FirstPerField,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for Format {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
