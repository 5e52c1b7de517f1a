//! CLI argument definitions for the `es` command.
//!
//! This module defines the command-line surface used by both the runtime
//! parser and the build script for manpage generation. The operation flags
//! are generated from [`OperationName::ALL`] so the table stays the single
//! source of truth for flag names and help text.

use clap::{Arg, ArgAction, Command, CommandFactory, Parser, ValueEnum};

use crate::operation::OperationName;

/// Output format selection for handler reports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit one JSON document per invocation.
    Json,
}

/// Global arguments of the `es` command.
///
/// Operation flags are attached by [`command`] rather than declared here.
#[derive(Parser, Debug)]
#[command(
    name = "es",
    about = "Search index management: routes an operation to its handler",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Controls how handler reports are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Arguments forwarded unchanged to the selected operation handler.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) arguments: Vec<String>,
}

/// Builds the complete command, including one flag per operation.
pub(crate) fn command() -> Command {
    OperationName::ALL
        .into_iter()
        .fold(Cli::command(), |command, operation| {
            command.arg(
                Arg::new(operation.as_str())
                    .long(operation.as_str())
                    .action(ArgAction::SetTrue)
                    .help(operation.description()),
            )
        })
}
