//! Translation of the parsed command line into a dispatchable invocation.

use std::ffi::OsString;

use clap::FromArgMatches;

use crate::cli::{Cli, OutputFormat, command};
use crate::dispatch::{OperationFlags, OperationParams};
use crate::operation::OperationName;

/// One parsed `es` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) flags: OperationFlags,
    pub(crate) params: OperationParams,
    pub(crate) output: OutputFormat,
}

impl Invocation {
    /// Parses `args`, whose first element is the binary name.
    ///
    /// Operation flags are recognised wherever they appear. Every other token
    /// after `--output` is forwarded to the handler in its original order.
    pub(crate) fn parse<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        let (flags, remaining) = extract_operation_flags(args);
        let matches = command().try_get_matches_from(remaining)?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok(Self {
            flags,
            params: OperationParams::new(cli.arguments),
            output: cli.output,
        })
    }
}

/// Pulls every `--<operation>` token out of `args`.
fn extract_operation_flags<I>(args: I) -> (OperationFlags, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut flags = OperationFlags::new();
    let mut remaining = Vec::new();
    for argument in args {
        match argument.to_str().and_then(operation_flag) {
            Some(operation) => flags = flags.with(operation),
            None => remaining.push(argument),
        }
    }
    (flags, remaining)
}

fn operation_flag(token: &str) -> Option<OperationName> {
    token
        .strip_prefix("--")
        .and_then(OperationName::from_name)
}
