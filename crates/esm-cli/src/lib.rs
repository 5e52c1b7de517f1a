//! Command-line runtime for the `es` index-management tool.
//!
//! An invocation names one lifecycle operation by flag (`--list`, `--drop`,
//! ...) and forwards the remaining tokens to that operation's handler. The
//! [`Dispatcher`] picks the handler; each handler normalises its targeting
//! arguments through the [`Selector`] before acting on any index.
//!
//! The runtime can be driven from the binary entrypoint or from tests, where
//! configuration loading, the handler registry, and the warning sink are
//! substituted.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

mod cli;
mod command;
mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod help;
pub mod operation;
pub mod output;
pub mod selection;
pub mod telemetry;

use command::Invocation;
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub use dispatch::{
    Dispatched, Dispatcher, HandlerContext, HandlerRegistry, OperationFlags, OperationHandler,
    OperationParams,
};
pub(crate) use errors::AppError;
pub use errors::HandlerError;
pub use handlers::{PlanHandler, SelectionPlan, selector_profile};
pub use help::{HelpMessageProvider, HelpMessages};
pub use operation::OperationName;
pub use output::{OutputFormat, ResolvedOutputFormat};
pub use selection::{
    ExtraSelector, SelectionRequest, SelectionRequiredError, SelectionResult, SelectionWarning,
    Selector, TracingWarningSink, WarningSink,
};

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_terminal_status(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
    dispatcher: &'a Dispatcher,
    warnings: &'a dyn WarningSink,
    telemetry: bool,
}

impl<'a, 'io, W, E, L> CliRunner<'a, 'io, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(
        io: &'a mut IoStreams<'io, W, E>,
        loader: &'a L,
        dispatcher: &'a Dispatcher,
        warnings: &'a dyn WarningSink,
    ) -> Self {
        Self {
            io,
            loader,
            dispatcher,
            warnings,
            telemetry: true,
        }
    }

    #[cfg(test)]
    fn without_telemetry(mut self) -> Self {
        self.telemetry = false;
        self
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match self.execute(&args) {
            Ok(exit_code) => exit_code,
            Err(error) if error.is_informational() => {
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn execute(&mut self, args: &[OsString]) -> Result<ExitCode, AppError> {
        let split = split_config_arguments(args);
        let invocation =
            Invocation::parse(split.command_arguments).map_err(AppError::CliUsage)?;
        let config = self.loader.load(&split.config_arguments)?;
        if self.telemetry {
            telemetry::initialise(&config)?;
        }

        let output = invocation.output.resolve(self.io.stdout_is_terminal());
        let mut context = HandlerContext {
            stdout: &mut *self.io.stdout,
            warnings: self.warnings,
            output,
        };
        let dispatched =
            self.dispatcher
                .dispatch(&invocation.flags, &invocation.params, &mut context)?;
        Ok(match dispatched {
            Dispatched::Handled { exit, .. } => exit,
            Dispatched::NoOperation => ExitCode::SUCCESS,
        })
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Every operation is served by its [`PlanHandler`], and selection warnings
/// are logged through `tracing`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    let dispatcher = Dispatcher::new(HandlerRegistry::with_plan_handlers());
    CliRunner::new(&mut io, &OrthoConfigLoader, &dispatcher, &TracingWarningSink).run(args)
}

/// Runs the CLI with substituted collaborators and telemetry disabled.
#[cfg(test)]
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    dispatcher: &Dispatcher,
    warnings: &dyn WarningSink,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader, dispatcher, warnings)
        .without_telemetry()
        .run(args)
}
