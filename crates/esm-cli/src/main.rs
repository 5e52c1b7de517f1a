//! CLI entrypoint for the `es` index-management command.
//!
//! The binary delegates to [`esm_cli::run`], which loads configuration,
//! dispatches the requested operation, and reports its selection plan.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    esm_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
