//! Test support utilities for `es` runtime coverage.
//!
//! Supplies a world that runs the CLI in-process with a fixed configuration,
//! captures both output streams, and records selection warnings so step
//! definitions and unit tests stay focused on their assertions.

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use esm_config::Config;
use rstest::fixture;
use serde_json::Value;

use crate::selection::{RecordingWarningSink, SelectionWarning};
use crate::{AppError, ConfigLoader, Dispatcher, HandlerRegistry, IoStreams, run_with_loader};

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

pub(super) struct TestWorld {
    pub config: Config,
    pub dispatcher: Dispatcher,
    pub warnings: RecordingWarningSink,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub stdout_is_terminal: bool,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            config: Config::default(),
            dispatcher: Dispatcher::new(HandlerRegistry::with_plan_handlers()),
            warnings: RecordingWarningSink::new(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
            stdout_is_terminal: false,
        }
    }
}

impl TestWorld {
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            ..Self::default()
        }
    }

    pub fn run(&mut self, command: &str) {
        self.stdout.clear();
        self.stderr.clear();
        let _ = self.warnings.take();
        let args = build_args(command);
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::with_terminal_status(
            &mut self.stdout,
            &mut self.stderr,
            self.stdout_is_terminal,
        );
        let exit = run_with_loader(args, &mut io, &loader, &self.dispatcher, &self.warnings);
        self.exit_code = Some(exit);
    }

    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("stdout is not utf8")
    }

    pub fn stderr_text(&self) -> Result<String> {
        String::from_utf8(self.stderr.clone()).context("stderr is not utf8")
    }

    pub fn plan(&self) -> Result<Value> {
        let stdout = self.stdout_text()?;
        serde_json::from_str(stdout.trim_end()).context("stdout is not a json plan")
    }

    pub fn recorded_warnings(&self) -> Vec<SelectionWarning> {
        self.warnings.warnings()
    }

    pub fn assert_exit_code(&self, expected: u8) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::from(expected),
            "expected exit code {expected}, got {exit:?}"
        );
        Ok(())
    }

    pub fn assert_failure(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::FAILURE,
            "expected failure exit code, got {exit:?}"
        );
        Ok(())
    }
}

/// Splits a scenario command into argument tokens after the binary name.
pub(super) fn build_args(command: &str) -> Vec<OsString> {
    let mut args = vec![OsString::from("es")];
    args.extend(
        command
            .trim()
            .trim_matches('"')
            .split_whitespace()
            .map(OsString::from),
    );
    args
}

/// Renders a plan field the way scenarios spell it.
pub(super) fn render_field(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_field)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
