//! Error types for the CLI runtime and operation handlers.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::selection::SelectionRequiredError;
use crate::telemetry::TelemetryError;

/// Errors raised while an operation handler runs.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No targeting selector was supplied.
    #[error(transparent)]
    Selection(#[from] SelectionRequiredError),
    /// The forwarded arguments did not match the handler's surface.
    #[error("{0}")]
    InvalidArguments(clap::Error),
    /// The dispatcher selected an operation whose handler is not registered.
    #[error("no handler registered as '{handler}'")]
    NotRegistered {
        /// Handler identifier that was looked up.
        handler: String,
    },
    /// The handler report could not be serialised.
    #[error("failed to serialise handler report: {0}")]
    Serialise(#[source] serde_json::Error),
    /// The handler report could not be written.
    #[error("failed to write handler report: {0}")]
    Write(#[source] io::Error),
}

impl HandlerError {
    /// Creates a not-registered error.
    #[must_use]
    pub fn not_registered(handler: impl Into<String>) -> Self {
        Self::NotRegistered {
            handler: handler.into(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl AppError {
    /// Returns true for `--help` and `--version` requests, which clap reports
    /// as errors but which are not failures.
    pub(crate) fn is_informational(&self) -> bool {
        match self {
            Self::CliUsage(error) | Self::Handler(HandlerError::InvalidArguments(error)) => {
                matches!(
                    error.kind(),
                    clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
                )
            }
            _ => false,
        }
    }
}
