//! Shared configuration for the `es` index-management command.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a
//! configuration file (`--config-path` or `ESM_CONFIG_PATH`), then `ESM_*`
//! environment variables, then command-line flags. The CLI only consumes the
//! logging settings; selection and dispatch take no configuration.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter_string, default_log_format};
pub use logging::LogFormat;

/// Resolved configuration for an `es` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ESM")]
pub struct Config {
    /// Tracing filter expression (for example `warn` or `esm_cli=debug`).
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log events written to stderr.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
