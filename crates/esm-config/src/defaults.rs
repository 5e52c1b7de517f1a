//! Built-in configuration defaults.

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
///
/// Warnings stay visible so selection conflicts reach the operator.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
