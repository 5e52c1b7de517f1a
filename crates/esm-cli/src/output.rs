//! Output format resolution for handler reports.

pub use crate::cli::OutputFormat;

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable report lines.
    #[default]
    Human,
    /// One JSON document per report.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}
