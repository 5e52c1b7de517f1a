//! Reporting channels for selection warnings.

use std::cell::RefCell;

use tracing::warn;

use super::SelectionWarning;

/// Tracing target for selection warnings.
pub const SELECTION_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::selection");

/// Receives warnings emitted while normalising a selection.
pub trait WarningSink {
    /// Reports a recoverable selection conflict.
    fn warn(&self, warning: &SelectionWarning);
}

/// Forwards warnings to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn warn(&self, warning: &SelectionWarning) {
        match warning {
            SelectionWarning::AllWithIndexes { indexes } => warn!(
                target: SELECTION_TARGET,
                indexes = %indexes.join(", "),
                "{warning}"
            ),
        }
    }
}

/// Keeps warnings in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingWarningSink {
    warnings: RefCell<Vec<SelectionWarning>>,
}

impl RecordingWarningSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> Vec<SelectionWarning> {
        self.warnings.borrow().clone()
    }

    /// Removes and returns the recorded warnings.
    pub fn take(&self) -> Vec<SelectionWarning> {
        self.warnings.take()
    }
}

impl WarningSink for RecordingWarningSink {
    fn warn(&self, warning: &SelectionWarning) {
        self.warnings.borrow_mut().push(warning.clone());
    }
}
