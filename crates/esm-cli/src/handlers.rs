//! Plan handlers.
//!
//! A [`PlanHandler`] stands in for the backend of one operation. It parses the
//! forwarded arguments against the operation's selector surface, normalises
//! them with the [`Selector`], and reports the resulting [`SelectionPlan`]
//! instead of touching any index.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Command;
use serde::Serialize;

use crate::dispatch::{HandlerContext, OperationHandler, OperationParams};
use crate::errors::HandlerError;
use crate::help::{HelpMessageProvider, HelpMessages};
use crate::operation::OperationName;
use crate::output::ResolvedOutputFormat;
use crate::selection::{
    SelectionRequest, SelectionResult, Selector, SelectorFlag, SelectorProfile,
    selector_arguments,
};

const OLDER_REQUIRED: &[SelectorFlag] = &[SelectorFlag::Older];

/// Returns the selector surface of `operation`.
///
/// `None` means the operation accepts no selector and always targets every
/// index.
#[must_use]
pub const fn selector_profile(operation: OperationName) -> Option<SelectorProfile> {
    let profile = match operation {
        OperationName::List => SelectorProfile {
            include_exact: true,
            include_older: true,
            default_all: true,
            extra_required: &[],
        },
        OperationName::Create => SelectorProfile {
            include_exact: false,
            include_older: false,
            default_all: false,
            extra_required: &[],
        },
        OperationName::Activate | OperationName::Update | OperationName::Deactivate => {
            SelectorProfile {
                include_exact: true,
                include_older: false,
                default_all: false,
                extra_required: &[],
            }
        }
        OperationName::Clear | OperationName::Drop => SelectorProfile {
            include_exact: true,
            include_older: true,
            default_all: false,
            extra_required: OLDER_REQUIRED,
        },
        OperationName::DangerousReset => return None,
    };
    Some(profile)
}

/// The normalised selection an operation would act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionPlan {
    /// Operation name as spelled on the command line.
    pub operation: &'static str,
    /// Identifier of the handler that produced the plan.
    pub handler: String,
    /// Index tokens, order and duplicates preserved.
    pub indexes: Vec<String>,
    /// Tokens are fully-qualified version identifiers.
    pub exact: bool,
    /// Every known index is targeted.
    pub all_selected: bool,
    /// Versions older than the active one are targeted.
    pub older: bool,
}

impl SelectionPlan {
    /// Builds the plan for `operation` from a normalised selection.
    #[must_use]
    pub fn new(operation: OperationName, selection: SelectionResult) -> Self {
        let SelectionResult {
            indexes,
            exact,
            all_selected,
            older,
        } = selection;
        Self {
            operation: operation.as_str(),
            handler: operation.handler_name(),
            indexes,
            exact,
            all_selected,
            older,
        }
    }

    /// Writes the plan in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Serialise`] or [`HandlerError::Write`] when the
    /// report cannot be produced.
    pub fn render(
        &self,
        format: ResolvedOutputFormat,
        writer: &mut dyn Write,
    ) -> Result<(), HandlerError> {
        match format {
            ResolvedOutputFormat::Json => {
                serde_json::to_writer(&mut *writer, self).map_err(HandlerError::Serialise)?;
                writer.write_all(b"\n").map_err(HandlerError::Write)?;
            }
            ResolvedOutputFormat::Human => self.write_human(writer).map_err(HandlerError::Write)?,
        }
        writer.flush().map_err(HandlerError::Write)
    }

    fn write_human(&self, writer: &mut dyn Write) -> io::Result<()> {
        let indexes = if self.indexes.is_empty() {
            String::from("(none)")
        } else {
            self.indexes.join(", ")
        };
        writeln!(writer, "operation: {} ({})", self.operation, self.handler)?;
        writeln!(writer, "indexes: {indexes}")?;
        writeln!(writer, "all: {}", self.all_selected)?;
        writeln!(writer, "exact: {}", self.exact)?;
        writeln!(writer, "older: {}", self.older)
    }
}

/// Reports the selection for one operation without executing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanHandler {
    operation: OperationName,
}

impl PlanHandler {
    /// Creates the plan handler for `operation`.
    #[must_use]
    pub const fn new(operation: OperationName) -> Self {
        Self { operation }
    }

    /// Builds the argument parser for the forwarded arguments.
    #[must_use]
    pub fn parser(&self) -> Command {
        let command = Command::new(self.operation.as_str())
            .bin_name(format!("es --{}", self.operation.as_str()))
            .about(self.operation.description())
            .no_binary_name(true);
        match selector_profile(self.operation) {
            Some(profile) => selector_arguments(command, &profile, &self.help_messages()),
            None => command,
        }
    }

    /// Parses and normalises the forwarded arguments.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidArguments`] when the arguments do not
    /// fit the selector surface, and [`HandlerError::Selection`] when no
    /// targeting selector was supplied.
    pub fn plan(
        &self,
        params: &OperationParams,
        context: &HandlerContext<'_>,
    ) -> Result<SelectionPlan, HandlerError> {
        let matches = self
            .parser()
            .try_get_matches_from(params.arguments())
            .map_err(HandlerError::InvalidArguments)?;

        let selection = match selector_profile(self.operation) {
            Some(profile) => {
                let request = SelectionRequest::from_matches(&matches);
                let extras = profile.extra_selectors(&request);
                Selector::new(context.warnings).select(request, &extras)?
            }
            None => SelectionResult {
                all_selected: true,
                ..SelectionResult::default()
            },
        };
        Ok(SelectionPlan::new(self.operation, selection))
    }
}

impl HelpMessageProvider for PlanHandler {
    fn help_messages(&self) -> HelpMessages {
        self.operation.help_messages()
    }
}

impl OperationHandler for PlanHandler {
    fn handle(
        &self,
        params: &OperationParams,
        context: &mut HandlerContext<'_>,
    ) -> Result<ExitCode, HandlerError> {
        let plan = self.plan(params, context)?;
        plan.render(context.output, context.stdout)?;
        Ok(ExitCode::SUCCESS)
    }
}
