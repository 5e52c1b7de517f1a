//! Routing of operation flags to operation handlers.
//!
//! The dispatcher scans [`OperationName::ALL`] in order and runs the handler of
//! the first operation whose flag is present, forwarding the passthrough
//! arguments unchanged. Handlers are looked up by identifier
//! (`es_<operation>`). When no flag is present nothing runs and no error is
//! raised.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use tracing::debug;

use crate::errors::HandlerError;
use crate::handlers::PlanHandler;
use crate::operation::OperationName;
use crate::output::ResolvedOutputFormat;
use crate::selection::WarningSink;

/// Tracing target for dispatch decisions.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::dispatch");

/// Operation flags present on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFlags {
    present: BTreeSet<OperationName>,
}

impl OperationFlags {
    /// Creates an empty flag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `operation` as requested.
    #[must_use]
    pub fn with(mut self, operation: OperationName) -> Self {
        self.present.insert(operation);
        self
    }

    /// Returns whether the flag for `operation` is present.
    #[must_use]
    pub fn contains(&self, operation: OperationName) -> bool {
        self.present.contains(&operation)
    }

    /// Returns the first requested operation in canonical order.
    #[must_use]
    pub fn first(&self) -> Option<OperationName> {
        OperationName::ALL
            .into_iter()
            .find(|operation| self.contains(*operation))
    }
}

impl FromIterator<OperationName> for OperationFlags {
    fn from_iter<I: IntoIterator<Item = OperationName>>(iter: I) -> Self {
        Self {
            present: iter.into_iter().collect(),
        }
    }
}

/// Arguments forwarded verbatim to the selected handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationParams {
    arguments: Vec<String>,
}

impl OperationParams {
    /// Wraps the forwarded arguments.
    #[must_use]
    pub const fn new(arguments: Vec<String>) -> Self {
        Self { arguments }
    }

    /// Returns the forwarded arguments in their original order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// Streams and collaborators available to a running handler.
pub struct HandlerContext<'a> {
    /// Destination for the handler report.
    pub stdout: &'a mut dyn Write,
    /// Channel for selection warnings.
    pub warnings: &'a dyn WarningSink,
    /// Format of the handler report.
    pub output: ResolvedOutputFormat,
}

impl fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Performs one operation.
pub trait OperationHandler {
    /// Runs the operation with the forwarded arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the arguments are invalid or the
    /// operation fails.
    fn handle(
        &self,
        params: &OperationParams,
        context: &mut HandlerContext<'_>,
    ) -> Result<ExitCode, HandlerError>;
}

impl<F> OperationHandler for F
where
    F: Fn(&OperationParams, &mut HandlerContext<'_>) -> Result<ExitCode, HandlerError>,
{
    fn handle(
        &self,
        params: &OperationParams,
        context: &mut HandlerContext<'_>,
    ) -> Result<ExitCode, HandlerError> {
        self(params, context)
    }
}

/// Handlers keyed by identifier.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn OperationHandler>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &names)
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding a [`PlanHandler`] for every operation.
    #[must_use]
    pub fn with_plan_handlers() -> Self {
        OperationName::ALL
            .into_iter()
            .fold(Self::new(), |registry, operation| {
                registry.register(operation, PlanHandler::new(operation))
            })
    }

    /// Registers `handler` under the identifier of `operation`, replacing any
    /// previous registration.
    #[must_use]
    pub fn register<H>(mut self, operation: OperationName, handler: H) -> Self
    where
        H: OperationHandler + 'static,
    {
        self.handlers
            .insert(operation.handler_name(), Box::new(handler));
        self
    }

    /// Looks up a handler by identifier.
    #[must_use]
    pub fn get(&self, handler: &str) -> Option<&dyn OperationHandler> {
        self.handlers.get(handler).map(|boxed| boxed.as_ref())
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// A handler ran and returned `exit`.
    Handled {
        /// The operation that was dispatched.
        operation: OperationName,
        /// The handler's exit status.
        exit: ExitCode,
    },
    /// No operation flag was present.
    NoOperation,
}

/// Routes operation flags to registered handlers.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    #[must_use]
    pub const fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Runs the handler of the first requested operation.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::NotRegistered`] when the selected operation has
    /// no handler, and otherwise whatever the handler returns.
    pub fn dispatch(
        &self,
        flags: &OperationFlags,
        params: &OperationParams,
        context: &mut HandlerContext<'_>,
    ) -> Result<Dispatched, HandlerError> {
        let Some(operation) = flags.first() else {
            debug!(target: DISPATCH_TARGET, "no operation flag supplied");
            return Ok(Dispatched::NoOperation);
        };

        let handler_name = operation.handler_name();
        debug!(
            target: DISPATCH_TARGET,
            operation = operation.as_str(),
            handler = handler_name.as_str(),
            arguments = params.arguments().len(),
            "dispatching operation"
        );

        let handler = self
            .registry
            .get(&handler_name)
            .ok_or_else(|| HandlerError::not_registered(handler_name.as_str()))?;
        let exit = handler.handle(params, context)?;
        Ok(Dispatched::Handled { operation, exit })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rstest::rstest;

    use super::*;
    use crate::selection::RecordingWarningSink;

    type CallLog = Rc<RefCell<Vec<(OperationName, Vec<String>)>>>;

    fn handler<F>(function: F) -> F
    where
        F: Fn(&OperationParams, &mut HandlerContext<'_>) -> Result<ExitCode, HandlerError>,
    {
        function
    }

    fn recording_registry(log: &CallLog) -> HandlerRegistry {
        OperationName::ALL
            .into_iter()
            .fold(HandlerRegistry::new(), |registry, operation| {
                let calls = Rc::clone(log);
                registry.register(
                    operation,
                    handler(move |params, _context| {
                        calls
                            .borrow_mut()
                            .push((operation, params.arguments().to_vec()));
                        Ok(ExitCode::SUCCESS)
                    }),
                )
            })
    }

    fn dispatch_with(
        dispatcher: &Dispatcher,
        flags: &OperationFlags,
        params: &OperationParams,
    ) -> Result<Dispatched, HandlerError> {
        let sink = RecordingWarningSink::new();
        let mut stdout = Vec::new();
        let mut context = HandlerContext {
            stdout: &mut stdout,
            warnings: &sink,
            output: ResolvedOutputFormat::Json,
        };
        dispatcher.dispatch(flags, params, &mut context)
    }

    #[test]
    fn earlier_operation_wins_when_several_flags_are_set() {
        let log = CallLog::default();
        let dispatcher = Dispatcher::new(recording_registry(&log));
        let flags = OperationFlags::new()
            .with(OperationName::Update)
            .with(OperationName::Create);

        let outcome = dispatch_with(&dispatcher, &flags, &OperationParams::default())
            .expect("dispatch succeeds");

        assert_eq!(
            outcome,
            Dispatched::Handled {
                operation: OperationName::Create,
                exit: ExitCode::SUCCESS,
            }
        );
        let calls = log.borrow();
        assert_eq!(calls.len(), 1, "exactly one handler runs");
        assert_eq!(calls[0].0, OperationName::Create);
    }

    #[test]
    fn no_flags_is_a_silent_no_op() {
        let log = CallLog::default();
        let dispatcher = Dispatcher::new(recording_registry(&log));

        let outcome = dispatch_with(&dispatcher, &OperationFlags::new(), &OperationParams::default())
            .expect("no-op is not an error");

        assert_eq!(outcome, Dispatched::NoOperation);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn parameters_are_forwarded_unchanged() {
        let log = CallLog::default();
        let dispatcher = Dispatcher::new(recording_registry(&log));
        let arguments = vec![
            String::from("products"),
            String::from("--older"),
            String::from("products"),
        ];

        dispatch_with(
            &dispatcher,
            &OperationFlags::new().with(OperationName::Drop),
            &OperationParams::new(arguments.clone()),
        )
        .expect("dispatch succeeds");

        assert_eq!(log.borrow()[0], (OperationName::Drop, arguments));
    }

    #[rstest]
    #[case(OperationName::List)]
    #[case(OperationName::Create)]
    #[case(OperationName::Activate)]
    #[case(OperationName::Update)]
    #[case(OperationName::Deactivate)]
    #[case(OperationName::Clear)]
    #[case(OperationName::Drop)]
    #[case(OperationName::DangerousReset)]
    fn each_flag_reaches_its_own_handler(#[case] operation: OperationName) {
        let log = CallLog::default();
        let dispatcher = Dispatcher::new(recording_registry(&log));

        dispatch_with(
            &dispatcher,
            &OperationFlags::new().with(operation),
            &OperationParams::default(),
        )
        .expect("dispatch succeeds");

        assert_eq!(log.borrow()[0].0, operation);
    }

    #[test]
    fn handler_exit_status_is_propagated() {
        let registry = HandlerRegistry::new().register(
            OperationName::Clear,
            handler(|_params, _context| Ok(ExitCode::from(3))),
        );
        let dispatcher = Dispatcher::new(registry);

        let outcome = dispatch_with(
            &dispatcher,
            &OperationFlags::new().with(OperationName::Clear),
            &OperationParams::default(),
        )
        .expect("dispatch succeeds");

        assert_eq!(
            outcome,
            Dispatched::Handled {
                operation: OperationName::Clear,
                exit: ExitCode::from(3),
            }
        );
    }

    #[test]
    fn handler_errors_are_propagated() {
        let registry = HandlerRegistry::new().register(
            OperationName::Activate,
            handler(|_params, _context| Err(HandlerError::not_registered("es_backend"))),
        );
        let dispatcher = Dispatcher::new(registry);

        let error = dispatch_with(
            &dispatcher,
            &OperationFlags::new().with(OperationName::Activate),
            &OperationParams::default(),
        )
        .expect_err("handler error surfaces");

        assert!(matches!(
            error,
            HandlerError::NotRegistered { ref handler } if handler == "es_backend"
        ));
    }

    #[test]
    fn missing_handler_is_reported_by_identifier() {
        let dispatcher = Dispatcher::new(HandlerRegistry::new());

        let error = dispatch_with(
            &dispatcher,
            &OperationFlags::new().with(OperationName::DangerousReset),
            &OperationParams::default(),
        )
        .expect_err("unregistered handler fails");

        assert_eq!(error.to_string(), "no handler registered as 'es_dangerous_reset'");
    }

    #[test]
    fn plan_registry_covers_every_operation() {
        let registry = HandlerRegistry::with_plan_handlers();
        for operation in OperationName::ALL {
            assert!(
                registry.get(&operation.handler_name()).is_some(),
                "{operation} has no handler"
            );
        }
    }

    #[test]
    fn flags_collect_from_iterator() {
        let flags: OperationFlags = [OperationName::Drop, OperationName::List].into_iter().collect();
        assert!(flags.contains(OperationName::Drop));
        assert!(!flags.contains(OperationName::Clear));
        assert_eq!(flags.first(), Some(OperationName::List));
    }
}
