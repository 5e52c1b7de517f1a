//! Normalisation of index-targeting selectors.
//!
//! Handlers accept explicit index names, `--all`, `--exact` and `--older`.
//! The [`Selector`] turns those raw inputs into one unambiguous
//! [`SelectionResult`] before the handler touches any index state:
//!
//! - at least one targeting selector (`index`, `all`, or an operation-specific
//!   extra) must be present, otherwise [`SelectionRequiredError`] lists the
//!   eligible selectors in the order they were checked;
//! - `--all` combined with explicit names is a recoverable conflict: a warning
//!   is reported and the explicit names win;
//! - `exact` and `older` are interpretation modifiers and pass through
//!   untouched.
//!
//! Warnings travel through an injected [`WarningSink`], keeping the selector
//! free of ambient logging.

mod arguments;
mod sink;

use std::fmt;

use thiserror::Error;

pub use arguments::{SelectorFlag, SelectorProfile, selector_arguments};
pub use sink::{RecordingWarningSink, SELECTION_TARGET, TracingWarningSink, WarningSink};

/// Selector names that always count toward the "at least one" requirement,
/// in the order they are checked.
pub const BASE_SELECTORS: [&str; 2] = ["index", "all"];

/// Raw targeting input supplied by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Index tokens in the order they were supplied.
    pub indexes: Vec<String>,
    /// Treat tokens as fully-qualified version identifiers.
    pub exact: bool,
    /// Target every known index using its active version.
    pub all: bool,
    /// Target versions older than the active one.
    pub older: bool,
}

impl SelectionRequest {
    /// Creates a request naming the given index tokens.
    #[must_use]
    pub fn with_indexes<I, S>(indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indexes: indexes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Normalised selection consumed by operation handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    /// Index tokens, order and duplicates preserved.
    pub indexes: Vec<String>,
    /// Tokens are fully-qualified version identifiers.
    pub exact: bool,
    /// Every known index is targeted.
    pub all_selected: bool,
    /// Versions older than the active one are targeted.
    pub older: bool,
}

/// An operation-specific selector that satisfies the "at least one" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSelector {
    /// Name reported when no selector was supplied.
    pub name: String,
    /// Whether the operator supplied this selector.
    pub present: bool,
}

impl ExtraSelector {
    /// Creates an extra selector entry.
    #[must_use]
    pub fn new(name: impl Into<String>, present: bool) -> Self {
        Self {
            name: name.into(),
            present,
        }
    }
}

/// No targeting selector was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("At least one of [{}] must be specified", quoted_list(.eligible))]
pub struct SelectionRequiredError {
    /// Selector names that would have satisfied the requirement, in check
    /// order.
    pub eligible: Vec<String>,
}

/// A recoverable selection conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionWarning {
    /// `--all` was combined with explicit index names; the names won.
    AllWithIndexes {
        /// The explicit index names that were kept.
        indexes: Vec<String>,
    },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllWithIndexes { indexes } => {
                let names = indexes.join(", ");
                write!(
                    f,
                    "Received --all along with index names: '{names}'. \
                     The --all has been cancelled; operating on just '{names}'. \
                     To target every index, use --all on its own."
                )
            }
        }
    }
}

/// Validates and normalises selection requests.
///
/// The selector is pure apart from warnings, which are handed to the sink it
/// was built with.
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    sink: &'a dyn WarningSink,
}

impl fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector").finish_non_exhaustive()
    }
}

impl<'a> Selector<'a> {
    /// Creates a selector reporting conflicts to `sink`.
    #[must_use]
    pub fn new(sink: &'a dyn WarningSink) -> Self {
        Self { sink }
    }

    /// Normalises `request`.
    ///
    /// `extra_required` lists operation-specific selectors that also satisfy
    /// the requirement; their names are appended to the error after
    /// [`BASE_SELECTORS`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionRequiredError`] when no index was named, `all` is
    /// unset, and no extra selector is present.
    pub fn select(
        &self,
        request: SelectionRequest,
        extra_required: &[ExtraSelector],
    ) -> Result<SelectionResult, SelectionRequiredError> {
        let satisfied = !request.indexes.is_empty()
            || request.all
            || extra_required.iter().any(|extra| extra.present);
        if !satisfied {
            return Err(SelectionRequiredError {
                eligible: BASE_SELECTORS
                    .iter()
                    .map(|name| (*name).to_owned())
                    .chain(extra_required.iter().map(|extra| extra.name.clone()))
                    .collect(),
            });
        }

        let SelectionRequest {
            indexes,
            exact,
            all,
            older,
        } = request;

        let conflicting = all && !indexes.is_empty();
        if conflicting {
            self.sink.warn(&SelectionWarning::AllWithIndexes {
                indexes: indexes.clone(),
            });
        }

        Ok(SelectionResult {
            indexes,
            exact,
            all_selected: all && !conflicting,
            older,
        })
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
