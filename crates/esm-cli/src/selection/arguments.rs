//! The selector argument surface shared by operation handlers.
//!
//! Every handler that targets indexes exposes the same positional `index`
//! tokens and `--all` flag; `--exact` and `--older` are opt-in per operation.
//! A [`SelectorProfile`] captures that shape, and the functions here build
//! the `clap` arguments for it and read a [`SelectionRequest`] back.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::{ExtraSelector, SelectionRequest};
use crate::help::HelpMessages;

const INDEX: &str = "index";
const EXACT: &str = "exact";
const ALL: &str = "all";
const OLDER: &str = "older";

/// Modifier flags that an operation may promote to a targeting selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorFlag {
    /// `--older`.
    Older,
}

impl SelectorFlag {
    /// Returns the selector name as reported to the operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Older => OLDER,
        }
    }

    /// Returns whether the flag is set on `request`.
    #[must_use]
    pub const fn is_set(self, request: &SelectionRequest) -> bool {
        match self {
            Self::Older => request.older,
        }
    }
}

/// Shape of the selector surface for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorProfile {
    /// Expose `--exact`.
    pub include_exact: bool,
    /// Expose `--older`.
    pub include_older: bool,
    /// `--all` is on unless explicit names override it.
    pub default_all: bool,
    /// Flags that also satisfy the "at least one selector" requirement.
    pub extra_required: &'static [SelectorFlag],
}

impl SelectorProfile {
    /// Builds the extra selectors for `request`, in profile order.
    #[must_use]
    pub fn extra_selectors(&self, request: &SelectionRequest) -> Vec<ExtraSelector> {
        self.extra_required
            .iter()
            .map(|flag| ExtraSelector::new(flag.name(), flag.is_set(request)))
            .collect()
    }
}

/// Adds the selector arguments described by `profile` to `command`.
#[must_use]
pub fn selector_arguments(
    command: Command,
    profile: &SelectorProfile,
    messages: &HelpMessages,
) -> Command {
    let mut surface = command.arg(
        Arg::new(INDEX)
            .value_name("INDEX")
            .num_args(0..)
            .action(ArgAction::Append)
            .help(messages.index),
    );

    if profile.include_exact {
        surface = surface.arg(switch(EXACT, messages.exact));
    }
    if profile.include_older {
        surface = surface.arg(switch(OLDER, messages.older));
    }

    let all = switch(ALL, messages.all);
    if profile.default_all {
        surface.arg(all.default_value("true"))
    } else {
        surface.arg(all)
    }
}

fn switch(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::SetTrue)
        .help(help)
}

impl SelectionRequest {
    /// Reads a request from matches produced by [`selector_arguments`].
    ///
    /// Selectors the profile did not declare read as unset. A defaulted
    /// `--all` yields to explicit index names without counting as a conflict.
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let indexes: Vec<String> = matches
            .try_get_many::<String>(INDEX)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let defaulted_all = matches.value_source(ALL) == Some(ValueSource::DefaultValue);
        let all = flag(matches, ALL) && !(defaulted_all && !indexes.is_empty());
        Self {
            indexes,
            exact: flag(matches, EXACT),
            all,
            older: flag(matches, OLDER),
        }
    }
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}
