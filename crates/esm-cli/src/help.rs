//! Help text for the selector arguments.

use crate::operation::OperationName;

/// The four help strings shown for the selector arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpMessages {
    /// Help for the positional index tokens.
    pub index: &'static str,
    /// Help for `--exact`.
    pub exact: &'static str,
    /// Help for `--all`.
    pub all: &'static str,
    /// Help for `--older`.
    pub older: &'static str,
}

impl Default for HelpMessages {
    fn default() -> Self {
        Self {
            index: "Depending on mode, the name of the index(es) to operate on. By default, \
                    the active version will be acted upon. If --exact is supplied, the \
                    specified versions will be acted upon.",
            exact: "The index names you supply should be considered specific index version \
                    names, including environment prefix.",
            all: "Operate on all of the available indexes, using the active version for each \
                  index.",
            older: "Operate on versions older than the active index. With --exact, operate on \
                    versions older than the specified index.",
        }
    }
}

/// Supplies the selector help text for an operation.
///
/// Implementors override [`HelpMessageProvider::help_messages`] to reword
/// individual entries; the selection rules are unaffected.
pub trait HelpMessageProvider {
    /// Returns the help text to attach to the selector arguments.
    fn help_messages(&self) -> HelpMessages {
        HelpMessages::default()
    }
}

impl HelpMessageProvider for OperationName {
    fn help_messages(&self) -> HelpMessages {
        let defaults = HelpMessages::default();
        match self {
            Self::Create => HelpMessages {
                index: "The logical name of the index(es) to create. A new version is created \
                        for each name.",
                ..defaults
            },
            Self::DangerousReset => HelpMessages {
                index: "Not accepted: a dangerous reset always removes every index and version.",
                ..defaults
            },
            Self::Clear => HelpMessages {
                older: "Clear the documents of versions older than the active index. With \
                        --exact, clear versions older than the specified index.",
                ..defaults
            },
            Self::Drop => HelpMessages {
                older: "Drop versions older than the active index. With --exact, drop versions \
                        older than the specified index.",
                ..defaults
            },
            Self::List | Self::Activate | Self::Update | Self::Deactivate => defaults,
        }
    }
}
