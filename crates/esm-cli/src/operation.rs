//! The fixed table of index lifecycle operations.
//!
//! Each operation owns a top-level flag (`--list`, `--drop`, ...), a line of
//! help text, and a handler identifier derived from its name. Adding an
//! operation means adding a variant here together with its description; the
//! flag surface and handler lookup are generated from this table.
//!
//! This module is also compiled into the build script, so it depends on the
//! standard library only.

use std::fmt;

/// Prefix joined to an operation name to form its handler identifier.
pub const HANDLER_PREFIX: &str = "es_";

/// Index lifecycle operations understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationName {
    /// List indexes and their versions.
    List,
    /// Create new index versions.
    Create,
    /// Mark index versions as active.
    Activate,
    /// Update the documents held by index versions.
    Update,
    /// Deactivate index versions.
    Deactivate,
    /// Clear the documents held by index versions.
    Clear,
    /// Drop index versions.
    Drop,
    /// Drop and recreate every index.
    DangerousReset,
}

impl OperationName {
    /// Every operation in canonical dispatch order.
    ///
    /// When several operation flags are present, the first one in this order
    /// wins.
    pub const ALL: [Self; 8] = [
        Self::List,
        Self::Create,
        Self::Activate,
        Self::Update,
        Self::Deactivate,
        Self::Clear,
        Self::Drop,
        Self::DangerousReset,
    ];

    /// Returns the canonical name, which doubles as the flag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Activate => "activate",
            Self::Update => "update",
            Self::Deactivate => "deactivate",
            Self::Clear => "clear",
            Self::Drop => "drop",
            Self::DangerousReset => "dangerous_reset",
        }
    }

    /// Returns the help text shown for the operation flag.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::List => "List indexes; calls es_list",
            Self::Create => "Create indexes; calls es_create",
            Self::Activate => "Activate indexes; calls es_activate",
            Self::Update => "Update indexes; calls es_update",
            Self::Deactivate => "Deactivate indexes; calls es_deactivate",
            Self::Clear => "Clear indexes; calls es_clear",
            Self::Drop => "Drop indexes; calls es_drop",
            Self::DangerousReset => "Dangerously drops all indexes and recreates all indexes (!)",
        }
    }

    /// Returns the identifier of the handler serving this operation.
    #[must_use]
    pub fn handler_name(self) -> String {
        format!("{HANDLER_PREFIX}{}", self.as_str())
    }

    /// Looks up an operation by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == name)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_flag_table() {
        let names: Vec<&str> = OperationName::ALL.iter().map(|op| op.as_str()).collect();
        assert_eq!(
            names,
            [
                "list",
                "create",
                "activate",
                "update",
                "deactivate",
                "clear",
                "drop",
                "dangerous_reset",
            ]
        );
    }

    #[test]
    fn handler_names_follow_prefix_convention() {
        for operation in OperationName::ALL {
            assert_eq!(
                operation.handler_name(),
                format!("es_{}", operation.as_str())
            );
        }
    }

    #[test]
    fn from_name_round_trips_every_operation() {
        for operation in OperationName::ALL {
            assert_eq!(OperationName::from_name(operation.as_str()), Some(operation));
        }
        assert_eq!(OperationName::from_name("reindex"), None);
    }

    #[test]
    fn every_operation_has_a_description() {
        assert!(
            OperationName::ALL
                .iter()
                .all(|operation| !operation.description().is_empty())
        );
    }
}
