//! Acceptance policies and strictness levels

use serde::{Deserialize, Serialize};

/// How a batch treats its rejected records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptancePolicy {
    /// Keep the clean records, drop the rejected ones
    #[default]
    Partial,

    /// Reject the entire batch if any record is rejected
    FailAll,
}

/// Whether warnings count against a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrictnessLevel {
    /// Accept records that carry only warnings
    #[default]
    Permissive,

    /// Reject records that carry warnings
    Strict,
}

impl StrictnessLevel {
    /// Whether a record with these findings is acceptable
    #[must_use]
    pub fn accepts(self, has_errors: bool, has_warnings: bool) -> bool {
        match self {
            Self::Permissive => !has_errors,
            Self::Strict => !has_errors && !has_warnings,
        }
    }
}
