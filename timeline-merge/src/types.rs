//! Core types for the timeline merge library
//!
//! This module defines the identifiers, statuses and errors shared by the
//! sequence, expansion, merge and analysis modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Identifier of an event sequence within a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(pub i32);

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by the id-based merge API
///
/// The merge algorithm itself is total; these only cover callers naming
/// sequences that do not exist in the case.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("Sequence not found: {0}")]
    SequenceNotFound(SequenceId),

    #[error("Cannot merge sequence {0} with itself")]
    SelfMerge(SequenceId),
}

/// Overall outcome of merging every sequence in a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStatus {
    /// Not analyzed yet
    #[default]
    Unknown,
    /// All sequences converged into a single timeline
    MergeComplete,
    /// Some sequences expanded but more than one timeline remains
    MergePartial,
    /// Nothing overlapped enough to expand any sequence
    NoMergePossible,
}

impl fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStatus::Unknown => write!(f, "Unknown"),
            MergeStatus::MergeComplete => write!(f, "Merge is possible"),
            MergeStatus::MergePartial => write!(f, "Partial merge is possible"),
            MergeStatus::NoMergePossible => write!(f, "No merge is possible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", MergeStatus::Unknown), "Unknown");
        assert_eq!(format!("{}", MergeStatus::MergeComplete), "Merge is possible");
        assert_eq!(format!("{}", MergeStatus::MergePartial), "Partial merge is possible");
        assert_eq!(format!("{}", MergeStatus::NoMergePossible), "No merge is possible");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&MergeStatus::MergePartial).unwrap();
        assert_eq!(json, "\"merge-partial\"");

        let status: MergeStatus = serde_json::from_str("\"no-merge-possible\"").unwrap();
        assert_eq!(status, MergeStatus::NoMergePossible);
        assert_eq!(MergeStatus::default(), MergeStatus::Unknown);
    }

    #[test]
    fn test_error_messages() {
        let err = MergeError::SequenceNotFound(SequenceId(7));
        assert_eq!(err.to_string(), "Sequence not found: #7");
    }
}
