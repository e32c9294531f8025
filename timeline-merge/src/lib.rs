//! Timeline Merge Library
//!
//! Reconciles several witnesses' ordered accounts of the same incident into
//! the smallest set of consistent timelines.
//!
//! # Architecture
//!
//! - [`IdGenerator`] hands out sequence ids
//! - [`EventSequence`] holds one witness's events and their position index
//! - [`expand`] computes how one sequence grows using another
//! - [`Case`] owns all sequences and merges every pair in a fixed order
//! - [`analyze`] groups identical results and classifies the outcome
//!
//! The library does NOT:
//! - Read input files or parse command lines
//! - Render reports (text or JSON)
//! - Merge more than two sequences at once
//!
//! All of that lives in the application layer (timeline-merge-cli).
//!
//! # Known limitation
//!
//! Expansion assumes an event name occurs at most once per sequence, but
//! distinct names in the input do not keep it that way. When two witnesses
//! disagree on the order of shared events, merging them introduces repeats
//! (`["a", "c"]` expanded using `["c", "a"]` becomes `["c", "a", "c", "a"]`),
//! and every later merge builds on those repeats. Results stay deterministic
//! but are not guaranteed to be a meaningful reconciliation.
//!
//! Output size is not bounded by input size. Four witnesses of at most four
//! events each can expand into sequences tens of thousands of events long.
//!
//! # Example Usage
//!
//! ```
//! use timeline_merge::{Case, MergeStatus};
//!
//! let mut case = Case::new(&[
//!     vec!["fight", "gunshot", "fleeing"],
//!     vec!["gunshot", "falling", "fleeing"],
//! ]);
//! case.merge_all();
//!
//! let analysis = case.analyze();
//! assert_eq!(analysis.status, MergeStatus::MergeComplete);
//! assert_eq!(analysis.merged, vec![vec!["fight", "gunshot", "falling", "fleeing"]]);
//! ```

// Public modules
pub mod analysis;
pub mod case;
pub mod config;
pub mod expansion;
pub mod id;
pub mod sequence;
pub mod types;

// Re-export main types for convenience
pub use analysis::{analyze, classify, Analysis};
pub use case::{Case, MergeSummary, PairMerge};
pub use config::CaseConfig;
pub use expansion::expand;
pub use id::IdGenerator;
pub use sequence::{EventSequence, PositionIndex};
pub use types::{MergeError, MergeStatus, Result, SequenceId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a single witness never merges
        let mut case = Case::new(&[vec!["fight"]]);
        case.merge_all();
        assert_eq!(case.analyze().status, MergeStatus::NoMergePossible);
    }
}
