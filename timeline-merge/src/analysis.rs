//! Outcome analysis
//!
//! Runs after merging: groups identical sequences and classifies how far the
//! witnesses converged.

use crate::sequence::EventSequence;
use crate::types::{MergeStatus, SequenceId};
use serde::Serialize;
use std::collections::HashMap;

/// Result of analyzing a merged case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub status: MergeStatus,
    /// One sequence per distinct group, ordered by lowest member id
    pub merged: Vec<Vec<String>>,
    /// Member ids of each group, parallel to `merged`
    pub groups: Vec<Vec<SequenceId>>,
    pub num_sequences: usize,
    /// Sequences that absorbed at least one expansion
    pub changed_count: usize,
}

impl Analysis {
    /// Number of distinct merged sequences
    pub fn group_count(&self) -> usize {
        self.merged.len()
    }
}

/// Classify a merge outcome from its counters
pub fn classify(changed_count: usize, group_count: usize, num_sequences: usize) -> MergeStatus {
    if changed_count == 0 {
        MergeStatus::NoMergePossible
    } else if group_count == 1 && changed_count + 1 >= num_sequences {
        MergeStatus::MergeComplete
    } else {
        MergeStatus::MergePartial
    }
}

/// Group identical sequences and classify the outcome
///
/// `sequences` must be in ascending id order, as [`crate::Case`] holds them.
/// Groups then come out ordered by their lowest member id, member lists are
/// ascending, and each group is represented by its first member.
pub fn analyze(sequences: &[EventSequence]) -> Analysis {
    let mut changed_count = 0;
    let mut group_of: HashMap<String, usize> = HashMap::with_capacity(sequences.len());
    let mut groups: Vec<(Vec<SequenceId>, &EventSequence)> = Vec::new();

    for es in sequences {
        if es.is_changed() {
            changed_count += 1;
        }

        let idx = *group_of.entry(es.grouping_key()).or_insert_with(|| {
            groups.push((Vec::new(), es));
            groups.len() - 1
        });
        groups[idx].0.push(es.id());
    }


    let status = classify(changed_count, groups.len(), sequences.len());
    log::debug!(
        "Analysis: {} sequences, {} changed, {} groups -> {}",
        sequences.len(),
        changed_count,
        groups.len(),
        status
    );

    let (groups, merged): (Vec<Vec<SequenceId>>, Vec<Vec<String>>) = groups
        .into_iter()
        .map(|(members, es)| (members, es.events().to_vec()))
        .unzip();

    Analysis {
        status,
        merged,
        groups,
        num_sequences: sequences.len(),
        changed_count,
    }
}
