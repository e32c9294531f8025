//! Merge coordination
//!
//! A [`Case`] owns every witness sequence of one incident and drives the
//! pairwise merges between them.
//!
//! Pairs are visited in a fixed order (ascending `i`, then ascending `j`) and
//! each merge sees the expansions applied by earlier ones. Convergence is
//! therefore order dependent for inputs that need knowledge to travel through
//! more than one intermediate sequence.

use crate::analysis::{self, Analysis};
use crate::config::CaseConfig;
use crate::expansion::expand;
use crate::id::IdGenerator;
use crate::sequence::EventSequence;
use crate::types::{MergeError, Result, SequenceId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Outcome of merging one pair of sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairMerge {
    pub first: SequenceId,
    pub second: SequenceId,
    /// The pair had been merged before, nothing was recomputed
    pub already_merged: bool,
    pub first_expanded: bool,
    pub second_expanded: bool,
}

impl PairMerge {
    /// Number of sides that absorbed an expansion
    pub fn expansions(&self) -> usize {
        self.first_expanded as usize + self.second_expanded as usize
    }
}

/// Totals for one [`Case::merge_all`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Pairs merged during this pass
    pub pairs_merged: usize,
    /// Pairs skipped because an earlier pass already merged them
    pub pairs_skipped: usize,
    /// Expansions applied across all pairs
    pub expansions: usize,
}

/// All witness accounts of one incident
#[derive(Debug)]
pub struct Case {
    /// Sequences in input order
    sequences: Vec<EventSequence>,
    /// Sequence id -> position in `sequences`
    by_id: HashMap<SequenceId, usize>,
    /// Merged pairs, stored as (lower id, higher id)
    merged: HashSet<(SequenceId, SequenceId)>,
    /// Raw input, kept for reporting only
    input: Vec<Vec<String>>,
}

impl Case {
    /// Build a case with the default configuration
    pub fn new<S: AsRef<str>>(witnesses: &[Vec<S>]) -> Self {
        Self::with_config(witnesses, CaseConfig::default())
    }

    /// Build a case, sanitizing every event name with `config`
    pub fn with_config<S: AsRef<str>>(witnesses: &[Vec<S>], config: CaseConfig) -> Self {
        let ids = IdGenerator::new();
        let mut sequences = Vec::with_capacity(witnesses.len());
        let mut by_id = HashMap::with_capacity(witnesses.len());
        let mut input = Vec::with_capacity(witnesses.len());

        for events in witnesses {
            let es = EventSequence::new(events, &ids, &config);
            by_id.insert(es.id(), sequences.len());
            sequences.push(es);
            input.push(events.iter().map(|e| e.as_ref().to_string()).collect());
        }

        log::debug!("Created case with {} sequences", sequences.len());

        Self {
            sequences,
            by_id,
            merged: HashSet::new(),
            input,
        }
    }

    /// The raw witness input, as given to the constructor
    pub fn input(&self) -> &[Vec<String>] {
        &self.input
    }

    /// All sequences, in input order
    pub fn sequences(&self) -> &[EventSequence] {
        &self.sequences
    }

    /// Look up a sequence by id
    pub fn sequence(&self, id: SequenceId) -> Option<&EventSequence> {
        self.by_id.get(&id).map(|&idx| &self.sequences[idx])
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// True if the two sequences have already been merged with each other
    pub fn is_merged(&self, a: SequenceId, b: SequenceId) -> bool {
        self.merged.contains(&pair_key(a, b))
    }

    /// Merge two sequences by id
    pub fn merge_pair(&mut self, a: SequenceId, b: SequenceId) -> Result<PairMerge> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        if i == j {
            return Err(MergeError::SelfMerge(a));
        }
        Ok(self.merge_at(i, j))
    }

    /// Merge every pair of sequences once, in canonical order
    ///
    /// Running this again on the same case changes nothing: every pair is
    /// already recorded as merged.
    pub fn merge_all(&mut self) -> MergeSummary {
        let mut summary = MergeSummary::default();
        let count = self.sequences.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let result = self.merge_at(i, j);
                if result.already_merged {
                    summary.pairs_skipped += 1;
                } else {
                    summary.pairs_merged += 1;
                    summary.expansions += result.expansions();
                }
            }
        }

        log::debug!(
            "Merge pass done: {} pairs merged, {} skipped, {} expansions",
            summary.pairs_merged,
            summary.pairs_skipped,
            summary.expansions
        );
        summary
    }

    /// Classify the current state of the case
    pub fn analyze(&self) -> Analysis {
        analysis::analyze(&self.sequences)
    }

    fn position(&self, id: SequenceId) -> Result<usize> {
        self.by_id.get(&id).copied().ok_or(MergeError::SequenceNotFound(id))
    }

    /// Expand each side of a pair using the other and apply the results
    ///
    /// Both expansions read the state at entry; neither sees the other's
    /// result.
    fn merge_at(&mut self, i: usize, j: usize) -> PairMerge {
        let first = self.sequences[i].id();
        let second = self.sequences[j].id();
        let key = pair_key(first, second);

        let mut result = PairMerge {
            first,
            second,
            already_merged: false,
            first_expanded: false,
            second_expanded: false,
        };

        if self.merged.contains(&key) {
            log::trace!("Pair {} / {} already merged", first, second);
            result.already_merged = true;
            return result;
        }

        let (expanded_first, expanded_second) = {
            let a = &self.sequences[i];
            let b = &self.sequences[j];
            if a.has_repeated_events() || b.has_repeated_events() {
                log::warn!(
                    "Merging {} and {} with repeated event names; expansion may be unreliable",
                    first,
                    second
                );
            }
            (expand(a, b), expand(b, a))
        };

        if let Some(events) = expanded_first {
            self.sequences[i].apply_expansion(events);
            result.first_expanded = true;
        }
        if let Some(events) = expanded_second {
            self.sequences[j].apply_expansion(events);
            result.second_expanded = true;
        }

        self.merged.insert(key);
        log::debug!(
            "Merged {} / {}: expanded first={}, second={}",
            first,
            second,
            result.first_expanded,
            result.second_expanded
        );
        result
    }
}

fn pair_key(a: SequenceId, b: SequenceId) -> (SequenceId, SequenceId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
