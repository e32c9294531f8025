//! Event sequences and their position index

use crate::config::CaseConfig;
use crate::id::IdGenerator;
use crate::types::SequenceId;
use std::collections::HashMap;

/// Maps an event name to every position it occupies in a sequence
///
/// Positions are kept as a list to leave room for repeated events, even
/// though expansion only handles the non-repeating case reliably.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    positions: HashMap<String, Vec<usize>>,
}

impl PositionIndex {
    /// Build an index by scanning `events` once
    pub fn build(events: &[String]) -> Self {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            positions.entry(event.clone()).or_default().push(position);
        }
        Self { positions }
    }

    /// Ascending positions of `event`, or `None` if it does not occur
    pub fn get(&self, event: &str) -> Option<&[usize]> {
        self.positions.get(event).map(Vec::as_slice)
    }

    /// Number of distinct event names
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}

/// One witness's account of an incident plus its merge bookkeeping
#[derive(Debug, Clone)]
pub struct EventSequence {
    id: SequenceId,
    original: Vec<String>,
    sequence: Vec<String>,
    index: PositionIndex,
    transitions: Vec<Vec<String>>,
}

impl EventSequence {
    /// Build a sequence from raw event names
    ///
    /// Each name goes through [`CaseConfig::sanitize`] before it is stored.
    pub fn new<S: AsRef<str>>(events: &[S], ids: &IdGenerator, config: &CaseConfig) -> Self {
        let sequence: Vec<String> = events.iter().map(|e| config.sanitize(e.as_ref())).collect();
        let index = PositionIndex::build(&sequence);
        let es = Self {
            id: ids.next(),
            original: sequence.clone(),
            sequence,
            index,
            transitions: Vec::new(),
        };
        log::trace!(
            "Created sequence {} with {} events: {:?}",
            es.id,
            es.sequence.len(),
            es.sequence
        );
        es
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// The sanitized input, never modified after construction
    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// The current, possibly expanded, events
    pub fn events(&self) -> &[String] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Positions of `event` in the current sequence
    pub fn positions(&self, event: &str) -> Option<&[usize]> {
        self.index.get(event)
    }

    /// Earlier states this sequence held before each expansion, oldest first
    pub fn transitions(&self) -> &[Vec<String>] {
        &self.transitions
    }

    /// True once the sequence has absorbed at least one expansion
    pub fn is_changed(&self) -> bool {
        self.sequence.len() != self.original.len()
    }

    /// True when some event name occurs more than once
    pub fn has_repeated_events(&self) -> bool {
        self.index.len() < self.sequence.len()
    }

    /// Concatenation of all event names, used to group identical sequences
    pub fn grouping_key(&self) -> String {
        self.sequence.concat()
    }

    /// Rebuild the position index from the current events
    pub fn regenerate_index(&mut self) {
        let index = PositionIndex::build(&self.sequence);
        log::trace!(
            "Regenerated index for {}: {} -> {} names",
            self.id,
            self.index.len(),
            index.len()
        );
        self.index = index;
    }

    /// Replace the events with an expanded version
    ///
    /// The previous state is kept in the transition history and the index is
    /// regenerated before returning, so the sequence is immediately usable
    /// as either side of another expansion.
    pub(crate) fn apply_expansion(&mut self, expanded: Vec<String>) {
        let previous = std::mem::replace(&mut self.sequence, expanded);
        self.transitions.push(previous);
        self.regenerate_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(events: &[&str]) -> Vec<String> {
        events.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_index_records_every_position() {
        let index = PositionIndex::build(&strings(&["a", "b", "a", "c"]));
        assert_eq!(index.get("a"), Some(&[0, 2][..]));
        assert_eq!(index.get("b"), Some(&[1][..]));
        assert_eq!(index.get("z"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_new_sequence() {
        let ids = IdGenerator::new();
        let config = CaseConfig::new();
        let first = EventSequence::new(&["fight", "gunshot"], &ids, &config);
        let second = EventSequence::new(&["gunshot"], &ids, &config);

        assert_eq!(first.id(), SequenceId(0));
        assert_eq!(second.id(), SequenceId(1));
        assert_eq!(first.original(), first.events());
        assert_eq!(first.positions("gunshot"), Some(&[1][..]));
        assert!(!first.is_changed());
        assert!(first.transitions().is_empty());
    }

    #[test]
    fn test_sanitized_names_are_stored() {
        let ids = IdGenerator::new();
        let config = CaseConfig::new().with_trim(true).with_case_fold(true);
        let es = EventSequence::new(&[" Fight", "GUNSHOT "], &ids, &config);

        assert_eq!(es.events(), &strings(&["fight", "gunshot"])[..]);
        assert_eq!(es.positions("fight"), Some(&[0][..]));
    }

    #[test]
    fn test_apply_expansion_regenerates_index() {
        let ids = IdGenerator::new();
        let mut es = EventSequence::new(&["fight", "fleeing"], &ids, &CaseConfig::new());

        es.apply_expansion(strings(&["fight", "gunshot", "fleeing"]));

        assert!(es.is_changed());
        assert_eq!(es.positions("fleeing"), Some(&[2][..]));
        assert_eq!(es.positions("gunshot"), Some(&[1][..]));
        assert_eq!(es.original(), &strings(&["fight", "fleeing"])[..]);
        assert_eq!(es.transitions(), &[strings(&["fight", "fleeing"])][..]);
    }

    #[test]
    fn test_repeated_events_and_grouping_key() {
        let ids = IdGenerator::new();
        let es = EventSequence::new(&["a", "b", "a"], &ids, &CaseConfig::new());
        assert!(es.has_repeated_events());
        assert_eq!(es.grouping_key(), "aba");

        let empty = EventSequence::new::<&str>(&[], &ids, &CaseConfig::new());
        assert!(empty.is_empty());
        assert!(!empty.has_repeated_events());
        assert_eq!(empty.grouping_key(), "");
    }
}
