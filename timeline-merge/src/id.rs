//! Sequence identifier generation

use crate::types::SequenceId;
use std::sync::atomic::{AtomicI32, Ordering};

/// Issues unique, strictly increasing sequence ids starting at 0
///
/// Safe to share between threads: every call to [`IdGenerator::next`] claims
/// its value with a compare-and-swap retry loop.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicI32,
}

impl IdGenerator {
    /// Create a generator whose first id is 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next id
    pub fn next(&self) -> SequenceId {
        loop {
            let current = self.counter.load(Ordering::Acquire);
            if self
                .counter
                .compare_exchange_weak(
                    current,
                    current.wrapping_add(1),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
            {
                return SequenceId(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next(), SequenceId(0));
        assert_eq!(ids.next(), SequenceId(1));
        assert_eq!(ids.next(), SequenceId(2));
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..500).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 4000);
        assert_eq!(ids.next(), SequenceId(4000));
    }
}
