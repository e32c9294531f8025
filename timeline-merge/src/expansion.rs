//! Sequence expansion
//!
//! Computes what one sequence becomes once it absorbs the events another
//! sequence records around their shared anchors. This is a pure function of
//! the two sequences; applying the result is left to the merge coordinator.
//!
//! # Algorithm
//!
//! `A` is scanned left to right against a working copy `A'`. For every event
//! of `A` that also occurs in `B`:
//! 1. **Head**: on the first event, events `B` records before its first
//!    occurrence are prepended.
//! 2. **Tail**: on the last event, events `B` records after its first
//!    occurrence are appended.
//! 3. **Pair gap**: otherwise, if the next event of `A` also occurs in `B`,
//!    the slot holding the current event is replaced by the `B` range from
//!    the first occurrence of the current event up to (not including) the
//!    last occurrence of the next one.
//!
//! Two counters track growth: `prior_growth` counts events inserted before
//! the scan position, so splices land on the shifted slot, and
//! `suffix_growth` counts tail appends. If neither became positive the
//! expansion reports no change.
//!
//! # Limitations
//!
//! The anchor choice (first occurrence for head/tail and the earlier pair
//! event, last occurrence for the later pair event) is a heuristic for
//! sequences without repeated names. Results are deterministic but not
//! guaranteed meaningful when a name repeats within a sequence.
//!
//! Repeats are not only an input problem. If `a` and `b` order their shared
//! events differently, the head and tail steps both fire and the result
//! repeats names even though neither side did. Nothing limits the growth
//! either: one expansion can be as long as `a` and `b` combined, and later
//! merges compound it.

use crate::sequence::EventSequence;

/// Expand `a` using the events recorded in `b`
///
/// Returns `None` when `a` is already maximal relative to `b`.
pub fn expand(a: &EventSequence, b: &EventSequence) -> Option<Vec<String>> {
    let a_events = a.events();
    let b_events = b.events();
    if a_events.is_empty() || b_events.is_empty() {
        return None;
    }

    let last_a = a_events.len() - 1;
    let last_b = b_events.len() - 1;

    let mut expanded = a_events.to_vec();
    // Signed: a splice between two anchors sharing a name can shrink `A'`.
    let mut prior_growth: isize = 0;
    let mut suffix_growth: usize = 0;

    for (ii, event) in a_events.iter().enumerate() {
        let Some(left) = b.positions(event) else {
            continue;
        };
        let left_first = left[0];
        log::trace!("{} vs {}: [{}] {:?} found at {:?} in other", a.id(), b.id(), ii, event, left);

        // seqA = "A..", seqB = "xyzA..." => "xyzA.."
        if ii == 0 && left_first != 0 {
            expanded.splice(0..0, b_events[..left_first].iter().cloned());
            prior_growth += left_first as isize;
            log::trace!("Head extension by {} events: {:?}", left_first, expanded);
        }

        // seqA = "..A", seqB = "...Axyz" => "..Axyz"
        if ii == last_a && left_first < last_b {
            expanded.extend_from_slice(&b_events[left_first + 1..]);
            suffix_growth += b_events.len() - left_first;
            log::trace!("Tail extension: {:?}", expanded);
        }

        if ii == last_a {
            break;
        }

        // seqA = "..AB..", seqB = "..AxByzB.." => "..AxByzB.."
        let Some(&right_last) = b.positions(&a_events[ii + 1]).and_then(|right| right.last()) else {
            continue;
        };
        if right_last >= left_first {
            let slot = (ii as isize + prior_growth) as usize;
            expanded.splice(slot..=slot, b_events[left_first..right_last].iter().cloned());
            prior_growth += right_last as isize - left_first as isize - 1;
            log::trace!("Pair gap splice at slot {}: {:?}", slot, expanded);
        }
    }

    if prior_growth > 0 || suffix_growth > 0 {
        log::debug!(
            "Expanded {} using {}: {} -> {} events",
            a.id(),
            b.id(),
            a_events.len(),
            expanded.len()
        );
        Some(expanded)
    } else {
        None
    }
}
