//! Part sequencing: orders a body plan's parts so parents come first.
//!
//! Parts name their parent by string, so the relation may dangle or loop.
//! Ordering is done by iterative layering over the set of unplaced parts:
//!
//! 1. A part is *ready* when it has no parent, or its parent is no longer
//!    unplaced (already emitted, or not a part of this plan at all).
//! 2. Ready parts are emitted in name order, then removed.
//! 3. If nothing is ready the remainder must contain a cycle; the whole
//!    remainder is treated as ready for that round.
//!
//! Step 3 guarantees termination and that every part is emitted exactly
//! once. Parent-before-child holds for every part outside a cycle's reach.

use std::collections::{BTreeMap, BTreeSet};

/// Order `parts` parent-first. `parent_of` reads a part's declared parent.
///
/// The result is a permutation of the input: never fails, never drops or
/// duplicates a part.
pub fn sequence_parts<'a, T, F>(
    parts: impl IntoIterator<Item = (&'a str, &'a T)>,
    parent_of: F,
) -> Vec<(&'a str, &'a T)>
where
    T: 'a,
    F: Fn(&T) -> Option<&str>,
{
    let index: BTreeMap<&'a str, &'a T> = parts.into_iter().collect();
    let mut remaining: BTreeSet<&'a str> = index.keys().copied().collect();
    let mut ordered = Vec::with_capacity(index.len());

    while !remaining.is_empty() {
        // BTreeSet iteration is already in name order.
        let mut ready: Vec<&'a str> = remaining
            .iter()
            .copied()
            .filter(|name| match parent_of(index[name]) {
                None => true,
                Some(parent) => !remaining.contains(parent),
            })
            .collect();

        if ready.is_empty() {
            tracing::debug!(
                unresolved = remaining.len(),
                "part parents form a cycle; emitting remainder in name order"
            );
            ready = remaining.iter().copied().collect();
        }

        for name in ready {
            remaining.remove(name);
            ordered.push((name, index[name]));
        }
    }

    ordered
}
