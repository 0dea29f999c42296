//! Nearest-state value approximation for restored tables.
//!
//! When evaluation hits a state the training run never saw, the closest
//! known state's value row stands in for it. This is a full linear scan with
//! the encoder's own distance function; O(N) per query is acceptable because
//! it only runs at evaluation time, never inside the training loop.

use crate::{features::EncoderKind, types::StateKey};

/// Find the value row of the stored state nearest to `query`.
///
/// Exact distance ties break toward the lowest key under [`StateKey`]'s
/// total order, so the result does not depend on map iteration order.
/// Returns `None` when the store is empty.
pub fn nearest_row<'a, I>(rows: I, query: &StateKey, encoder: EncoderKind) -> Option<&'a [f64]>
where
    I: IntoIterator<Item = (&'a StateKey, &'a Vec<f64>)>,
{
    let mut best: Option<(f64, &StateKey, &[f64])> = None;
    for (key, row) in rows {
        let d = encoder.distance(query, key);
        let better = match &best {
            None => true,
            Some((best_d, best_key, _)) => d < *best_d || (d == *best_d && key < *best_key),
        };
        if better {
            best = Some((d, key, row));
        }
    }
    best.map(|(_, _, row)| row)
}
