//! Restored evaluation-time agent.
//!
//! A [`RestoredPolicy`] wraps a loaded snapshot behind strict (non-defaulting)
//! stores: looking up a state the training run never produced yields an
//! explicit miss instead of a fresh default row. Greedy evaluation consumes
//! that signal to fall back to the nearest-state approximator.

use crate::{
    Error, Result,
    features::EncoderKind,
    q_learning::{
        approximator::nearest_row,
        exploration::{ExplorationStrategy, argmax},
        table::StrictStore,
    },
    types::StateKey,
};

/// Frozen agent reconstructed from a snapshot; greedy action selection only.
#[derive(Debug, Clone)]
pub struct RestoredPolicy {
    pub(crate) actions: usize,
    pub(crate) discount: f64,
    pub(crate) alpha: f64,
    pub(crate) init_q: f64,
    pub(crate) strategy: ExplorationStrategy,
    pub(crate) total_steps: u64,
    pub(crate) encoder: EncoderKind,
    pub(crate) q_rows: StrictStore<f64>,
    pub(crate) visit_rows: StrictStore<u64>,
}

impl RestoredPolicy {
    /// Value row for a known state; `None` signals a state absent from the
    /// restored table (a control-flow signal, not an error).
    pub fn value_row(&self, state: &StateKey) -> Option<&[f64]> {
        self.q_rows.row(state)
    }

    /// Visit counts for a known state.
    pub fn count_row(&self, state: &StateKey) -> Option<&[u64]> {
        self.visit_rows.row(state)
    }

    /// Greedy action for a known state (ties → lowest index).
    pub fn greedy_action(&self, state: &StateKey) -> Option<usize> {
        self.value_row(state).map(argmax)
    }

    /// Value row for an unknown state via the nearest known state under the
    /// encoder's distance function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValueStore`] when the restored table holds no
    /// states at all.
    pub fn approximate_row(&self, state: &StateKey) -> Result<&[f64]> {
        nearest_row(self.q_rows.iter(), state, self.encoder).ok_or(Error::EmptyValueStore)
    }

    /// Greedy action with the approximator as fallback for unknown states.
    pub fn action_for(&self, state: &StateKey) -> Result<usize> {
        match self.greedy_action(state) {
            Some(action) => Ok(action),
            None => Ok(argmax(self.approximate_row(state)?)),
        }
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn init_q(&self) -> f64 {
        self.init_q
    }

    pub fn strategy(&self) -> ExplorationStrategy {
        self.strategy
    }

    /// Step counter carried over from the training run.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Number of states in the restored value table.
    pub fn states_seen(&self) -> usize {
        self.q_rows.len()
    }

    /// Encoder that produced (and must keep producing) this table's keys.
    pub fn encoder(&self) -> EncoderKind {
        self.encoder
    }
}
