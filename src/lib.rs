//! Tabular Q-learning engine for RAM-observed maze-chase games
//!
//! This crate provides:
//! - Off-policy one-step Q-learning over hand-crafted state abstractions
//! - Epsilon-greedy and UCB exploration policies
//! - RAM-offset state encoders (coarse Manhattan-distance and sector-based)
//! - Versioned agent snapshots with a nearest-state approximator for
//!   evaluating restored policies on unseen states
//! - A training pipeline with composable per-episode observers

pub mod adapters;
pub mod cli;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod ram;
pub mod types;

pub use error::{Error, Result};
pub use features::EncoderKind;
pub use q_learning::{
    AgentConfig, ExplorationStrategy, QLearningAgent, RestoredPolicy, SavedAgent,
};
pub use types::{FeatureValue, StateKey};
