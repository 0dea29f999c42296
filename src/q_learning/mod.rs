//! Tabular Q-learning engine
//!
//! Off-policy one-step TD control over a lazily-populated state-action
//! table, with pluggable exploration and a nearest-state fallback for
//! evaluation on never-seen states.
//!
//! ## Training vs. evaluation lookups
//!
//! | Mode | Store | Miss behavior |
//! |------|-------|---------------|
//! | Training ([`QLearningAgent`]) | defaulting | materialize `[init_q; A]` |
//! | Restored ([`RestoredPolicy`]) | strict | `None` → approximator |
//!
//! A restored agent must be able to tell a novel state apart from a seen
//! state that still holds default values.
//!
//! ## Usage Example
//!
//! ```no_run
//! use muncher::q_learning::{AgentConfig, ExplorationStrategy, QLearningAgent};
//!
//! let agent = QLearningAgent::new(AgentConfig {
//!     actions: 4,
//!     discount: 0.99,
//!     alpha: 0.1,
//!     init_q: 5.0,
//!     strategy: ExplorationStrategy::EpsGreedy {
//!         eps_start: 1.0,
//!         eps_end: 0.05,
//!         decay_steps: 5e4,
//!     },
//!     seed: Some(42),
//! });
//! ```

pub mod agent;
pub mod approximator;
pub mod exploration;
pub mod policy;
pub mod serialization;
pub mod table;

// Public re-exports
pub use agent::{AgentConfig, QLearningAgent};
pub use approximator::nearest_row;
pub use exploration::ExplorationStrategy;
pub use policy::RestoredPolicy;
pub use serialization::SavedAgent;
pub use table::{DefaultingStore, StrictStore};
