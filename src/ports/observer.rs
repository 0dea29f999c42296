//! Observer port - abstraction for training observation and data collection
//!
//! Observers can be composed to collect different data during training
//! without coupling the episode driver to specific output formats:
//! progress bars, CSV history export, or summary metrics.
//!
//! # Event Sequence
//!
//! 1. `on_training_start(total_episodes)` - once at the beginning
//! 2. `on_episode_end(episode, stats)` - after every episode
//! 3. `on_training_end()` - once at the end

use serde::{Deserialize, Serialize};

use crate::Result;

/// Per-episode outcome reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Total (possibly clipped) reward accumulated over the episode.
    pub reward: f64,
    /// Number of environment steps taken.
    pub steps: u64,
}

/// Observer trait for monitoring training
pub trait EpisodeObserver: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode completes.
    fn on_episode_end(&mut self, _episode: usize, _stats: &EpisodeStats) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode. Use this to flush files or
    /// display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
