//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training agents against an environment
//! - Evaluating restored policies greedily
//! - Recording per-episode data during training

pub mod observers;
pub mod runner;

// Re-export observer implementations (adapters)
pub use observers::{CsvHistoryObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use runner::{TrainingConfig, TrainingPipeline, TrainingResult, run_greedy_episode};

pub use crate::ports::{Environment, EpisodeObserver};
