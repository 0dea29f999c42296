//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{EpisodeObserver, EpisodeStats},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_reward: f64::MIN,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        if stats.reward > self.best_reward {
            self.best_reward = stats.reward;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("R:{:.1} best:{:.1}", stats.reward, self.best_reward));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("best:{:.1}", self.best_reward));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    episodes: usize,
    rewards: Vec<f64>,
    step_counts: Vec<u64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            episodes: 0,
            rewards: Vec::new(),
            step_counts: Vec::new(),
        }
    }

    /// Get mean episode reward
    pub fn mean_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    /// Get best episode reward
    pub fn best_reward(&self) -> f64 {
        self.rewards.iter().copied().fold(f64::MIN, f64::max)
    }

    /// Get average episode length in steps
    pub fn avg_episode_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<u64>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes,
            mean_reward: self.mean_reward(),
            best_reward: if self.rewards.is_empty() {
                0.0
            } else {
                self.best_reward()
            },
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub mean_reward: f64,
    pub best_reward: f64,
    pub avg_episode_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, stats: &EpisodeStats) -> Result<()> {
        self.episodes += 1;
        self.rewards.push(stats.reward);
        self.step_counts.push(stats.steps);
        Ok(())
    }
}

/// CSV history observer - Exports per-episode rewards to a CSV file
///
/// Produces one row per episode with columns `episode`, `reward`, `steps`.
pub struct CsvHistoryObserver {
    writer: csv::Writer<std::fs::File>,
}

#[derive(Serialize)]
struct HistoryRow {
    episode: usize,
    reward: f64,
    steps: u64,
}

impl CsvHistoryObserver {
    /// Create a new CSV history observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl EpisodeObserver for CsvHistoryObserver {
    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        self.writer.serialize(HistoryRow {
            episode,
            reward: stats.reward,
            steps: stats.steps,
        })?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();

        assert_eq!(observer.mean_reward(), 0.0);

        observer
            .on_episode_end(
                0,
                &EpisodeStats {
                    reward: 10.0,
                    steps: 100,
                },
            )
            .unwrap();
        observer
            .on_episode_end(
                1,
                &EpisodeStats {
                    reward: 20.0,
                    steps: 200,
                },
            )
            .unwrap();

        let summary = observer.summary();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.mean_reward, 15.0);
        assert_eq!(summary.best_reward, 20.0);
        assert_eq!(summary.avg_episode_length, 150.0);
    }

    #[test]
    fn test_csv_history_rows() {
        let dir = std::env::temp_dir().join("muncher-csv-observer-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("history.csv");

        {
            let mut observer = CsvHistoryObserver::new(&path).unwrap();
            observer
                .on_episode_end(
                    0,
                    &EpisodeStats {
                        reward: 1.5,
                        steps: 3,
                    },
                )
                .unwrap();
            observer.on_training_end().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("episode,reward,steps"));
        assert!(contents.contains("0,1.5,3"));

        std::fs::remove_file(&path).ok();
    }
}
