//! Train command - Train a Q-learning agent on the maze simulator

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::MazeSim,
    cli::output::{format_number, print_kv, print_section},
    features::EncoderKind,
    pipeline::{CsvHistoryObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    ports::Environment,
    q_learning::{AgentConfig, ExplorationStrategy, QLearningAgent, SavedAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Exploration policy (eps_greedy or ucb)
    #[arg(long, short = 'p', default_value = "eps_greedy")]
    pub policy: String,

    /// State encoder (coarse or sector)
    #[arg(long, short = 'e', default_value = "coarse")]
    pub encoder: String,

    /// Number of training episodes
    #[arg(long, short = 'n', default_value_t = 50)]
    pub episodes: usize,

    /// Per-episode step cap
    #[arg(long, default_value_t = 100_000)]
    pub max_steps: u64,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, default_value_t = 0.99)]
    pub discount: f64,

    /// Learning rate alpha (0.0-1.0)
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Initial Q-value for unseen states
    #[arg(long, default_value_t = 5.0)]
    pub init_q: f64,

    /// Starting epsilon for eps_greedy
    #[arg(long, default_value_t = 1.0)]
    pub eps_start: f64,

    /// Final epsilon for eps_greedy
    #[arg(long, default_value_t = 0.05)]
    pub eps_end: f64,

    /// Steps over which epsilon decays linearly
    #[arg(long, default_value_t = 50_000.0)]
    pub eps_decay_steps: f64,

    /// Exploration strength c for ucb
    #[arg(long, default_value_t = 1.0)]
    pub ucb_strength: f64,

    /// Clip per-step rewards into [-1, 1]
    #[arg(long, default_value_t = false)]
    pub reward_clip: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent snapshot
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional CSV file for per-episode reward history
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

/// Parse an exploration strategy from the policy flag and its parameters
fn parse_strategy(args: &TrainArgs) -> Result<ExplorationStrategy> {
    match args.policy.trim().to_ascii_lowercase().as_str() {
        "eps_greedy" | "eps-greedy" => Ok(ExplorationStrategy::EpsGreedy {
            eps_start: args.eps_start,
            eps_end: args.eps_end,
            decay_steps: args.eps_decay_steps,
        }),
        "ucb" => Ok(ExplorationStrategy::Ucb {
            exploration_strength: args.ucb_strength,
        }),
        other => Err(crate::Error::UnknownPolicy {
            name: other.to_string(),
        }
        .into()),
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let strategy = parse_strategy(&args)?;
    let encoder = EncoderKind::from_name(&args.encoder)?;

    let mut env = MazeSim::new(args.seed.unwrap_or(0));
    let mut agent = QLearningAgent::new(AgentConfig {
        actions: env.action_count(),
        discount: args.discount,
        alpha: args.alpha,
        init_q: args.init_q,
        strategy,
        seed: args.seed,
    });

    let config = TrainingConfig {
        episodes: args.episodes,
        max_steps: args.max_steps,
        reward_clip: args.reward_clip,
    };

    let mut pipeline = TrainingPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(ref history_path) = args.history {
        pipeline = pipeline.with_observer(Box::new(CsvHistoryObserver::new(history_path)?));
    }

    let result = pipeline.run(&mut agent, &mut env, encoder)?;

    print_section("Training Complete");
    print_kv("Episodes", &result.episodes.to_string());
    print_kv("Total steps", &format_number(result.total_steps as usize));
    print_kv("Mean reward", &format!("{:.2}", result.mean_reward));
    print_kv("Best reward", &format!("{:.2}", result.best_reward));
    print_kv("States seen", &format_number(result.states_seen));
    print_kv("Policy", strategy.name());
    print_kv("Encoder", encoder.name());

    if let Some(ref output_path) = args.output {
        let saved = SavedAgent::from_agent(&agent, encoder);
        saved.save_to_file(output_path)?;
        println!("\nAgent saved to: {}", output_path.display());
    }

    if let Some(ref summary_path) = args.summary {
        result.save(summary_path)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}
