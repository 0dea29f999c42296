//! Play command - Run greedy episodes with a restored agent snapshot

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::MazeSim,
    cli::output::{format_number, print_kv, print_section},
    pipeline::run_greedy_episode,
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Play greedy episodes with a trained agent")]
pub struct PlayArgs {
    /// Path to a trained agent snapshot
    pub snapshot: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'n', default_value_t = 10)]
    pub episodes: usize,

    /// Per-episode step cap
    #[arg(long, default_value_t = 100_000)]
    pub max_steps: u64,

    /// Random seed for the environment
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print per-episode results
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let saved = SavedAgent::load_from_file(&args.snapshot)?;
    let policy = saved.to_policy()?;

    print_section("Loaded Agent");
    print_kv("Snapshot", &args.snapshot.display().to_string());
    print_kv("Policy", policy.strategy().name());
    print_kv("Encoder", policy.encoder().name());
    print_kv("States", &format_number(policy.states_seen()));
    print_kv(
        "Training steps",
        &format_number(policy.total_steps() as usize),
    );

    let base_seed = args.seed.unwrap_or(0);
    let mut rewards = Vec::with_capacity(args.episodes);

    for episode in 0..args.episodes {
        // Each episode gets its own environment seed so runs differ.
        let mut env = MazeSim::new(base_seed.wrapping_add(episode as u64));
        let stats = run_greedy_episode(&policy, &mut env, args.max_steps)?;
        if args.verbose {
            println!(
                "Episode {:3}: reward {:8.1} ({} steps)",
                episode + 1,
                stats.reward,
                stats.steps
            );
        }
        rewards.push(stats.reward);
    }

    let mean = rewards.iter().sum::<f64>() / rewards.len().max(1) as f64;
    let best = rewards.iter().copied().fold(f64::MIN, f64::max);

    print_section("Evaluation Complete");
    print_kv("Episodes", &args.episodes.to_string());
    print_kv("Mean reward", &format!("{mean:.2}"));
    print_kv("Best reward", &format!("{best:.2}"));

    Ok(())
}
