//! Muncher CLI - Tabular Q-learning toolkit for maze-chase agents
//!
//! This CLI provides a unified interface for:
//! - Training Q-learning agents with different exploration policies
//! - Playing greedy evaluation episodes with trained agents
//! - Inspecting saved agent snapshots

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "muncher")]
#[command(version, about = "Tabular Q-learning toolkit for maze-chase agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(muncher::cli::commands::train::TrainArgs),

    /// Play greedy episodes with a trained agent
    Play(muncher::cli::commands::play::PlayArgs),

    /// Inspect a trained agent snapshot
    Inspect(muncher::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => muncher::cli::commands::train::execute(args),
        Commands::Play(args) => muncher::cli::commands::play::execute(args),
        Commands::Inspect(args) => muncher::cli::commands::inspect::execute(args),
    }
}
