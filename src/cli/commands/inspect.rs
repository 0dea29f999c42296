//! Inspect command - Show metadata and hyperparameters of a saved snapshot

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    q_learning::SavedAgent,
    types::StateKey,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a trained agent snapshot")]
pub struct InspectArgs {
    /// Path to a trained agent snapshot
    pub snapshot: PathBuf,

    /// Print the learned value row for a state key (e.g. "px=5|py=7")
    #[arg(long)]
    pub state: Option<String>,
}

fn parse_state_key(raw: &str) -> Result<StateKey> {
    let mut key = StateKey::new();
    for part in raw.split('|') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (name, value) = trimmed
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid state entry '{trimmed}'. Expected name=value"))?;
        // Flag fields print as true/false, so accept both forms back.
        match value.trim() {
            "true" => key.set(name.trim(), true),
            "false" => key.set(name.trim(), false),
            raw => {
                let value: i64 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid value in '{trimmed}'"))?;
                key.set(name.trim(), value);
            }
        }
    }
    Ok(key)
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = SavedAgent::load_from_file(&args.snapshot)?;
    let policy = saved.to_policy()?;

    print_section("Agent Snapshot");
    print_kv("Snapshot", &args.snapshot.display().to_string());
    print_kv("Policy", policy.strategy().name());
    print_kv("Encoder", policy.encoder().name());
    print_kv("Actions", &policy.actions().to_string());
    print_kv("Discount", &policy.discount().to_string());
    print_kv("Learning rate", &policy.alpha().to_string());
    print_kv("Initial Q", &policy.init_q().to_string());
    print_kv(
        "Training steps",
        &format_number(policy.total_steps() as usize),
    );
    print_kv("States", &format_number(policy.states_seen()));

    if let Some(ref raw) = args.state {
        let key = parse_state_key(raw)?;
        match policy.value_row(&key) {
            Some(row) => {
                let formatted: Vec<String> = row.iter().map(|q| format!("{q:.3}")).collect();
                print_kv("Q-values", &formatted.join(", "));
            }
            None => {
                println!("\nState '{key}' not present in the value table.");
            }
        }
    }

    Ok(())
}
