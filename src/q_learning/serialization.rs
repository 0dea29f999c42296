//! Serialization support for trained agents.
//!
//! A [`SavedAgent`] is the one opaque record persisted per trained agent:
//! hyperparameters, exploration strategy and its parameters, the step
//! counter, both tables in full, and the identity of the state encoder that
//! produced the keys (a table is meaningless without it).

use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    features::EncoderKind,
    q_learning::{
        agent::{AgentConfig, QLearningAgent},
        exploration::ExplorationStrategy,
        policy::RestoredPolicy,
        table::StrictStore,
    },
    types::StateKey,
};

/// Persisted snapshot of a trained agent.
///
/// Round-trips exactly: restoring and re-saving reproduces a
/// value-equivalent record (map iteration order aside).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub actions: usize,
    pub discount: f64,
    pub alpha: f64,
    pub init_q: f64,
    pub strategy: ExplorationStrategy,
    pub total_steps: u64,
    q_rows: HashMap<StateKey, Vec<f64>>,
    visit_rows: HashMap<StateKey, Vec<u64>>,
    /// Identity of the state encoder that produced the table keys.
    pub encoder: String,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    /// Snapshot a live training agent.
    ///
    /// `encoder` names the feature-encoding function used during training so
    /// a restorer can resolve the matching distance function.
    pub fn from_agent(agent: &QLearningAgent, encoder: EncoderKind) -> Self {
        Self {
            version: Self::VERSION,
            actions: agent.actions(),
            discount: agent.discount(),
            alpha: agent.alpha(),
            init_q: agent.init_q(),
            strategy: agent.strategy(),
            total_steps: agent.total_steps(),
            q_rows: agent.q_rows().to_rows(),
            visit_rows: agent.visit_rows().to_rows(),
            encoder: encoder.name().to_string(),
        }
    }

    /// Re-snapshot a restored policy (save-after-restore round trip).
    pub fn from_policy(policy: &RestoredPolicy) -> Self {
        Self {
            version: Self::VERSION,
            actions: policy.actions(),
            discount: policy.discount(),
            alpha: policy.alpha(),
            init_q: policy.init_q(),
            strategy: policy.strategy(),
            total_steps: policy.total_steps(),
            q_rows: policy.q_rows.to_rows(),
            visit_rows: policy.visit_rows.to_rows(),
            encoder: policy.encoder().name().to_string(),
        }
    }

    /// Reconstruct an evaluation agent with strict (non-defaulting) tables.
    pub fn to_policy(&self) -> Result<RestoredPolicy> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported agent snapshot version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }

        let encoder = EncoderKind::from_name(&self.encoder)?;

        Ok(RestoredPolicy {
            actions: self.actions,
            discount: self.discount,
            alpha: self.alpha,
            init_q: self.init_q,
            strategy: self.strategy,
            total_steps: self.total_steps,
            encoder,
            q_rows: StrictStore::from_rows(self.actions, self.q_rows.clone()),
            visit_rows: StrictStore::from_rows(self.actions, self.visit_rows.clone()),
        })
    }

    /// Rebuild a live training agent to continue training from a snapshot.
    ///
    /// The value and count tables carry over; lookups default again, as in
    /// any live agent.
    pub fn to_training_agent(&self, seed: Option<u64>) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported agent snapshot version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        // Validate the encoder name even though a training agent does not
        // use the distance function itself.
        let _ = EncoderKind::from_name(&self.encoder)?;

        let mut agent = QLearningAgent::new(AgentConfig {
            actions: self.actions,
            discount: self.discount,
            alpha: self.alpha,
            init_q: self.init_q,
            strategy: self.strategy,
            seed,
        });
        agent.restore_tables(self.total_steps, self.q_rows.clone(), self.visit_rows.clone());
        Ok(agent)
    }

    /// Number of states in the saved value table.
    pub fn states_seen(&self) -> usize {
        self.q_rows.len()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}
