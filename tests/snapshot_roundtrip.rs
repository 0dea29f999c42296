use muncher::{
    AgentConfig, EncoderKind, ExplorationStrategy, QLearningAgent, SavedAgent, StateKey,
};

fn trained_agent() -> QLearningAgent {
    let mut agent = QLearningAgent::new(AgentConfig {
        actions: 4,
        discount: 0.99,
        alpha: 0.1,
        init_q: 5.0,
        strategy: ExplorationStrategy::EpsGreedy {
            eps_start: 1.0,
            eps_end: 0.05,
            decay_steps: 100.0,
        },
        seed: Some(11),
    });

    let a = StateKey::new().with("px", 1).with("py", 2);
    let b = StateKey::new().with("px", 3).with("py", 4);
    for _ in 0..50 {
        agent.update(&a, 1, 1.0, &b, false);
        agent.update(&b, 2, -1.0, &a, true);
    }
    agent
}

#[test]
fn snapshot_file_roundtrip_preserves_values() {
    let agent = trained_agent();
    let saved = SavedAgent::from_agent(&agent, EncoderKind::Coarse);
    let original = saved.to_policy().unwrap();

    let dir = std::env::temp_dir().join("muncher-snapshot-roundtrip");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("agent.msgpack");

    saved.save_to_file(&path).unwrap();
    let loaded = SavedAgent::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.states_seen(), agent.states_seen());

    let policy = loaded.to_policy().unwrap();
    assert_eq!(policy.encoder(), EncoderKind::Coarse);
    assert_eq!(policy.total_steps(), agent.total_steps());

    let a = StateKey::new().with("px", 1).with("py", 2);
    assert_eq!(policy.value_row(&a), original.value_row(&a));
    assert_eq!(policy.count_row(&a), original.count_row(&a));
}

#[test]
fn restored_agent_resumes_training() {
    let agent = trained_agent();
    let saved = SavedAgent::from_agent(&agent, EncoderKind::Sector);

    let mut resumed = saved.to_training_agent(Some(99)).unwrap();
    assert_eq!(resumed.total_steps(), agent.total_steps());
    assert_eq!(resumed.states_seen(), agent.states_seen());

    // Further updates keep learning from the restored values.
    let a = StateKey::new().with("px", 1).with("py", 2);
    let b = StateKey::new().with("px", 3).with("py", 4);
    let before = saved.to_policy().unwrap().value_row(&a).unwrap()[1];
    resumed.update(&a, 1, 1.0, &b, false);
    let after = SavedAgent::from_agent(&resumed, EncoderKind::Sector)
        .to_policy()
        .unwrap()
        .value_row(&a)
        .unwrap()[1];
    assert_ne!(before, after);
}

#[test]
fn restored_policy_approximates_unknown_states() {
    let agent = trained_agent();
    let saved = SavedAgent::from_agent(&agent, EncoderKind::Coarse);
    let policy = saved.to_policy().unwrap();

    let unknown = StateKey::new().with("px", 100).with("py", 100);
    assert!(policy.value_row(&unknown).is_none());

    // Falls back to the nearest stored state rather than failing.
    let action = policy.action_for(&unknown).unwrap();
    assert!(action < 4);
}
