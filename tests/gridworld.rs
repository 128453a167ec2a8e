#![cfg(feature = "gym")]

use rl_plan::{
    algo::{Mcts, MctsConfig, Rtdp, RtdpConfig},
    decay,
    env::Mdp,
    gym::{GridAction, GridWorld},
};

#[test]
fn rtdp_solves_default_grid() {
    let mut rtdp = Rtdp::seeded(
        GridWorld::default(),
        RtdpConfig {
            episodes: 300,
            epsilon_schedule: Some(Box::new(decay::Linear::new(0.5, 0.05, 50))),
            heuristic: Box::new(|_: &(usize, usize)| 1.0),
            ..Default::default()
        },
        0,
    );
    let reports = rtdp.run().unwrap();

    assert_eq!(reports.len(), 300);
    assert!(reports.iter().all(|r| r.steps < 1000));
    assert_eq!(rtdp.select_action(&(0, 2), 0.0), Ok(GridAction::Right));
    assert!(rtdp.values()[&(0, 2)] > 0.5);
}

#[test]
fn mcts_episodes_end_in_exits() {
    let config = MctsConfig {
        rollouts: 100,
        max_depth: 50,
        ..Default::default()
    };
    let mut mcts = Mcts::seeded(GridWorld::default(), config, 0);
    let reports = mcts.play(3, 200).unwrap();

    for report in reports {
        assert!(report.steps > 0 && report.steps <= 200);
        assert!(report.total_reward.abs() <= 1.0 + 0.04 * report.steps as f64);
    }
}

#[test]
fn mcts_root_visits_sum_to_rollouts() {
    let env = GridWorld::default();
    let start = env.initial_state();
    let mut mcts = Mcts::seeded(env, MctsConfig::default(), 3);
    let stats = mcts.analyze(&start).unwrap();

    assert_eq!(stats.len(), 4);
    assert_eq!(stats.iter().map(|s| s.visits).sum::<u32>(), 200);
}
