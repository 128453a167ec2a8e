use rl_plan::{
    algo::{Mcts, MctsConfig},
    env::Mdp,
    gym::GridWorld,
};

fn main() {
    const NUM_EPISODES: usize = 20;
    let config = MctsConfig {
        gamma: 0.95,
        c_uct: 1.4,
        rollouts: 200,
        max_depth: 200,
    };
    let max_steps = config.max_depth;
    let mut agent = Mcts::seeded(GridWorld::default(), config, 0);

    let start = agent.mdp().initial_state();
    match agent.analyze(&start) {
        Ok(stats) => {
            for s in stats {
                println!("{:?}: visits={}, q={:.3}", s.action, s.visits, s.q);
            }
        }
        Err(e) => eprintln!("MCTS failed: {e}"),
    }

    match agent.play(NUM_EPISODES, max_steps) {
        Ok(reports) => {
            for report in reports {
                println!(
                    "MCTS Episode {}: steps={}, total_reward={:.2}",
                    report.episode + 1,
                    report.steps,
                    report.total_reward
                );
            }
        }
        Err(e) => eprintln!("MCTS failed: {e}"),
    }
}
