use rl_plan::{
    algo::{Rtdp, RtdpConfig},
    decay,
    gym::GridWorld,
};

fn main() {
    let env = GridWorld::default();
    let mut agent = Rtdp::seeded(
        env,
        RtdpConfig {
            gamma: 0.95,
            episodes: 50,
            max_steps: 1000,
            epsilon_schedule: Some(Box::new(decay::Linear::new(0.5, 0.05, 50))),
            ..Default::default()
        },
        0,
    );

    let reports = match agent.run() {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("RTDP failed: {e}");
            std::process::exit(1);
        }
    };

    for report in reports {
        println!(
            "Episode {}: steps={}, total_reward={:.2}",
            report.episode + 1,
            report.steps,
            report.total_reward
        );
    }

    let env = agent.mdp();
    for row in 0..env.height() {
        let line = (0..env.width())
            .map(|col| match agent.values().get(&(row, col)) {
                Some(v) => format!("{v:>7.3}"),
                None => format!("{:>7}", "-"),
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
}
