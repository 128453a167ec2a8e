pub mod mcts;
pub mod rtdp;

pub use mcts::{ActionStats, Mcts, MctsConfig};
pub use rtdp::{Rtdp, RtdpConfig};

/// Summary of one simulated episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    /// Zero-based episode index
    pub episode: usize,
    /// Number of actions taken
    pub steps: usize,
    /// Undiscounted sum of rewards received
    pub total_reward: f64,
}
