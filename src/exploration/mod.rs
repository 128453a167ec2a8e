/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

mod epsilon_greedy;
mod upper_confidence;

pub use epsilon_greedy::EpsilonGreedy;
pub use upper_confidence::uct;
