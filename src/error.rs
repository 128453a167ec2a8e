/// Errors surfaced by the planners and the transition sampler
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A planner was asked to act in a state with no legal actions.
    /// Check [`Mdp::is_terminal`](crate::env::Mdp::is_terminal) first.
    #[error("state has no legal actions")]
    NoActions,
    /// The transitions of a state-action pair do not form a usable distribution: a probability
    /// is negative or NaN, or they do not sum to a positive total
    #[error("transition probabilities must be non-negative with a positive total, got total {total}")]
    InvalidProbability { total: f64 },
    /// A decay schedule was built with parameters it cannot evaluate
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
