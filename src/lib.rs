/// Planning algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Markov decision process contract and transition sampling
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

pub use error::PlanError;
