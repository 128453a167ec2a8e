use rand::Rng;

use super::Choice;

/// Epsilon greedy exploration policy
///
/// The threshold is supplied per call, so a planner can drive it from any
/// [`Decay`](crate::decay::Decay) schedule it is configured with.
pub struct EpsilonGreedy;

impl EpsilonGreedy {
    /// Invoke epsilon greedy policy with threshold `epsilon`
    ///
    /// Consumes exactly one draw from `rng`, even when `epsilon` is 0.
    pub fn choose<R: Rng + ?Sized>(epsilon: f64, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
