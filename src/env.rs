use std::hash::Hash;

use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};

use crate::error::{PlanError, Result};

/// A trait for state and action types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Clone + Eq + Hash {}

impl<T> Hashable for T where T: Clone + Eq + Hash {}

/// One stochastic outcome of applying an action in a state
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub next_state: S,
    pub reward: f64,
    pub probability: f64,
}

impl<S> Transition<S> {
    pub fn new(next_state: S, reward: f64, probability: f64) -> Self {
        Self {
            next_state,
            reward,
            probability,
        }
    }
}

/// Represents a Markov decision process with a known model, defining the dynamics of an
/// environment in which a planner can look ahead.
///
/// Unlike a simulator, an `Mdp` is queried by state rather than stepped, so a planner can
/// evaluate any state it has reached in its own search without disturbing the environment.
///
/// `actions(s)` must be empty exactly when `is_terminal(s)` is true. Breaking that rule is a
/// bug in the environment, and the planners will report [`PlanError::NoActions`] when they
/// trip over it.
pub trait Mdp {
    /// A representation of a configuration of the environment
    type State: Hashable;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Hashable;

    /// The state every episode starts from
    fn initial_state(&self) -> Self::State;

    /// Get the legal actions in `state`, in a stable order
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Get every outcome of taking `action` in `state`
    ///
    /// Probabilities must be non-negative with a positive total, and should sum to 1.
    fn transitions(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<Transition<Self::State>>;

    /// Determine if `state` ends an episode
    fn is_terminal(&self, state: &Self::State) -> bool;
}

/// Fetch the transitions of `(state, action)`, failing if a probability is negative or they do
/// not have a positive total
fn checked_transitions<M: Mdp>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
) -> Result<(Vec<Transition<M::State>>, f64)> {
    let transitions = mdp.transitions(state, action);
    let total: f64 = transitions.iter().map(|t| t.probability).sum();
    // also rejects NaN
    if !(total > 0.0) || transitions.iter().any(|t| !(t.probability >= 0.0)) {
        return Err(PlanError::InvalidProbability { total });
    }
    Ok((transitions, total))
}

/// Sample one outcome of taking `action` in `state`
///
/// Consumes exactly one draw from `rng`, so the result is fully determined by the state of
/// `rng` and the probabilities declared by the environment.
///
/// **Returns** `(next_state, reward)`
///
/// **Errors** if `state` has no legal actions, or if a transition probability is negative or
/// they do not sum to a positive total
pub fn sample<M, R>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
    rng: &mut R,
) -> Result<(M::State, f64)>
where
    M: Mdp,
    R: Rng + ?Sized,
{
    if mdp.actions(state).is_empty() {
        return Err(PlanError::NoActions);
    }

    let (mut transitions, total) = checked_transitions(mdp, state, action)?;
    let dist = WeightedIndex::new(transitions.iter().map(|t| t.probability))
        .map_err(|_| PlanError::InvalidProbability { total })?;
    let Transition {
        next_state, reward, ..
    } = transitions.swap_remove(dist.sample(rng));

    Ok((next_state, reward))
}

/// One-step lookahead value of taking `action` in `state`
///
/// Q(s,a) = Σ p · (r + γ · v(s'))
///
/// `value` is queried once per outcome to estimate the value of the next state.
///
/// **Errors** if a transition probability is negative or they do not sum to a positive total
pub fn expected_return<M, F>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
    gamma: f64,
    mut value: F,
) -> Result<f64>
where
    M: Mdp,
    F: FnMut(&M::State) -> f64,
{
    let (transitions, _) = checked_transitions(mdp, state, action)?;
    Ok(transitions
        .iter()
        .map(|t| t.probability * (t.reward + gamma * value(&t.next_state)))
        .sum())
}
