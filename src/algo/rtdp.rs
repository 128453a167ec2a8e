use std::collections::HashMap;

use log::{info, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    decay::Decay,
    env::{self, Mdp},
    error::{PlanError, Result},
    exploration::{Choice, EpsilonGreedy},
    util::{argmax, assert_discount},
};

use super::EpisodeReport;

/// Configuration for the [`Rtdp`] planner
pub struct RtdpConfig<S> {
    /// The discount factor, must be in the interval `(0,1]`
    ///
    /// **Default**: `0.95`
    pub gamma: f64,
    /// Number of trials performed by [`Rtdp::run`]
    ///
    /// **Default**: `50`
    pub episodes: usize,
    /// Step cap for a single trial
    ///
    /// **Default**: `1000`
    pub max_steps: usize,
    /// Exploration threshold as a function of the episode index, `None` for a purely greedy planner
    ///
    /// **Default**: `None`
    pub epsilon_schedule: Option<Box<dyn Decay>>,
    /// Initial value of a state the first time it is looked up, may capture its own data
    ///
    /// **Default**: `|_| 0.0`
    pub heuristic: Box<dyn Fn(&S) -> f64>,
}

impl<S> Default for RtdpConfig<S> {
    fn default() -> Self {
        Self {
            gamma: 0.95,
            episodes: 50,
            max_steps: 1000,
            epsilon_schedule: None,
            heuristic: Box::new(|_: &S| 0.0),
        }
    }
}

/// Real-time dynamic programming planner
///
/// RTDP runs simulated trials from the initial state and applies a Bellman backup only to the
/// states it actually visits, so the value table grows with the reachable part of the state
/// space instead of all of it. Actions are chosen epsilon-greedily by one-step lookahead.
///
/// ### Generics
/// - `M` - The [`Mdp`] to plan over; its model is queried, never stepped
/// - `R` - The random source, owned by the planner and threaded through every sample
pub struct Rtdp<M, R = StdRng>
where
    M: Mdp,
{
    mdp: M,
    values: HashMap<M::State, f64>,
    gamma: f64,
    episodes: usize,
    max_steps: usize,
    epsilon_schedule: Option<Box<dyn Decay>>,
    heuristic: Box<dyn Fn(&M::State) -> f64>,
    rng: R,
}

impl<M: Mdp> Rtdp<M, StdRng> {
    /// Initialize a new `Rtdp` planner with a [`StdRng`] seeded from `seed`
    pub fn seeded(mdp: M, config: RtdpConfig<M::State>, seed: u64) -> Self {
        Self::new(mdp, config, StdRng::seed_from_u64(seed))
    }
}

impl<M, R> Rtdp<M, R>
where
    M: Mdp,
    R: Rng,
{
    /// Initialize a new `Rtdp` planner
    ///
    /// **Panics** if `gamma` is not in the interval `(0,1]`
    pub fn new(mdp: M, config: RtdpConfig<M::State>, rng: R) -> Self {
        assert_discount(config.gamma);
        Self {
            mdp,
            values: HashMap::new(),
            gamma: config.gamma,
            episodes: config.episodes,
            max_steps: config.max_steps,
            epsilon_schedule: config.epsilon_schedule,
            heuristic: config.heuristic,
            rng,
        }
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    /// Get the value table
    pub fn values(&self) -> &HashMap<M::State, f64> {
        &self.values
    }

    /// Get the value of `state`, initializing it from the heuristic on first access
    pub fn value(&mut self, state: &M::State) -> f64 {
        lookup(&mut self.values, &*self.heuristic, state)
    }

    /// Apply the Bellman optimality operator to `state`
    ///
    /// V(s) ← max<sub>a</sub> Σ p · (r + γ · V(s'))
    ///
    /// Successor states seen for the first time are initialized from the heuristic.
    ///
    /// **Returns** the new value of `state`
    ///
    /// **Errors** if `state` has no legal actions or an action's transitions are malformed
    pub fn bellman_backup(&mut self, state: &M::State) -> Result<f64> {
        let Self {
            mdp,
            values,
            gamma,
            heuristic,
            ..
        } = self;

        let actions = mdp.actions(state);
        if actions.is_empty() {
            return Err(PlanError::NoActions);
        }

        let mut best = f64::NEG_INFINITY;
        for action in &actions {
            let q = env::expected_return(&*mdp, state, action, *gamma, |s| {
                lookup(values, &**heuristic, s)
            })?;
            best = best.max(q);
        }

        trace!("backup: {} actions, value {best}", actions.len());
        values.insert(state.clone(), best);
        Ok(best)
    }

    /// Choose an action in `state` epsilon-greedily
    ///
    /// With probability `epsilon` a uniformly random legal action is returned. Otherwise the
    /// action with the best one-step lookahead value is returned, ties going to the action
    /// listed first by the environment. The value table is not modified.
    ///
    /// **Errors** if `state` has no legal actions or an action's transitions are malformed
    pub fn select_action(&mut self, state: &M::State, epsilon: f64) -> Result<M::Action> {
        let actions = self.mdp.actions(state);
        if actions.is_empty() {
            return Err(PlanError::NoActions);
        }

        match EpsilonGreedy::choose(epsilon, &mut self.rng) {
            Choice::Explore => actions
                .choose(&mut self.rng)
                .cloned()
                .ok_or(PlanError::NoActions),
            Choice::Exploit => {
                let q_values = actions
                    .iter()
                    .map(|a| {
                        env::expected_return(&self.mdp, state, a, self.gamma, |s| self.peek(s))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let best = argmax(q_values).ok_or(PlanError::NoActions)?;
                Ok(actions[best].clone())
            }
        }
    }

    /// Run the configured number of trials, backing up every visited state
    ///
    /// **Returns** one report per episode
    pub fn run(&mut self) -> Result<Vec<EpisodeReport>> {
        let mut reports = Vec::with_capacity(self.episodes);
        for episode in 0..self.episodes {
            let epsilon = self
                .epsilon_schedule
                .as_ref()
                .map_or(0.0, |schedule| schedule.evaluate(episode as i64));
            let report = self.trial(episode, epsilon)?;
            info!(
                "RTDP episode {}: steps={}, total_reward={:.2}",
                episode + 1,
                report.steps,
                report.total_reward
            );
            reports.push(report);
        }

        Ok(reports)
    }

    fn trial(&mut self, episode: usize, epsilon: f64) -> Result<EpisodeReport> {
        let mut state = self.mdp.initial_state();
        let mut steps = 0;
        let mut total_reward = 0.0;

        while !self.mdp.is_terminal(&state) && steps < self.max_steps {
            self.bellman_backup(&state)?;
            let action = self.select_action(&state, epsilon)?;
            let (next_state, reward) =
                env::sample(&self.mdp, &state, &action, &mut self.rng)?;
            total_reward += reward;
            state = next_state;
            steps += 1;
        }

        Ok(EpisodeReport {
            episode,
            steps,
            total_reward,
        })
    }

    /// Value of `state` without initializing it
    fn peek(&self, state: &M::State) -> f64 {
        self.values
            .get(state)
            .copied()
            .unwrap_or_else(|| (self.heuristic)(state))
    }
}

fn lookup<S>(values: &mut HashMap<S, f64>, heuristic: &dyn Fn(&S) -> f64, state: &S) -> f64
where
    S: env::Hashable,
{
    match values.get(state) {
        Some(&v) => v,
        None => {
            let v = heuristic(state);
            values.insert(state.clone(), v);
            v
        }
    }
}
