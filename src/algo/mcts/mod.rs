use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    env::{self, Mdp},
    error::{PlanError, Result},
    exploration::uct,
    util::{argmax, assert_discount},
};

use self::tree::{NodeId, Tree};

use super::EpisodeReport;

mod tree;

/// Configuration for the [`Mcts`] planner
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// The discount factor, must be in the interval `(0,1]`
    ///
    /// **Default**: `0.95`
    pub gamma: f64,
    /// c value for the UCT selection rule
    ///
    /// **Default**: `1.4`
    pub c_uct: f64,
    /// Number of simulations per decision
    ///
    /// **Default**: `200`
    pub rollouts: usize,
    /// Depth bound shared by tree descent and rollout
    ///
    /// **Default**: `200`
    pub max_depth: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            gamma: 0.95,
            c_uct: 1.4,
            rollouts: 200,
            max_depth: 200,
        }
    }
}

/// Visit statistics of one root action after a search
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStats<A> {
    pub action: A,
    /// Number of simulations that went through this action
    pub visits: u32,
    /// Mean discounted return of this action, 0 if it was never tried
    pub q: f64,
}

/// Monte Carlo tree search planner
///
/// Every decision grows a fresh tree from the given state: each simulation descends by UCT
/// through fully expanded nodes, adds one node, estimates it with a uniformly random rollout
/// and propagates the return back to the root. The most visited root action is played.
/// Nothing is kept between decisions.
///
/// ### Generics
/// - `M` - The [`Mdp`] to plan over
/// - `R` - The random source, owned by the planner and threaded through every sample
pub struct Mcts<M, R = StdRng> {
    mdp: M,
    gamma: f64,
    c_uct: f64,
    rollouts: usize,
    max_depth: usize,
    rng: R,
}

impl<M: Mdp> Mcts<M, StdRng> {
    /// Initialize a new `Mcts` planner with a [`StdRng`] seeded from `seed`
    pub fn seeded(mdp: M, config: MctsConfig, seed: u64) -> Self {
        Self::new(mdp, config, StdRng::seed_from_u64(seed))
    }
}

impl<M, R> Mcts<M, R>
where
    M: Mdp,
    R: Rng,
{
    /// Initialize a new `Mcts` planner
    ///
    /// **Panics** if `gamma` is not in the interval `(0,1]`
    pub fn new(mdp: M, config: MctsConfig, rng: R) -> Self {
        assert_discount(config.gamma);
        Self {
            mdp,
            gamma: config.gamma,
            c_uct: config.c_uct,
            rollouts: config.rollouts,
            max_depth: config.max_depth,
            rng,
        }
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    /// Plan one decision from `state`
    ///
    /// **Returns** the most visited root action, or the first legal action if no simulation
    /// expanded the root
    ///
    /// **Errors** if `state` has no legal actions or the environment's transitions are malformed
    pub fn search(&mut self, state: &M::State) -> Result<M::Action> {
        let stats = self.analyze(state)?;
        let best = argmax(stats.iter().map(|s| s.visits as f64)).ok_or(PlanError::NoActions)?;
        let ActionStats { action, .. } =
            stats.into_iter().nth(best).ok_or(PlanError::NoActions)?;
        Ok(action)
    }

    /// Run a search from `state` and report the statistics of every legal root action, in the
    /// order the environment lists them
    ///
    /// **Errors** if `state` has no legal actions or the environment's transitions are malformed
    pub fn analyze(&mut self, state: &M::State) -> Result<Vec<ActionStats<M::Action>>> {
        let actions = self.mdp.actions(state);
        if actions.is_empty() {
            return Err(PlanError::NoActions);
        }

        let mut tree = Tree::new(state.clone());
        for _ in 0..self.rollouts {
            self.simulate(&mut tree)?;
        }

        let root = tree.root();
        debug!(
            "MCTS search: {} simulations, {} nodes, root value {:.3}",
            self.rollouts,
            tree.len(),
            root.q()
        );

        Ok(actions
            .into_iter()
            .map(|action| {
                let (visits, q) = root
                    .child(&action)
                    .map(|id| (tree.get(id).visits, tree.get(id).q()))
                    .unwrap_or((0, 0.0));
                ActionStats { action, visits, q }
            })
            .collect())
    }

    /// Play episodes from the initial state, choosing every action with [`search`](Self::search)
    ///
    /// An episode ends at a terminal state or after `max_steps` actions.
    ///
    /// **Returns** one report per episode
    pub fn play(&mut self, episodes: usize, max_steps: usize) -> Result<Vec<EpisodeReport>> {
        let mut reports = Vec::with_capacity(episodes);
        for episode in 0..episodes {
            let mut state = self.mdp.initial_state();
            let mut steps = 0;
            let mut total_reward = 0.0;

            while !self.mdp.is_terminal(&state) && steps < max_steps {
                let action = self.search(&state)?;
                let (next_state, reward) =
                    env::sample(&self.mdp, &state, &action, &mut self.rng)?;
                total_reward += reward;
                state = next_state;
                steps += 1;
            }

            info!(
                "MCTS episode {}: steps={steps}, total_reward={total_reward:.2}",
                episode + 1
            );
            reports.push(EpisodeReport {
                episode,
                steps,
                total_reward,
            });
        }

        Ok(reports)
    }

    /// Run one selection, expansion, rollout and backpropagation pass
    fn simulate(&mut self, tree: &mut Tree<M::State, M::Action>) -> Result<()> {
        let (leaf, depth) = self.descend(tree)?;
        let ret = self.rollout(tree.get(leaf).state.clone(), depth)?;
        tree.backpropagate(leaf, ret, self.gamma);
        Ok(())
    }

    /// Walk down from the root and add at most one node
    ///
    /// **Returns** the node to roll out from and its depth
    fn descend(&mut self, tree: &mut Tree<M::State, M::Action>) -> Result<(NodeId, usize)> {
        let mut id = Tree::<M::State, M::Action>::ROOT;
        let mut depth = 0;

        while depth < self.max_depth {
            let node = tree.get(id);
            let actions = self.mdp.actions(&node.state);
            if actions.is_empty() {
                break;
            }

            let untried = actions
                .iter()
                .filter(|a| node.child(a).is_none())
                .collect::<Vec<_>>();
            if let Some(&action) = untried.choose(&mut self.rng) {
                let action = action.clone();
                let (next_state, reward) =
                    env::sample(&self.mdp, &node.state, &action, &mut self.rng)?;
                let child = tree.add_child(id, action, next_state, reward);
                return Ok((child, depth + 1));
            }

            let children = actions
                .iter()
                .filter_map(|a| node.child(a))
                .collect::<Vec<_>>();
            let total = children.iter().map(|&c| tree.get(c).visits).sum::<u32>();
            let best = argmax(children.iter().map(|&c| {
                let child = tree.get(c);
                uct(child.q(), child.visits, total, self.c_uct)
            }))
            .ok_or(PlanError::NoActions)?;

            id = children[best];
            depth += 1;
        }

        Ok((id, depth))
    }

    /// Estimate the discounted return from `state` with uniformly random actions, using the
    /// depth budget left below `depth`
    fn rollout(&mut self, mut state: M::State, depth: usize) -> Result<f64> {
        let mut ret = 0.0;
        let mut discount = 1.0;

        for _ in depth..self.max_depth {
            if self.mdp.is_terminal(&state) {
                break;
            }
            let actions = self.mdp.actions(&state);
            let Some(action) = actions.choose(&mut self.rng) else {
                break;
            };
            let (next_state, reward) = env::sample(&self.mdp, &state, action, &mut self.rng)?;
            ret += discount * reward;
            discount *= self.gamma;
            state = next_state;
        }

        Ok(ret)
    }
}
