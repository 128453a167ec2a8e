use std::collections::{HashMap, HashSet};

use strum::VariantArray;

use crate::{
    assert_interval,
    env::{Mdp, Transition},
};

/// A cell of the grid as `(row, col)`, row 0 at the top
pub type Pos = (usize, usize);

#[derive(VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GridAction {
    Up,
    Down,
    Left,
    Right,
}

impl GridAction {
    /// The two moves an agent can slip into when attempting `self`
    fn perpendicular(self) -> [GridAction; 2] {
        match self {
            GridAction::Up | GridAction::Down => [GridAction::Left, GridAction::Right],
            GridAction::Left | GridAction::Right => [GridAction::Up, GridAction::Down],
        }
    }
}

/// A stochastic grid world with walls and rewarding terminal cells
///
/// The intended move succeeds with probability `1 - slip`, otherwise the agent slips to
/// either side with probability `slip / 2` each. Moving into a wall or off the grid leaves the
/// agent in place. Entering a terminal cell pays its reward and ends the episode, entering any
/// other cell pays `step_cost`.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: usize,
    height: usize,
    start: Pos,
    walls: HashSet<Pos>,
    terminals: HashMap<Pos, f64>,
    step_cost: f64,
    slip: f64,
}

impl GridWorld {
    /// Initialize an empty deterministic grid
    ///
    /// **Panics** if `start` is off the grid
    pub fn new(width: usize, height: usize, start: Pos) -> Self {
        assert!(
            start.0 < height && start.1 < width,
            "Start {start:?} is outside of the {width}x{height} grid."
        );
        Self {
            width,
            height,
            start,
            walls: HashSet::new(),
            terminals: HashMap::new(),
            step_cost: 0.0,
            slip: 0.0,
        }
    }

    pub fn with_wall(mut self, pos: Pos) -> Self {
        self.walls.insert(pos);
        self
    }

    /// Make `pos` a terminal cell paying `reward` on entry
    pub fn with_terminal(mut self, pos: Pos, reward: f64) -> Self {
        self.terminals.insert(pos, reward);
        self
    }

    pub fn with_step_cost(mut self, step_cost: f64) -> Self {
        self.step_cost = step_cost;
        self
    }

    /// **Panics** if `slip` is not in the interval `[0,1]`
    pub fn with_slip(mut self, slip: f64) -> Self {
        assert_interval!(slip, 0.0, 1.0);
        self.slip = slip;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell reached by moving from `pos` in direction `action`
    fn shift(&self, (row, col): Pos, action: GridAction) -> Pos {
        let next = match action {
            GridAction::Up if row > 0 => (row - 1, col),
            GridAction::Down if row + 1 < self.height => (row + 1, col),
            GridAction::Left if col > 0 => (row, col - 1),
            GridAction::Right if col + 1 < self.width => (row, col + 1),
            _ => return (row, col),
        };

        if self.walls.contains(&next) {
            (row, col)
        } else {
            next
        }
    }
}

impl Default for GridWorld {
    /// The classic 4x3 grid: a wall in the middle, a +1 exit in the top right corner and a -1
    /// exit right below it
    fn default() -> Self {
        GridWorld::new(4, 3, (2, 0))
            .with_wall((1, 1))
            .with_terminal((0, 3), 1.0)
            .with_terminal((1, 3), -1.0)
            .with_step_cost(-0.04)
            .with_slip(0.2)
    }
}

impl Mdp for GridWorld {
    type State = Pos;
    type Action = GridAction;

    fn initial_state(&self) -> Self::State {
        self.start
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            vec![]
        } else {
            GridAction::VARIANTS.to_vec()
        }
    }

    fn transitions(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<Transition<Self::State>> {
        let [side_a, side_b] = action.perpendicular();
        let moves = [
            (*action, 1.0 - self.slip),
            (side_a, self.slip / 2.0),
            (side_b, self.slip / 2.0),
        ];

        let mut transitions: Vec<Transition<Pos>> = Vec::with_capacity(3);
        for (direction, probability) in moves {
            if probability <= 0.0 {
                continue;
            }
            let next = self.shift(*state, direction);
            match transitions.iter_mut().find(|t| t.next_state == next) {
                Some(t) => t.probability += probability,
                None => {
                    let reward = self.terminals.get(&next).copied().unwrap_or(self.step_cost);
                    transitions.push(Transition::new(next, reward, probability));
                }
            }
        }

        transitions
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        self.terminals.contains_key(state)
    }
}
