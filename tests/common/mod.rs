#![allow(dead_code)]

use rl_plan::env::{Mdp, Transition};

/// A deterministic corridor of `len` moves ending in a terminal state that pays `reward`
pub struct Chain {
    pub len: u32,
    pub reward: f64,
}

impl Mdp for Chain {
    type State = u32;
    type Action = ();

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<()> {
        if self.is_terminal(state) {
            vec![]
        } else {
            vec![()]
        }
    }

    fn transitions(&self, state: &u32, _action: &()) -> Vec<Transition<u32>> {
        let next = state + 1;
        let reward = if next == self.len { self.reward } else { 0.0 };
        vec![Transition::new(next, reward, 1.0)]
    }

    fn is_terminal(&self, state: &u32) -> bool {
        *state >= self.len
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Pick {
    Lose,
    Win,
}

/// Picking `Win` ends the episode with +1, picking `Lose` with -1
pub struct TwoChoice;

impl Mdp for TwoChoice {
    type State = u8;
    type Action = Pick;

    fn initial_state(&self) -> u8 {
        0
    }

    fn actions(&self, state: &u8) -> Vec<Pick> {
        if self.is_terminal(state) {
            vec![]
        } else {
            vec![Pick::Lose, Pick::Win]
        }
    }

    fn transitions(&self, _state: &u8, action: &Pick) -> Vec<Transition<u8>> {
        match action {
            Pick::Win => vec![Transition::new(1, 1.0, 1.0)],
            Pick::Lose => vec![Transition::new(2, -1.0, 1.0)],
        }
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state != 0
    }
}

/// A corridor of `len` cells where walking forward only succeeds 70% of the time,
/// every move costs 1 and waiting costs 2
pub struct SlipperyChain {
    pub len: u32,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Move {
    Walk,
    Wait,
}

impl Mdp for SlipperyChain {
    type State = u32;
    type Action = Move;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<Move> {
        if self.is_terminal(state) {
            vec![]
        } else {
            vec![Move::Wait, Move::Walk]
        }
    }

    fn transitions(&self, state: &u32, action: &Move) -> Vec<Transition<u32>> {
        match action {
            Move::Walk => vec![
                Transition::new(state + 1, -1.0, 0.7),
                Transition::new(*state, -1.0, 0.3),
            ],
            Move::Wait => vec![Transition::new(*state, -2.0, 1.0)],
        }
    }

    fn is_terminal(&self, state: &u32) -> bool {
        *state >= self.len
    }
}

/// An environment whose only action has no probability mass
pub struct Broken;

impl Mdp for Broken {
    type State = u8;
    type Action = u8;

    fn initial_state(&self) -> u8 {
        0
    }

    fn actions(&self, state: &u8) -> Vec<u8> {
        if *state == 0 {
            vec![0]
        } else {
            vec![]
        }
    }

    fn transitions(&self, _state: &u8, _action: &u8) -> Vec<Transition<u8>> {
        vec![Transition::new(1, 0.0, 0.0)]
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state != 0
    }
}
