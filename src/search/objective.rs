//! The evaluation callback a move search drives.
//!
//! An `Objective` owns one snapshot of the position being searched. Each call
//! to `score_action` copies that snapshot, plays the candidate on the copy, and
//! scores the result from the mover's point of view. The snapshot itself is
//! never modified, so one objective can be shared across threads.

use rand::Rng;

use crate::board::{Action, GameState};
use crate::eval::{self, Weights};
use crate::resolve;

/// Scores candidate actions against a fixed position.
#[derive(Debug, Clone, Copy)]
pub struct Objective<'w> {
    state: GameState,
    weights: &'w Weights,
}

impl<'w> Objective<'w> {
    pub fn new(state: GameState, weights: &'w Weights) -> Self {
        Objective { state, weights }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Simulates `action` on a copy of the position and scores the result.
    pub fn score_action(&self, action: Action, rng: &mut impl Rng) -> f64 {
        let next = simulate(&self.state, action, self.weights, rng);
        evaluate(&next, self.weights)
    }
}

/// Scores a position for the player whose turn it is.
pub fn evaluate(state: &GameState, weights: &Weights) -> f64 {
    eval::score(&state.board, &state.pools, state.turn, weights)
}

/// Returns the position after `action`, with pushes and any promotion
/// resolved. The turn is left unchanged.
pub fn simulate(
    state: &GameState,
    action: Action,
    weights: &Weights,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = *state;
    resolve::apply(&mut next, action, &weights.groups, rng);
    next
}
