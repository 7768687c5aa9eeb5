//! Move resolution.
//!
//! Applies a placement to a game state: the piece is written, its neighbours
//! are pushed or ejected, and at most one promotion is resolved for the mover.
//! The turn is not switched; callers that play games do that themselves.

pub mod promotion;
pub mod push;
pub mod victory;

use rand::Rng;

pub use promotion::{choose_group, find_groups, resolve_promotion, Group};
pub use push::{apply_placement, PushReport};
pub use victory::is_victory;

use crate::board::{Action, GameState, Player};
use crate::eval::weights::GroupWeights;

/// Everything one placement changed besides the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub pushes: PushReport,
    pub promoted: Option<Group>,
}

/// Applies `action` for `state.turn` in place: placement, pushes, then at most
/// one promotion.
pub fn apply(
    state: &mut GameState,
    action: Action,
    weights: &GroupWeights,
    rng: &mut impl Rng,
) -> MoveOutcome {
    let pushes = apply_placement(state, action);
    let promoted = resolve_promotion(state, weights, rng);
    MoveOutcome { pushes, promoted }
}

/// Result of playing one turn of a real game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub pushes: PushReport,
    /// Set when the placement won the game; no promotion is resolved then.
    pub winner: Option<Player>,
    pub promoted: Option<Group>,
}

/// Plays `action` as a game turn: placement and pushes, a victory check for
/// the mover, then promotion and the hand-over to the opponent. A winning
/// placement ends the game with the turn left on the winner.
pub fn play_turn(
    state: &mut GameState,
    action: Action,
    weights: &GroupWeights,
    rng: &mut impl Rng,
) -> TurnOutcome {
    let pushes = apply_placement(state, action);
    let mover = state.turn;
    if is_victory(&state.board, &state.pools, mover) {
        return TurnOutcome {
            pushes,
            winner: Some(mover),
            promoted: None,
        };
    }
    let promoted = resolve_promotion(state, weights, rng);
    state.turn = mover.other();
    TurnOutcome {
        pushes,
        winner: None,
        promoted,
    }
}
