//! Placement actions.
//!
//! An action is the only kind of move in the game: take a piece of some rank
//! from the mover's pool and put it on an empty cell. At the solver boundary
//! actions travel as raw `(rank, row, col)` triples, with `(42, 0, 0)`
//! standing for "no move found".

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::piece::Rank;

/// Raw rank value of the sentinel action.
pub const SENTINEL_RANK: u8 = 42;

/// Raw triple returned when a search finds no legal action.
pub const NO_ACTION: [u8; 3] = [SENTINEL_RANK, 0, 0];

/// Place a piece of `rank` at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub rank: Rank,
    pub at: Coord,
}

impl Action {
    /// `row` and `col` must lie on the board; checked in debug builds only.
    /// Use [`Action::decode`] for untrusted input.
    pub const fn new(rank: Rank, row: i8, col: i8) -> Self {
        let at = Coord::new(row, col);
        debug_assert!(at.is_valid(), "action cell off the board");
        Action { rank, at }
    }

    /// Returns the raw `(rank, row, col)` triple.
    pub fn encode(self) -> [u8; 3] {
        debug_assert!(self.at.is_valid(), "action cell off the board");
        [self.rank.value(), self.at.row as u8, self.at.col as u8]
    }

    /// Decodes a raw triple. The sentinel and anything outside the action
    /// space decode to `None`.
    pub fn decode(raw: [u8; 3]) -> Option<Action> {
        let rank = Rank::from_value(raw[0])?;
        let at = Coord::new(i8::try_from(raw[1]).ok()?, i8::try_from(raw[2]).ok()?);
        at.is_valid().then_some(Action { rank, at })
    }
}

/// Encodes an optional search result, using the sentinel for `None`.
pub fn encode_or_sentinel(action: Option<Action>) -> [u8; 3] {
    action.map_or(NO_ACTION, Action::encode)
}
