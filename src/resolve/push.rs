//! Placement and push resolution.
//!
//! A placed piece pushes each of its eight neighbours whose rank does not
//! exceed its own. A pushed piece moves one cell further away if that cell is
//! empty, stays put if it is occupied, and leaves the board if it is off the
//! grid. Ejected pieces return to their owner's pool as minors. Pushes are not
//! transitive: only the eight adjacent cells are ever considered.

use tracing::{debug, warn};

use crate::board::{Action, GameState, Piece, Rank, PUSH_ORDER};

/// Summary of the pushes caused by one placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Neighbours that slid one cell away.
    pub moved: u8,
    /// Neighbours pushed off the board.
    pub ejected: u8,
}

/// Writes the mover's piece, takes it from the pool, and resolves pushes.
///
/// Legality is the caller's concern: the target cell is overwritten and a
/// missing pool piece is only logged.
pub fn apply_placement(state: &mut GameState, action: Action) -> PushReport {
    let mover = state.turn;
    let placed = Piece::new(mover, action.rank);
    let at = action.at;

    if !state.pools[mover].take(action.rank) {
        warn!(?mover, ?action, "placed piece was not in the pool");
    }
    state.board.set(at, Some(placed));

    let mut report = PushReport::default();
    for delta in PUSH_ORDER {
        let near = at.offset(delta, 1);
        let Some(neighbour) = state.board.get(near) else {
            continue;
        };
        if neighbour.rank > placed.rank {
            continue;
        }
        let far = at.offset(delta, 2);
        if !far.is_valid() {
            state.board.set(near, None);
            state.pools[neighbour.player].put(Rank::Minor);
            report.ejected += 1;
            debug!(?near, ?neighbour, "ejected");
        } else if state.board.is_free(far) {
            state.board.set(near, None);
            state.board.set(far, Some(neighbour));
            report.moved += 1;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coord, Player, Pool, Pools};

    fn state_with(pieces: &[(i8, i8, Piece)], pools: Pools, turn: Player) -> GameState {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.set(Coord::new(row, col), Some(piece));
        }
        GameState::new(board, pools, turn)
    }

    #[test]
    fn quiet_placement() {
        let mut state = GameState::initial();
        let report = apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        assert_eq!(report, PushReport::default());
        assert_eq!(state.board.get(Coord::new(2, 2)), Some(Piece::minor(Player::A)));
        assert_eq!(state.pools[Player::A].len(), 7);
        assert_eq!(state.pools[Player::B].len(), 8);
    }

    #[test]
    fn pushes_neighbour_into_empty_cell() {
        let mut state = state_with(
            &[(2, 3, Piece::minor(Player::B))],
            Pools::new(Pool::new(8, 0), Pool::new(7, 0)),
            Player::A,
        );
        let report = apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        assert_eq!(report.moved, 1);
        assert_eq!(state.board.get(Coord::new(2, 3)), None);
        assert_eq!(state.board.get(Coord::new(2, 4)), Some(Piece::minor(Player::B)));
    }

    #[test]
    fn occupied_far_cell_stops_push() {
        let b = Piece::minor(Player::B);
        let mut state = state_with(
            &[(2, 3, b), (2, 4, b)],
            Pools::new(Pool::new(8, 0), Pool::new(6, 0)),
            Player::A,
        );
        let report = apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        assert_eq!(report, PushReport::default());
        assert_eq!(state.board.get(Coord::new(2, 3)), Some(b));
        assert_eq!(state.board.get(Coord::new(2, 4)), Some(b));
    }

    #[test]
    fn minor_cannot_push_major() {
        let mut state = state_with(
            &[(1, 1, Piece::major(Player::B))],
            Pools::new(Pool::new(8, 0), Pool::new(6, 1)),
            Player::A,
        );
        apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        assert_eq!(state.board.get(Coord::new(1, 1)), Some(Piece::major(Player::B)));
    }

    #[test]
    fn ejected_major_returns_as_minor() {
        let mut state = state_with(
            &[(0, 1, Piece::major(Player::B))],
            Pools::new(Pool::new(6, 1), Pool::new(6, 1)),
            Player::A,
        );
        let report = apply_placement(&mut state, Action::new(Rank::Major, 1, 1));
        assert_eq!(report.ejected, 1);
        assert_eq!(state.board.get(Coord::new(0, 1)), None);
        assert_eq!(state.pools[Player::B], Pool::new(7, 1));
        assert_eq!(state.pools[Player::A], Pool::new(6, 0));
    }

    #[test]
    fn pushes_own_pieces_too() {
        let mut state = state_with(
            &[(3, 2, Piece::minor(Player::A))],
            Pools::new(Pool::new(7, 0), Pool::new(8, 0)),
            Player::A,
        );
        apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        assert_eq!(state.board.get(Coord::new(4, 2)), Some(Piece::minor(Player::A)));
        assert_eq!(state.board.get(Coord::new(3, 2)), None);
    }

    #[test]
    fn pushes_are_not_transitive() {
        let b = Piece::minor(Player::B);
        let mut state = state_with(
            &[(2, 1, b), (2, 0, Piece::minor(Player::A))],
            Pools::new(Pool::new(7, 0), Pool::new(7, 0)),
            Player::A,
        );
        apply_placement(&mut state, Action::new(Rank::Minor, 2, 2));
        // (2,1) is blocked by (2,0); nothing further is disturbed.
        assert_eq!(state.board.get(Coord::new(2, 1)), Some(b));
        assert_eq!(state.board.get(Coord::new(2, 0)), Some(Piece::minor(Player::A)));
    }
}
