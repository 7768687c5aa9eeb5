//! Game-end detection.

use crate::board::{Board, Direction, Player, Pools, Rank, POOL_CAPACITY};
use crate::eval::lines::{three_in_a_row, AlignmentType};

/// True if `player` has won: either all eight pieces are majors on the board,
/// or three of their majors are aligned.
pub fn is_victory(board: &Board, pools: &Pools, player: Player) -> bool {
    if pools[player].is_empty() && board.count(player, Some(Rank::Major)) == POOL_CAPACITY {
        return true;
    }
    board.pieces().any(|(at, piece)| {
        piece.player == player
            && piece.rank == Rank::Major
            && Direction::ALL
                .iter()
                .any(|&dir| three_in_a_row(board, at, dir, AlignmentType::MajorOnly))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Piece, Pool};

    #[test]
    fn three_majors_win() {
        let mut board = Board::empty();
        for row in 1..4 {
            board.set(Coord::new(row, 4), Some(Piece::major(Player::B)));
        }
        let pools = Pools::new(Pool::new(8, 0), Pool::new(5, 0));
        assert!(is_victory(&board, &pools, Player::B));
        assert!(!is_victory(&board, &pools, Player::A));
    }

    #[test]
    fn three_mixed_do_not_win() {
        let mut board = Board::empty();
        board.set(Coord::new(2, 2), Some(Piece::major(Player::A)));
        board.set(Coord::new(3, 3), Some(Piece::minor(Player::A)));
        board.set(Coord::new(4, 4), Some(Piece::major(Player::A)));
        let pools = Pools::new(Pool::new(5, 0), Pool::new(8, 0));
        assert!(!is_victory(&board, &pools, Player::A));
    }

    #[test]
    fn eight_majors_on_board_win() {
        let mut board = Board::empty();
        // Spread out so no three line up.
        let cells = [(0, 0), (0, 2), (0, 4), (2, 1), (2, 5), (4, 0), (4, 3), (5, 5)];
        for (row, col) in cells {
            board.set(Coord::new(row, col), Some(Piece::major(Player::A)));
        }
        let empty = Pools::new(Pool::default(), Pool::new(8, 0));
        assert!(is_victory(&board, &empty, Player::A));
        let spare = Pools::new(Pool::new(1, 0), Pool::new(8, 0));
        assert!(!is_victory(&board, &spare, Player::A));
    }
}
