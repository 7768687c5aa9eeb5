//! Board, pool, and game-state representation.
//!
//! Everything here is a small `Copy` value: a board is 36 optional pieces and
//! a pool is two counters, so every simulation works on its own snapshot and
//! concurrent evaluations never share mutable state.

use std::ops::{Index, IndexMut};

use super::coord::{Coord, CELL_COUNT};
use super::piece::{Piece, Player, Rank};

/// Number of pieces each player owns. A pool never holds more than this.
pub const POOL_CAPACITY: usize = 8;

/// Errors raised when importing raw boundary data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 36 cells, got {0}")]
    WrongCellCount(usize),

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: i8 },

    #[error("invalid pool rank {0}")]
    InvalidPoolRank(u8),

    #[error("pool holds {0} pieces, more than the capacity of 8")]
    PoolOverflow(usize),
}

/// The 6×6 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [None; CELL_COUNT],
        }
    }

    /// Imports a row-major array of raw cell codes in {-2..=2}.
    pub fn from_codes(codes: &[i8]) -> Result<Self, BoardError> {
        if codes.len() != CELL_COUNT {
            return Err(BoardError::WrongCellCount(codes.len()));
        }
        let mut board = Board::empty();
        for (index, &value) in codes.iter().enumerate() {
            board.cells[index] =
                Piece::from_code(value).map_err(|value| BoardError::InvalidCell { index, value })?;
        }
        Ok(board)
    }

    /// Exports the board as raw cell codes.
    pub fn to_codes(&self) -> [i8; CELL_COUNT] {
        let mut codes = [0i8; CELL_COUNT];
        for (code, cell) in codes.iter_mut().zip(self.cells.iter()) {
            *code = cell.map_or(0, Piece::code);
        }
        codes
    }

    /// Returns the piece at `at`. Off-board coordinates read as empty.
    #[inline]
    pub fn get(&self, at: Coord) -> Option<Piece> {
        at.index().and_then(|i| self.cells[i])
    }

    /// Writes a cell. Writes to off-board coordinates are ignored.
    #[inline]
    pub fn set(&mut self, at: Coord, piece: Option<Piece>) {
        debug_assert!(at.is_valid(), "write outside the board at {at:?}");
        if let Some(i) = at.index() {
            self.cells[i] = piece;
        }
    }

    /// Places a piece. Returns false if the cell is occupied or off-board.
    pub fn place(&mut self, at: Coord, piece: Piece) -> bool {
        match at.index() {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(piece);
                true
            }
            _ => false,
        }
    }

    /// Returns true if `at` is on the board and empty.
    #[inline]
    pub fn is_free(&self, at: Coord) -> bool {
        at.index().is_some_and(|i| self.cells[i].is_none())
    }

    /// Iterates over occupied cells.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|p| (Coord::from_index(i), p)))
    }

    /// Counts a player's pieces on the board, optionally of one rank.
    pub fn count(&self, player: Player, rank: Option<Rank>) -> usize {
        self.pieces()
            .filter(|(_, p)| p.player == player && rank.map_or(true, |r| p.rank == r))
            .count()
    }

    /// Returns true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// A player's reserve of unplayed pieces.
///
/// Only the number of pieces of each rank matters to the rules, so the pool
/// is stored as two counters rather than an ordered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pool {
    minors: u8,
    majors: u8,
}

impl Pool {
    /// Creates a pool with the given counts.
    pub fn new(minors: u8, majors: u8) -> Self {
        debug_assert!(minors as usize + majors as usize <= POOL_CAPACITY);
        Pool { minors, majors }
    }

    /// The starting reserve: eight minors.
    pub fn initial() -> Self {
        Pool::new(POOL_CAPACITY as u8, 0)
    }

    /// Imports a sequence of raw ranks (1 or 2).
    pub fn from_ranks(ranks: &[u8]) -> Result<Self, BoardError> {
        if ranks.len() > POOL_CAPACITY {
            return Err(BoardError::PoolOverflow(ranks.len()));
        }
        let mut pool = Pool::default();
        for &r in ranks {
            let rank = Rank::from_value(r).ok_or(BoardError::InvalidPoolRank(r))?;
            pool.put(rank);
        }
        Ok(pool)
    }

    /// Exports the pool as raw ranks, majors first.
    pub fn to_ranks(&self) -> Vec<u8> {
        let mut ranks = vec![Rank::Major.value(); self.majors as usize];
        ranks.extend(std::iter::repeat(Rank::Minor.value()).take(self.minors as usize));
        ranks
    }

    pub fn len(&self) -> usize {
        self.minors as usize + self.majors as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pieces of the given rank.
    pub fn count(&self, rank: Rank) -> usize {
        match rank {
            Rank::Minor => self.minors as usize,
            Rank::Major => self.majors as usize,
        }
    }

    /// Returns true if at least one piece of `rank` is available.
    pub fn has(&self, rank: Rank) -> bool {
        self.count(rank) > 0
    }

    /// Removes one piece of `rank`. Returns false if none is available.
    pub fn take(&mut self, rank: Rank) -> bool {
        let slot = match rank {
            Rank::Minor => &mut self.minors,
            Rank::Major => &mut self.majors,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Adds one piece of `rank`.
    ///
    /// A player never owns more than `POOL_CAPACITY` pieces, so overflowing
    /// the pool is a rules defect rather than a runtime condition.
    pub fn put(&mut self, rank: Rank) {
        debug_assert!(self.len() < POOL_CAPACITY, "pool overflow adding {rank:?}");
        match rank {
            Rank::Minor => self.minors += 1,
            Rank::Major => self.majors += 1,
        }
    }
}

/// Both players' pools, indexable by `Player`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pools {
    pools: [Pool; 2],
}

impl Pools {
    pub fn new(a: Pool, b: Pool) -> Self {
        Pools { pools: [a, b] }
    }

    /// Both players start with eight minors.
    pub fn initial() -> Self {
        Pools::new(Pool::initial(), Pool::initial())
    }
}

impl Index<Player> for Pools {
    type Output = Pool;

    fn index(&self, player: Player) -> &Pool {
        &self.pools[player as usize]
    }
}

impl IndexMut<Player> for Pools {
    fn index_mut(&mut self, player: Player) -> &mut Pool {
        &mut self.pools[player as usize]
    }
}

/// A complete snapshot: board, reserves, and the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub pools: Pools,
    pub turn: Player,
}

impl GameState {
    pub fn new(board: Board, pools: Pools, turn: Player) -> Self {
        GameState { board, pools, turn }
    }

    /// The opening position: empty board, full pools, player A to move.
    pub fn initial() -> Self {
        GameState::new(Board::empty(), Pools::initial(), Player::A)
    }

    /// Imports the raw host representation.
    pub fn from_raw(
        codes: &[i8],
        pool_a: &[u8],
        pool_b: &[u8],
        turn: Player,
    ) -> Result<Self, BoardError> {
        Ok(GameState::new(
            Board::from_codes(codes)?,
            Pools::new(Pool::from_ranks(pool_a)?, Pool::from_ranks(pool_b)?),
            turn,
        ))
    }

    /// Total pieces a player owns on the board and in reserve.
    pub fn material(&self, player: Player) -> usize {
        self.board.count(player, None) + self.pools[player].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_codes_rejects_bad_input() {
        assert_eq!(Board::from_codes(&[0; 35]), Err(BoardError::WrongCellCount(35)));
        let mut codes = [0i8; CELL_COUNT];
        codes[7] = 3;
        assert_eq!(
            Board::from_codes(&codes),
            Err(BoardError::InvalidCell { index: 7, value: 3 })
        );
    }

    #[test]
    fn codes_roundtrip() {
        let mut codes = [0i8; CELL_COUNT];
        codes[0] = -2;
        codes[14] = 1;
        codes[35] = 2;
        let board = Board::from_codes(&codes).unwrap();
        assert_eq!(board.to_codes(), codes);
        assert_eq!(board.get(Coord::new(2, 2)), Some(Piece::minor(Player::B)));
        assert_eq!(board.count(Player::B, None), 2);
        assert_eq!(board.count(Player::A, Some(Rank::Major)), 1);
    }

    #[test]
    fn off_board_reads_empty() {
        let board = Board::empty();
        assert_eq!(board.get(Coord::new(-1, 3)), None);
        assert!(!board.is_free(Coord::new(6, 0)));
    }

    #[test]
    fn place_refuses_occupied_cell() {
        let mut board = Board::empty();
        let at = Coord::new(1, 1);
        assert!(board.place(at, Piece::minor(Player::A)));
        assert!(!board.place(at, Piece::major(Player::B)));
        assert_eq!(board.get(at), Some(Piece::minor(Player::A)));
    }

    #[test]
    fn pool_take_and_put() {
        let mut pool = Pool::initial();
        assert_eq!(pool.len(), 8);
        assert!(!pool.take(Rank::Major));
        assert!(pool.take(Rank::Minor));
        pool.put(Rank::Major);
        assert_eq!(pool.count(Rank::Minor), 7);
        assert_eq!(pool.count(Rank::Major), 1);
        assert_eq!(pool.to_ranks(), vec![2, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn pool_from_ranks_validates() {
        assert_eq!(Pool::from_ranks(&[1, 2, 2]).unwrap(), Pool::new(1, 2));
        assert_eq!(Pool::from_ranks(&[1, 3]), Err(BoardError::InvalidPoolRank(3)));
        assert_eq!(Pool::from_ranks(&[1; 9]), Err(BoardError::PoolOverflow(9)));
    }

    #[test]
    fn pools_index_by_player() {
        let mut pools = Pools::new(Pool::new(3, 0), Pool::new(0, 2));
        pools[Player::B].put(Rank::Minor);
        assert_eq!(pools[Player::A].len(), 3);
        assert_eq!(pools[Player::B], Pool::new(1, 2));
    }

    #[test]
    fn initial_material() {
        let state = GameState::initial();
        assert_eq!(state.material(Player::A), 8);
        assert_eq!(state.material(Player::B), 8);
        assert!(state.board.is_empty());
    }
}
