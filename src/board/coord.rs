//! Board coordinates and directions.
//!
//! Coordinates are signed so that stepping off the board is representable;
//! `Coord::index` is the single place that turns a coordinate into an array
//! index, and it refuses anything outside the 6×6 grid.

use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const BOARD_SIZE: i8 = 6;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A (row, column) pair. Row 0 is the top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }

    /// Returns the coordinate of a row-major cell index.
    pub const fn from_index(index: usize) -> Self {
        Coord {
            row: (index / BOARD_SIZE as usize) as i8,
            col: (index % BOARD_SIZE as usize) as i8,
        }
    }

    /// Returns true if the coordinate lies inside the board.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Returns the row-major index, or `None` when off-board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }

    /// Moves `steps` times along `(d_row, d_col)`.
    #[inline]
    pub const fn offset(self, delta: (i8, i8), steps: i8) -> Coord {
        Coord {
            row: self.row + delta.0 * steps,
            col: self.col + delta.1 * steps,
        }
    }

    /// Moves `steps` times along a scan direction. Negative steps go backwards.
    #[inline]
    pub const fn step(self, direction: Direction, steps: i8) -> Coord {
        self.offset(direction.delta(), steps)
    }

    /// True for the outer ring of cells.
    pub const fn is_on_border(self) -> bool {
        self.is_valid()
            && (self.row == 0 || self.row == BOARD_SIZE - 1 || self.col == 0 || self.col == BOARD_SIZE - 1)
    }

    /// True for the four central cells (2,2), (2,3), (3,2), (3,3).
    pub const fn is_central(self) -> bool {
        self.row >= 2 && self.row <= 3 && self.col >= 2 && self.col <= 3
    }
}

/// One of the four canonical scan directions. Scanning every line in these
/// four directions covers every alignment on the board exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Diagonal towards the top-right corner.
    UpRight,
    Right,
    /// Diagonal towards the bottom-right corner.
    DownRight,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
    ];

    /// Position of the direction in `ALL`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns `(d_row, d_col)`.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Neighbour offsets in the order pushes are resolved:
/// NW, SW, W, NE, SE, E, N, S.
pub const PUSH_ORDER: [(i8, i8); 8] = [
    (-1, -1),
    (1, -1),
    (0, -1),
    (-1, 1),
    (1, 1),
    (0, 1),
    (-1, 0),
    (1, 0),
];
