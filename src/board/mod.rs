//! Board representation and game-state types.
//!
//! Contains the core value types: players, ranks and pieces, coordinates and
//! scan directions, the grid, the per-player pools, and placement actions.

pub mod action;
pub mod coord;
pub mod piece;
pub mod state;

pub use action::{encode_or_sentinel, Action, NO_ACTION, SENTINEL_RANK};
pub use coord::{Coord, Direction, BOARD_SIZE, CELL_COUNT, PUSH_ORDER};
pub use piece::{Piece, Player, Rank};
pub use state::{Board, BoardError, GameState, Pool, Pools, POOL_CAPACITY};
