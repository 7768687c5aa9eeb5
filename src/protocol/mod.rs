//! Text protocol handling.
//!
//! Implements the line-oriented engine protocol: position and action notation,
//! and the command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{
    encode_position, format_action, format_cell, parse_action, parse_position, NotationError,
    INITIAL_POSITION,
};
pub use parser::{parse_command, Command, GoParams};
