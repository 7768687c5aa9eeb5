//! Pobo engine library.
//!
//! Exposes the board representation, move resolution, evaluation, search,
//! and protocol modules for use by integration tests and the binaries.

pub mod board;
pub mod engine;
pub mod eval;
pub mod logging;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod search;
pub mod selfplay;
