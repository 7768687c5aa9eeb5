//! Search.
//!
//! The `Objective` is the callback surface an external solver drives. The
//! exhaustive one-ply search here drives it the same way: one evaluation per
//! candidate, and the sentinel action when nothing is legal.

pub mod complete;
pub mod objective;

pub use complete::{
    best_action, complete_search, find_winning_move, preselect, score_actions, SearchInfo,
    SearchResult,
};
pub use objective::{evaluate, simulate, Objective};
