//! Ranking of promotion groups.
//!
//! When several groups are eligible at once, only one graduates. These
//! scores decide which; they carry no meaning outside that comparison.

use super::weights::GroupWeights;
use crate::board::{Board, Coord, Rank, PUSH_ORDER};
use crate::resolve::Group;

/// Scores a group on the post-push board. Higher is preferred.
pub fn score_group(board: &Board, group: &Group, w: &GroupWeights) -> f64 {
    match group {
        Group::Single(at) => score_single(board, *at, w),
        Group::Triple(cells) => score_triple(board, cells, w),
    }
}

fn score_single(board: &Board, at: Coord, w: &GroupWeights) -> f64 {
    let mut score = w.singleton_base;
    if at.is_on_border() {
        score += w.singleton_border;
    } else if at.is_central() {
        score += w.singleton_central;
    }
    if next_to_friend(board, at) {
        score += w.singleton_next_to_friend;
    }
    if is_blocking(board, at) {
        score += w.singleton_blocking;
    }
    score
}

fn score_triple(board: &Board, cells: &[Coord; 3], w: &GroupWeights) -> f64 {
    let minors = cells
        .iter()
        .filter(|&&c| board.get(c).is_some_and(|p| p.rank == Rank::Minor))
        .count();
    let mut score = w.triple_per_minor * minors as f64;
    if cells.iter().all(|c| c.is_on_border()) {
        score += w.triple_full_border;
    } else if cells.iter().any(|c| c.is_on_border()) {
        score += w.triple_partial_border;
    }
    score
}

/// True if any of the 8 neighbours belongs to the same player.
pub fn next_to_friend(board: &Board, at: Coord) -> bool {
    let Some(piece) = board.get(at) else {
        return false;
    };
    PUSH_ORDER
        .iter()
        .any(|&d| board.get(at.offset(d, 1)).is_some_and(|n| n.player == piece.player))
}

/// True if the piece sits at the open end of an opposing two-run, i.e. in
/// some direction the next two cells both hold opposing pieces.
pub fn is_blocking(board: &Board, at: Coord) -> bool {
    let Some(piece) = board.get(at) else {
        return false;
    };
    let opposing = |c: Coord| board.get(c).is_some_and(|n| n.player != piece.player);
    PUSH_ORDER
        .iter()
        .any(|&d| opposing(at.offset(d, 1)) && opposing(at.offset(d, 2)))
}
