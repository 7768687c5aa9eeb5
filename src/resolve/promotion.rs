//! Promotion (graduation) of aligned pieces.
//!
//! After pushes settle, the mover may graduate one group: either any three of
//! their pieces aligned in a scan direction, or, once their pool is empty, any
//! single piece. The group leaves the board and the mover gains one major in
//! reserve per removed cell. At most one group graduates per placement.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Coord, Direction, GameState, Player, Pools, Rank};
use crate::eval::groups::score_group;
use crate::eval::lines::{three_in_a_row, AlignmentType};
use crate::eval::weights::GroupWeights;

/// Cells eligible to graduate together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Single(Coord),
    Triple([Coord; 3]),
}

impl Group {
    /// The group's cells, in scan order for triples.
    pub fn cells(&self) -> &[Coord] {
        match self {
            Group::Single(at) => std::slice::from_ref(at),
            Group::Triple(cells) => cells,
        }
    }
}

/// Lists every group the mover could graduate.
///
/// Overlapping runs are reported separately, so four aligned pieces yield two
/// triples. Triples are reported in any rank combination.
pub fn find_groups(board: &Board, pools: &Pools, turn: Player) -> Vec<Group> {
    let singles = pools[turn].is_empty();
    let mut groups = Vec::new();
    for (at, piece) in board.pieces() {
        if piece.player != turn {
            continue;
        }
        if singles {
            groups.push(Group::Single(at));
        }
        for dir in Direction::ALL {
            if three_in_a_row(board, at, dir, AlignmentType::AnyRank) {
                groups.push(Group::Triple([at, at.step(dir, 1), at.step(dir, 2)]));
            }
        }
    }
    groups
}

/// Picks the best-scoring group; ties are broken uniformly at random.
///
/// A lone candidate is returned without drawing from `rng`. When no score
/// compares equal to the maximum (all NaN) the first group is taken.
pub fn choose_group(
    board: &Board,
    groups: &[Group],
    weights: &GroupWeights,
    rng: &mut impl Rng,
) -> Option<Group> {
    match groups {
        [] => None,
        [only] => Some(*only),
        _ => {
            let scores: Vec<f64> = groups.iter().map(|g| score_group(board, g, weights)).collect();
            let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let tied: Vec<Group> = groups
                .iter()
                .zip(&scores)
                .filter(|(_, s)| **s == best)
                .map(|(g, _)| *g)
                .collect();
            if tied.is_empty() {
                warn!(candidates = groups.len(), "no comparable group score, taking the first");
                return Some(groups[0]);
            }
            let idx = rng.gen_range(0..tied.len());
            Some(tied[idx])
        }
    }
}

/// Finds, chooses, and applies at most one promotion for the mover.
///
/// Returns the group that graduated, if any.
pub fn resolve_promotion(
    state: &mut GameState,
    weights: &GroupWeights,
    rng: &mut impl Rng,
) -> Option<Group> {
    let groups = find_groups(&state.board, &state.pools, state.turn);
    let chosen = choose_group(&state.board, &groups, weights, rng)?;
    for &at in chosen.cells() {
        state.board.set(at, None);
        state.pools[state.turn].put(Rank::Major);
    }
    debug!(turn = ?state.turn, group = ?chosen, candidates = groups.len(), "promotion");
    Some(chosen)
}
