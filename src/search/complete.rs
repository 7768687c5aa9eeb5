//! Exhaustive one-ply search.
//!
//! Scores every legal action through the `Objective` in parallel and keeps the
//! best. Each candidate gets its own `SmallRng`, seeded from the caller's RNG
//! before the fan-out, so results do not depend on how rayon schedules work.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::objective::Objective;
use crate::board::{encode_or_sentinel, Action, GameState, Rank};
use crate::eval::Weights;
use crate::movegen::{legal_actions, ExclusionList};
use crate::resolve::{apply_placement, is_victory};

/// Statistics reported alongside a search result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchInfo {
    pub candidates: usize,
    pub elapsed_ms: u64,
}

/// Result of a search: the chosen action, if any, and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub action: Option<Action>,
    /// Objective value of `action`; 0 when there is none.
    pub score: f64,
    /// True if `action` wins on the spot.
    pub winning: bool,
    pub info: SearchInfo,
}

impl SearchResult {
    fn none(info: SearchInfo) -> Self {
        SearchResult {
            action: None,
            score: 0.0,
            winning: false,
            info,
        }
    }

    /// The raw `(rank, row, col)` triple, or the sentinel when nothing was found.
    pub fn encoded(&self) -> [u8; 3] {
        encode_or_sentinel(self.action)
    }
}

/// Scores each action on its own seeded RNG, in parallel.
pub fn score_actions(
    state: &GameState,
    weights: &Weights,
    actions: &[Action],
    rng: &mut impl Rng,
) -> Vec<(Action, f64)> {
    let seeds: Vec<u64> = actions.iter().map(|_| rng.gen()).collect();
    let objective = Objective::new(*state, weights);
    actions
        .par_iter()
        .zip(seeds.par_iter())
        .map(|(&action, &seed)| {
            let mut local = SmallRng::seed_from_u64(seed);
            (action, objective.score_action(action, &mut local))
        })
        .collect()
}

/// Evaluates every legal action and returns the best; ties are broken at random.
pub fn complete_search(
    state: &GameState,
    weights: &Weights,
    exclusions: &ExclusionList,
    rng: &mut impl Rng,
) -> SearchResult {
    let start = Instant::now();
    let actions = legal_actions(state, exclusions);
    let scored = score_actions(state, weights, &actions, rng);
    let info = SearchInfo {
        candidates: scored.len(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    if scored.is_empty() {
        debug!(turn = ?state.turn, "no legal action");
        return SearchResult::none(info);
    }

    let best = scored.iter().map(|&(_, s)| s).fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<Action> = scored
        .iter()
        .filter(|(_, s)| *s == best)
        .map(|(a, _)| *a)
        .collect();
    let (action, score) = match tied.len() {
        0 => {
            warn!(candidates = info.candidates, "no comparable action score, taking the first");
            scored[0]
        }
        n => (tied[rng.gen_range(0..n)], best),
    };
    debug!(?action, score, candidates = info.candidates, tied = tied.len(), "search done");

    SearchResult {
        action: Some(action),
        score,
        winning: false,
        info,
    }
}

/// Returns the `k` best legal actions, best first. Candidates tied at the
/// cut-off are ordered randomly.
pub fn preselect(
    state: &GameState,
    weights: &Weights,
    exclusions: &ExclusionList,
    k: usize,
    rng: &mut impl Rng,
) -> Vec<(Action, f64)> {
    let actions = legal_actions(state, exclusions);
    let mut scored = score_actions(state, weights, &actions, rng);
    scored.shuffle(rng);
    // Stable sort keeps the shuffled order among equal scores.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);
    scored
}

/// Finds a major placement whose pushes leave the mover with an immediate
/// win, checked before any promotion would remove the winning line.
pub fn find_winning_move(state: &GameState, exclusions: &ExclusionList) -> Option<Action> {
    legal_actions(state, exclusions)
        .into_iter()
        .filter(|a| a.rank == Rank::Major)
        .find(|&action| {
            let mut next = *state;
            apply_placement(&mut next, action);
            is_victory(&next.board, &next.pools, state.turn)
        })
}

/// Plays a winning move if one exists, otherwise the best searched action.
pub fn best_action(
    state: &GameState,
    weights: &Weights,
    exclusions: &ExclusionList,
    rng: &mut impl Rng,
) -> SearchResult {
    if let Some(action) = find_winning_move(state, exclusions) {
        debug!(?action, "winning move");
        return SearchResult {
            action: Some(action),
            score: f64::INFINITY,
            winning: true,
            info: SearchInfo::default(),
        };
    }
    complete_search(state, weights, exclusions, rng)
}
