//! Heuristic position evaluation.
//!
//! Scores a board from the mover's perspective by combining two parts:
//!
//! - an alignment sum, from sweeping every line in the four scan directions
//!   and scoring each run by its rank mix, its owner, and how much room it has
//!   to grow;
//! - positional differentials (mover minus opponent) over piece counts, the
//!   four central cells, the rim, and total majors including reserves.
//!
//! The sweep never looks at the same run twice: after a three-run the scan
//! skips two cells, after a two-run it skips one. Four aligned minors therefore
//! count as one three-run, not two.

use tracing::trace;

use super::lines::{
    count_minor_in_run, is_run_on_border, is_two_in_a_row_blocked, is_two_in_a_row_in_corner,
    scan_lines, three_in_a_row, two_in_a_row, AlignmentType,
};
use super::weights::{AlignmentWeights, PositionalWeights, TwoRunWeights, Weights};
use crate::board::{Board, Coord, Direction, Player, Pools, Rank};

/// The two parts of a score, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub alignment: f64,
    pub positional: f64,
}

impl ScoreBreakdown {
    /// Sum of both parts.
    pub fn raw(&self) -> f64 {
        self.alignment + self.positional
    }
}

/// Whether each side holds at least one major in reserve.
#[derive(Debug, Clone, Copy)]
struct Reserves {
    mover: bool,
    opponent: bool,
}

/// Per-player piece tallies.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    minor: i32,
    major: i32,
    minor_central: i32,
    major_central: i32,
    minor_border: i32,
    major_border: i32,
    major_total: i32,
}

impl Tally {
    fn of(board: &Board, pools: &Pools, player: Player) -> Tally {
        let mut t = Tally::default();
        for (at, piece) in board.pieces() {
            if piece.player != player {
                continue;
            }
            let (count, central, border) = match piece.rank {
                Rank::Minor => (&mut t.minor, &mut t.minor_central, &mut t.minor_border),
                Rank::Major => (&mut t.major, &mut t.major_central, &mut t.major_border),
            };
            *count += 1;
            if at.is_on_border() {
                *border += 1;
            } else if at.is_central() {
                *central += 1;
            }
        }
        t.major_total = t.major + pools[player].count(Rank::Major) as i32;
        t
    }
}

/// Scores the position for `turn`, applying normalization if configured.
pub fn score(board: &Board, pools: &Pools, turn: Player, weights: &Weights) -> f64 {
    let raw = breakdown(board, pools, turn, weights).raw();
    match weights.normalize {
        Some(limit) => raw.clamp(-limit, limit) / limit,
        None => raw,
    }
}

/// Computes the alignment and positional parts separately.
pub fn breakdown(board: &Board, pools: &Pools, turn: Player, weights: &Weights) -> ScoreBreakdown {
    let reserves = Reserves {
        mover: pools[turn].has(Rank::Major),
        opponent: pools[turn.other()].has(Rank::Major),
    };
    ScoreBreakdown {
        alignment: scan_alignments(board, turn, reserves, &weights.alignment),
        positional: positional(board, pools, turn, &weights.positional),
    }
}

fn positional(board: &Board, pools: &Pools, turn: Player, w: &PositionalWeights) -> f64 {
    let me = Tally::of(board, pools, turn);
    let them = Tally::of(board, pools, turn.other());
    let diff = |f: fn(&Tally) -> i32| (f(&me) - f(&them)) as f64;

    w.major_total * diff(|t| t.major_total)
        + w.major * diff(|t| t.major)
        + w.major_central * diff(|t| t.major_central)
        + w.major_border * diff(|t| t.major_border)
        + w.minor * diff(|t| t.minor)
        + w.minor_central * diff(|t| t.minor_central)
        + w.minor_border * diff(|t| t.minor_border)
}

/// Sweeps every line in every scan direction and sums the run scores.
fn scan_alignments(board: &Board, turn: Player, reserves: Reserves, w: &AlignmentWeights) -> f64 {
    let mut total = 0.0;
    for dir in Direction::ALL {
        for line in scan_lines(dir) {
            let mut i = 0;
            // The last cell of a line cannot start a run.
            while i + 1 < line.len() {
                let mut skip = 0;
                if let Some((value, extra)) = score_run(board, line[i], dir, turn, reserves, w) {
                    total += value;
                    skip = extra;
                }
                i += 1 + skip;
            }
        }
    }
    total
}

/// Scores the run starting at `at`, if any, and returns how many extra cells
/// the sweep should skip.
fn score_run(
    board: &Board,
    at: Coord,
    dir: Direction,
    turn: Player,
    reserves: Reserves,
    w: &AlignmentWeights,
) -> Option<(f64, usize)> {
    let piece = board.get(at)?;
    let is_mover = piece.player == turn;

    if three_in_a_row(board, at, dir, AlignmentType::MajorOnly) {
        trace!(?at, ?dir, is_mover, "three majors");
        return Some((w.three_major.pick(is_mover), 2));
    }
    if three_in_a_row(board, at, dir, AlignmentType::MinorOnly) {
        trace!(?at, ?dir, is_mover, "three minors");
        return Some((w.three_minor.pick(is_mover), 2));
    }
    if three_in_a_row(board, at, dir, AlignmentType::AnyRank) {
        let minors = count_minor_in_run(board, at, dir) as f64;
        trace!(?at, ?dir, is_mover, minors, "three mixed");
        return Some((minors * w.three_mixed_per_minor.pick(is_mover), 2));
    }

    let two_runs = [
        (AlignmentType::MajorOnly, &w.two_major),
        (AlignmentType::MinorOnly, &w.two_minor),
        (AlignmentType::AnyRank, &w.two_mixed),
    ];
    for (kind, tw) in two_runs {
        if two_in_a_row(board, at, dir, kind) {
            let value = score_two_run(board, at, dir, is_mover, reserves, tw);
            trace!(?at, ?dir, ?kind, is_mover, value, "two-run");
            return Some((value, 1));
        }
    }
    None
}

fn score_two_run(
    board: &Board,
    at: Coord,
    dir: Direction,
    is_mover: bool,
    reserves: Reserves,
    w: &TwoRunWeights,
) -> f64 {
    if is_two_in_a_row_in_corner(at, dir) {
        return w.corner.pick(is_mover);
    }
    if is_two_in_a_row_blocked(board, at, dir) {
        return w.blocked.pick(is_mover);
    }
    if is_mover {
        let border_discount = is_run_on_border(at, dir, 2, true)
            && (!w.border_needs_opponent_reserve || reserves.opponent);
        if border_discount {
            w.mover_open_on_border
        } else if reserves.mover {
            w.open_with_reserve.mover
        } else {
            w.open.mover
        }
    } else if reserves.opponent {
        w.open_with_reserve.opponent
    } else {
        w.open.opponent
    }
}
