//! Alignment queries along the four scan directions.
//!
//! Every query is a pure function of a read-only board. Coordinates that fall
//! off the grid never panic; they simply make the query answer `false` (or 0).
//!
//! `SCAN_LINES` holds, per direction, every maximal line of at least two cells,
//! in walking order. The heuristic sweeps these lines instead of a flat list
//! of cells so that skipping past a run never jumps onto a different line.

use std::sync::LazyLock;

use crate::board::{Board, Coord, Direction, Piece, Rank, BOARD_SIZE};

/// What makes two neighbouring pieces part of the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentType {
    /// Same owner, ranks may differ.
    AnyRank,
    /// Same owner, both minors.
    MinorOnly,
    /// Same owner, both majors.
    MajorOnly,
}

impl AlignmentType {
    #[inline]
    fn matches(self, a: Piece, b: Piece) -> bool {
        if a.player != b.player {
            return false;
        }
        match self {
            AlignmentType::AnyRank => true,
            AlignmentType::MinorOnly => a.rank == Rank::Minor && b.rank == Rank::Minor,
            AlignmentType::MajorOnly => a.rank == Rank::Major && b.rank == Rank::Major,
        }
    }
}

/// True if `at` and the next cell along `dir` both hold matching pieces.
#[inline]
pub fn two_in_a_row(board: &Board, at: Coord, dir: Direction, kind: AlignmentType) -> bool {
    match (board.get(at), board.get(at.step(dir, 1))) {
        (Some(a), Some(b)) => kind.matches(a, b),
        _ => false,
    }
}

/// True if the three cells starting at `at` along `dir` form a run.
#[inline]
pub fn three_in_a_row(board: &Board, at: Coord, dir: Direction, kind: AlignmentType) -> bool {
    two_in_a_row(board, at, dir, kind) && two_in_a_row(board, at.step(dir, 1), dir, kind)
}

/// Number of minors among the three cells starting at `at`.
///
/// Returns 0 if any of the three cells is empty or off-board.
pub fn count_minor_in_run(board: &Board, at: Coord, dir: Direction) -> usize {
    let mut minors = 0;
    for k in 0..3 {
        match board.get(at.step(dir, k)) {
            Some(p) if p.rank == Rank::Minor => minors += 1,
            Some(_) => {}
            None => return 0,
        }
    }
    minors
}

/// True if a two-run starting at `at` cannot grow in either direction: the
/// cell before it and the cell after it are each off-board or opposing.
pub fn is_two_in_a_row_blocked(board: &Board, at: Coord, dir: Direction) -> bool {
    let Some(owner) = board.get(at).map(|p| p.player) else {
        return false;
    };
    let closed = |c: Coord| !c.is_valid() || board.get(c).is_some_and(|p| p.player != owner);
    closed(at.step(dir, -1)) && closed(at.step(dir, 2))
}

/// True for the four diagonal two-runs that sit in a corner and can never
/// be extended to three.
pub fn is_two_in_a_row_in_corner(at: Coord, dir: Direction) -> bool {
    matches!(
        (dir, at.row, at.col),
        (Direction::UpRight, 1, 0)
            | (Direction::UpRight, 5, 4)
            | (Direction::DownRight, 4, 0)
            | (Direction::DownRight, 0, 4)
    )
}

/// Whether all (`fully`) or any of the `len` cells starting at `at` lie on
/// the rim. Runs that leave the board are never on the border.
pub fn is_run_on_border(at: Coord, dir: Direction, len: i8, fully: bool) -> bool {
    if !(1..=3).contains(&len) {
        return false;
    }
    let mut cells = (0..len).map(|k| at.step(dir, k));
    if fully {
        cells.all(Coord::is_on_border)
    } else {
        let run: Vec<Coord> = cells.collect();
        run.iter().all(|c| c.is_valid()) && run.iter().any(|c| c.is_on_border())
    }
}

/// Every line of at least two cells, grouped by `Direction::ALL` order.
pub static SCAN_LINES: LazyLock<[Vec<Vec<Coord>>; 4]> =
    LazyLock::new(|| Direction::ALL.map(build_lines));

/// Returns the precomputed lines for one direction.
pub fn scan_lines(dir: Direction) -> &'static [Vec<Coord>] {
    &SCAN_LINES[dir.index()]
}

fn build_lines(dir: Direction) -> Vec<Vec<Coord>> {
    let mut lines = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let start = Coord::new(row, col);
            if start.step(dir, -1).is_valid() {
                continue;
            }
            let line: Vec<Coord> = (0..BOARD_SIZE)
                .map(|k| start.step(dir, k))
                .take_while(|c| c.is_valid())
                .collect();
            if line.len() >= 2 {
                lines.push(line);
            }
        }
    }
    lines
}
