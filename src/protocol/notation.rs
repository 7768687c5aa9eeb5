//! Position and action notation.
//!
//! A position is written on one line as `<rows>;<poolA>;<poolB>;<turn>`:
//!
//! - `rows`: six ranks from the top row down, separated by `/`. Digits stand
//!   for runs of empty cells, `a`/`A` for player A minors/majors and `b`/`B`
//!   for player B.
//! - `poolA`, `poolB`: the reserve as a string of ranks (`1` or `2`), or `-`
//!   when empty.
//! - `turn`: `a` or `b`.
//!
//! The opening position is `6/6/6/6/6/6;11111111;11111111;a`.
//!
//! An action is `<rank><file><row>`, e.g. `1c4`: rank 1 or 2, file `a`-`f`
//! for columns 0-5, and row label `1`-`6` counted from the bottom, so label
//! `6` is row 0. The sentinel prints as `none`.

use std::fmt;

use crate::board::{
    Action, Board, Coord, GameState, Piece, Player, Pool, Pools, Rank, BOARD_SIZE, POOL_CAPACITY,
};

/// Errors that can occur while parsing notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 4 sections separated by ';', got {0}")]
    WrongSectionCount(usize),

    #[error("expected 6 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} covers {len} cells instead of 6")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("invalid pool rank character: '{0}'")]
    InvalidPoolRank(char),

    #[error("pool holds {0} pieces, more than the capacity of 8")]
    PoolOverflow(usize),

    #[error("player {player} owns {count} pieces on board and in reserve, more than 8")]
    TooManyPieces { player: char, count: usize },

    #[error("invalid turn: '{0}'")]
    InvalidTurn(String),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),
}

/// Notation of the opening position.
pub const INITIAL_POSITION: &str = "6/6/6/6/6/6;11111111;11111111;a";

/// Parses a position string.
pub fn parse_position(s: &str) -> Result<GameState, NotationError> {
    let sections: Vec<&str> = s.trim().split(';').collect();
    if sections.len() != 4 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }
    let board = parse_board(sections[0])?;
    let pools = Pools::new(parse_pool(sections[1])?, parse_pool(sections[2])?);
    let turn = parse_turn(sections[3])?;
    let state = GameState::new(board, pools, turn);
    for player in Player::ALL {
        let count = state.material(player);
        if count > POOL_CAPACITY {
            return Err(NotationError::TooManyPieces {
                player: player.notation_char(),
                count,
            });
        }
    }
    Ok(state)
}

fn parse_board(s: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(NotationError::WrongRowCount(rows.len()));
    }
    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0usize;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10) {
                col += run as usize;
                continue;
            }
            let piece = Piece::from_notation_char(c).ok_or(NotationError::InvalidPiece(c))?;
            if col < BOARD_SIZE as usize {
                board.set(Coord::new(row as i8, col as i8), Some(piece));
            }
            col += 1;
        }
        if col != BOARD_SIZE as usize {
            return Err(NotationError::WrongRowLength { row, len: col });
        }
    }
    Ok(board)
}

fn parse_pool(s: &str) -> Result<Pool, NotationError> {
    if s == "-" {
        return Ok(Pool::default());
    }
    let count = s.chars().count();
    if count > POOL_CAPACITY {
        return Err(NotationError::PoolOverflow(count));
    }
    let mut pool = Pool::default();
    for c in s.chars() {
        let rank = c
            .to_digit(10)
            .and_then(|d| Rank::from_value(d as u8))
            .ok_or(NotationError::InvalidPoolRank(c))?;
        pool.put(rank);
    }
    Ok(pool)
}

fn parse_turn(s: &str) -> Result<Player, NotationError> {
    let mut chars = s.chars();
    match (chars.next().and_then(Player::from_notation_char), chars.next()) {
        (Some(player), None) => Ok(player),
        _ => Err(NotationError::InvalidTurn(s.to_string())),
    }
}

/// Encodes a position. Parsing the result gives back an equal state.
pub fn encode_position(state: &GameState) -> String {
    let mut out = String::with_capacity(48);
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..BOARD_SIZE {
            match state.board.get(Coord::new(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.notation_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    for player in Player::ALL {
        out.push(';');
        out.push_str(&encode_pool(&state.pools[player]));
    }
    out.push(';');
    out.push(state.turn.notation_char());
    out
}

fn encode_pool(pool: &Pool) -> String {
    if pool.is_empty() {
        return "-".to_string();
    }
    pool.to_ranks().iter().map(|r| r.to_string()).collect()
}

/// Parses an action such as `2e1`.
pub fn parse_action(s: &str) -> Result<Action, NotationError> {
    let invalid = || NotationError::InvalidAction(s.to_string());
    let bytes = s.as_bytes();
    if bytes.len() != 3 {
        return Err(invalid());
    }
    let rank = Rank::from_value(bytes[0].wrapping_sub(b'0')).ok_or_else(invalid)?;
    let col = bytes[1].wrapping_sub(b'a');
    let label = bytes[2].wrapping_sub(b'0');
    if col >= BOARD_SIZE as u8 || !(1..=BOARD_SIZE as u8).contains(&label) {
        return Err(invalid());
    }
    Ok(Action::new(rank, BOARD_SIZE - label as i8, col as i8))
}

/// Formats a cell as file and row label, e.g. `c4` for (2, 2).
pub fn format_cell(at: Coord) -> String {
    let file = (b'a' + at.col as u8) as char;
    format!("{}{}", file, BOARD_SIZE - at.row)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.value(), format_cell(self.at))
    }
}

/// Formats a search result, writing `none` for the sentinel.
pub fn format_action(action: Option<Action>) -> String {
    match action {
        Some(a) => a.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_roundtrip() {
        let state = parse_position(INITIAL_POSITION).unwrap();
        assert_eq!(state, GameState::initial());
        assert_eq!(encode_position(&state), INITIAL_POSITION);
    }

    #[test]
    fn midgame_position_roundtrip() {
        let text = "A5/1b2B1/6/2aa2/6/5b;11111;-;b";
        let state = parse_position(text).unwrap();
        assert_eq!(state.board.get(Coord::new(0, 0)), Some(Piece::major(Player::A)));
        assert_eq!(state.board.get(Coord::new(1, 1)), Some(Piece::minor(Player::B)));
        assert_eq!(state.board.get(Coord::new(1, 4)), Some(Piece::major(Player::B)));
        assert_eq!(state.board.get(Coord::new(5, 5)), Some(Piece::minor(Player::B)));
        assert!(state.pools[Player::B].is_empty());
        assert_eq!(state.turn, Player::B);
        assert_eq!(encode_position(&state), text);
    }

    #[test]
    fn pools_list_majors_first() {
        let state = parse_position("6/6/6/6/6/6;1211;-;a").unwrap();
        assert_eq!(state.pools[Player::A], Pool::new(3, 1));
        assert!(encode_position(&state).contains(";2111;"));
    }

    #[test]
    fn malformed_positions() {
        assert_eq!(
            parse_position("6/6/6/6/6;-;-;a"),
            Err(NotationError::WrongRowCount(5))
        );
        assert_eq!(
            parse_position("6/6/6/6/6/6;-;-"),
            Err(NotationError::WrongSectionCount(3))
        );
        assert_eq!(
            parse_position("6/6/5x/6/6/6;-;-;a"),
            Err(NotationError::InvalidPiece('x'))
        );
        assert_eq!(
            parse_position("6/6/3a3/6/6/6;-;-;a"),
            Err(NotationError::WrongRowLength { row: 2, len: 7 })
        );
        assert_eq!(
            parse_position("6/6/6/6/6/6;13;-;a"),
            Err(NotationError::InvalidPoolRank('3'))
        );
        assert_eq!(
            parse_position("6/6/6/6/6/6;111111111;-;a"),
            Err(NotationError::PoolOverflow(9))
        );
        assert_eq!(
            parse_position("6/6/6/6/6/6;-;-;c"),
            Err(NotationError::InvalidTurn("c".to_string()))
        );
    }

    #[test]
    fn board_and_pool_share_the_piece_limit() {
        assert_eq!(
            parse_position("1a4/6/6/6/6/6;11111111;11111111;b"),
            Err(NotationError::TooManyPieces {
                player: 'a',
                count: 9
            })
        );
        assert_eq!(
            parse_position("6/6/6/6/bB4/6;1;1111111;a"),
            Err(NotationError::TooManyPieces {
                player: 'b',
                count: 9
            })
        );
        let full = parse_position("aaaa2/AAAA2/6/6/6/6;-;11111111;b").unwrap();
        assert_eq!(full.material(Player::A), 8);
    }

    #[test]
    fn action_notation() {
        let action = parse_action("1c4").unwrap();
        assert_eq!(action, Action::new(Rank::Minor, 2, 2));
        assert_eq!(action.to_string(), "1c4");
        assert_eq!(parse_action("2a6").unwrap(), Action::new(Rank::Major, 0, 0));
        assert_eq!(parse_action("2f1").unwrap(), Action::new(Rank::Major, 5, 5));
        assert_eq!(format_action(None), "none");
    }

    #[test]
    fn malformed_actions() {
        for bad in ["", "1c", "3c4", "1g4", "1c0", "1c7", "1c44", "none"] {
            assert_eq!(
                parse_action(bad),
                Err(NotationError::InvalidAction(bad.to_string())),
                "{bad}"
            );
        }
    }
}
