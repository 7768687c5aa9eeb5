//! Players, ranks, and pieces.
//!
//! A cell on the board is either empty or holds a `Piece`. The raw integer
//! encoding used at the host boundary is `sign(player) * rank`, so player A
//! pieces are negative and player B pieces are positive.

use serde::{Deserialize, Serialize};

/// One of the two players. Player A moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// Returns the opponent.
    pub const fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Returns the sign used in the raw cell encoding.
    pub const fn sign(self) -> i8 {
        match self {
            Player::A => -1,
            Player::B => 1,
        }
    }

    /// Returns the single-character notation abbreviation.
    pub const fn notation_char(self) -> char {
        match self {
            Player::A => 'a',
            Player::B => 'b',
        }
    }

    /// Parses a player from its single-character notation abbreviation.
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'a' => Some(Player::A),
            'b' => Some(Player::B),
            _ => None,
        }
    }
}

/// The rank of a piece. Majors push minors; minors cannot push majors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Minor = 1,
    Major = 2,
}

impl Rank {
    /// Both ranks, minor first.
    pub const ALL: [Rank; 2] = [Rank::Minor, Rank::Major];

    /// Returns the numeric rank (1 or 2).
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Parses a numeric rank.
    pub fn from_value(v: u8) -> Option<Rank> {
        match v {
            1 => Some(Rank::Minor),
            2 => Some(Rank::Major),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub player: Player,
    pub rank: Rank,
}

impl Piece {
    pub const fn new(player: Player, rank: Rank) -> Self {
        Piece { player, rank }
    }

    pub const fn minor(player: Player) -> Self {
        Piece::new(player, Rank::Minor)
    }

    pub const fn major(player: Player) -> Self {
        Piece::new(player, Rank::Major)
    }

    /// Returns the raw cell code in {-2, -1, 1, 2}.
    pub const fn code(self) -> i8 {
        self.player.sign() * self.rank as i8
    }

    /// Decodes a raw cell code. `Ok(None)` is an empty cell; codes outside
    /// {-2..=2} are rejected.
    pub fn from_code(code: i8) -> Result<Option<Piece>, i8> {
        match code {
            0 => Ok(None),
            -1 => Ok(Some(Piece::minor(Player::A))),
            -2 => Ok(Some(Piece::major(Player::A))),
            1 => Ok(Some(Piece::minor(Player::B))),
            2 => Ok(Some(Piece::major(Player::B))),
            other => Err(other),
        }
    }

    /// Returns the notation character: lowercase minor, uppercase major.
    pub fn notation_char(self) -> char {
        let c = self.player.notation_char();
        match self.rank {
            Rank::Minor => c,
            Rank::Major => c.to_ascii_uppercase(),
        }
    }

    /// Parses a piece from its notation character.
    pub fn from_notation_char(c: char) -> Option<Piece> {
        let player = Player::from_notation_char(c.to_ascii_lowercase())?;
        let rank = if c.is_ascii_uppercase() {
            Rank::Major
        } else {
            Rank::Minor
        };
        Some(Piece::new(player, rank))
    }
}
