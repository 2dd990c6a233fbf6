//! Core types shared by every game engine

use std::fmt;

/// The two players of a game.
///
/// `First` is always the side that moves first in a fresh game and maps
/// onto each game's natural color: red in Connect Four, black in Othello
/// and Omok (the Renju-restricted player), the south-moving side in
/// Checkers, the south pit row in Mancala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Stable index for per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Terminal classification of a finished game.
///
/// Stored on each game state as `winner: Option<Outcome>`; it is set
/// exactly once when the terminal condition is detected during move
/// application and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// Classify this outcome from one side's perspective.
    ///
    /// This is the enum the UI layer feeds into win/loss statistics, so
    /// consumers never have to re-derive the result from raw state.
    #[inline]
    pub fn for_side(self, side: Side) -> MatchResult {
        match self {
            Outcome::Win(w) if w == side => MatchResult::Win,
            Outcome::Win(_) => MatchResult::Loss,
            Outcome::Draw => MatchResult::Draw,
        }
    }
}

/// Result of a finished game from one player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

/// Which game a rule engine implements.
///
/// Used by the difficulty policy to resolve per-game search parameters;
/// never used for dispatch of game logic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Connect4,
    Othello,
    Omok,
    Checkers,
    Mancala,
    Battleship,
    DotsAndBoxes,
}

/// Position on a rectangular board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check signed coordinates against a square or rectangular board
    #[inline]
    pub fn in_bounds(row: i32, col: i32, rows: usize, cols: usize) -> bool {
        row >= 0 && row < rows as i32 && col >= 0 && col < cols as i32
    }

    /// Offset by a direction vector, returning `None` when out of bounds
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, rows: usize, cols: usize) -> Option<Pos> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if Pos::in_bounds(r, c, rows, cols) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
