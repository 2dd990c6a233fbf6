//! Error taxonomy for move validation and AI search
//!
//! Every rejection is recoverable by the caller: the engine returns an
//! error and leaves the input state untouched. A malformed but well-typed
//! move never panics.

use thiserror::Error;

/// Why a structurally valid move was still illegal
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveKind {
    #[error("target is outside the board")]
    OutOfBounds,
    #[error("target cell is already occupied")]
    Occupied,
    #[error("it is not that side's turn")]
    WrongTurn,
    #[error("source pit or cell is empty")]
    EmptySource,
    #[error("no piece of the moving side at the source")]
    NotAPiece,
    #[error("destination is blocked")]
    BlockedDestination,
    #[error("placement flips no opposing discs")]
    NoFlips,
    #[error("cannot pass while a placement is available")]
    PassWithMoves,
}

/// Renju restrictions that apply to black in Omok
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenKind {
    #[error("move creates two open threes at once")]
    DoubleThree,
    #[error("move creates two fours at once")]
    DoubleFour,
    #[error("move makes a line of six or more")]
    Overline,
}

/// Unified error type for all seven rule engines and the AI layer
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Move violates basic placement/turn rules
    #[error("illegal move: {0}")]
    Illegal(IllegalMoveKind),

    /// Omok-specific Renju violation for black
    #[error("forbidden move: {0}")]
    Forbidden(ForbiddenKind),

    /// Checkers: a capture was available, quiet moves are excluded
    #[error("a capture is available and must be played")]
    MandatoryCapture,

    /// The side to move has no legal moves. The AI controller surfaces
    /// this instead of inventing a move.
    #[error("no legal moves for the side to move")]
    NoLegalMoves,

    /// Battleship: ship setup out of bounds or overlapping
    #[error("invalid ship placement")]
    InvalidPlacement,

    /// The game already has a winner; the state is frozen
    #[error("the game is already over")]
    GameOver,
}

impl EngineError {
    /// Shorthand for the common placement errors
    #[inline]
    pub fn out_of_bounds() -> Self {
        EngineError::Illegal(IllegalMoveKind::OutOfBounds)
    }

    #[inline]
    pub fn occupied() -> Self {
        EngineError::Illegal(IllegalMoveKind::Occupied)
    }

    #[inline]
    pub fn wrong_turn() -> Self {
        EngineError::Illegal(IllegalMoveKind::WrongTurn)
    }
}
