//! The capability interface every rule engine implements
//!
//! Each of the seven games provides one `Rules` implementation: a single
//! source of truth for "is this move legal" and "what does applying it
//! produce". The AI layer is written once against this trait instead of
//! per-game dispatch.
//!
//! # Contract
//!
//! - `apply` is pure: it validates first, then returns a *new* state.
//!   On any error the caller's state is untouched.
//! - `legal_moves` and `apply` agree exactly: every generated move is
//!   accepted, every move outside the set is rejected.
//! - `winner` is resolved eagerly during `apply`; once it is `Some`, any
//!   further `apply` returns [`EngineError::GameOver`].
//! - Turn alternation is strict except where a rule grants an explicit
//!   extra turn (Mancala store landing, Dots-and-Boxes box completion),
//!   which is exposed as an auditable flag on the resulting state.

use std::fmt::Debug;

use rand::RngCore;

use crate::error::EngineError;
use crate::types::{GameKind, MatchResult, Outcome, Side};

/// Rule engine capability interface: move generation, move application,
/// heuristic evaluation and terminal detection for one game.
pub trait Rules {
    /// Complete game state: board, side to move, winner, move history.
    type State: Clone;
    /// Game-specific move shape (column, cell, jump path, pit index, edge).
    type Move: Clone + PartialEq + Debug;

    /// Which game this engine implements
    fn kind(&self) -> GameKind;

    /// Fresh state for a new session
    fn initial(&self) -> Self::State;

    /// The side whose move is expected next
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Terminal classification, if the game has ended
    fn winner(&self, state: &Self::State) -> Option<Outcome>;

    /// Enumerate exactly the legal moves for `side` in `state`.
    ///
    /// Includes mandatory-capture filtering for Checkers and pass moves
    /// for Othello. Empty output means the side cannot move.
    fn legal_moves(&self, state: &Self::State, side: Side) -> Vec<Self::Move>;

    /// Validate and apply a move, producing the successor state.
    ///
    /// Never mutates `state`; all side effects (flips, captures, sweeps,
    /// promotions, extra-turn flags) land on the returned value.
    fn apply(&self, state: &Self::State, mv: &Self::Move) -> Result<Self::State, EngineError>;

    /// Score a position from `side`'s perspective. Positive favors `side`.
    fn evaluate(&self, state: &Self::State, side: Side) -> i32;

    /// Whether the game has ended
    #[inline]
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.winner(state).is_some()
    }

    /// Optional normal-tier strategy override.
    ///
    /// One-ply greedy evaluation assumes the successor state is an honest
    /// scoring target, which breaks for games of hidden information:
    /// evaluating a Battleship attack after applying it would read the
    /// hidden fleet. Such games supply their own normal-tier strategy
    /// here; the default routes the controller to greedy evaluation.
    fn normal_move(
        &self,
        _state: &Self::State,
        _side: Side,
        _rng: &mut dyn RngCore,
    ) -> Option<Self::Move> {
        None
    }

    /// Optional hard-tier strategy override.
    ///
    /// Games where bounded minimax is infeasible or meaningless supply
    /// their own strategy here: Omok uses pattern-based threat search,
    /// Battleship uses hunt/target/probability-density targeting. The
    /// default returns `None`, which routes the controller to alpha-beta.
    fn hard_move(
        &self,
        _state: &Self::State,
        _side: Side,
        _rng: &mut dyn RngCore,
    ) -> Option<Self::Move> {
        None
    }
}

/// Classify a finished game from one side's perspective.
///
/// Returns `None` while the game is still running.
#[inline]
pub fn match_result<R: Rules>(rules: &R, state: &R::State, side: Side) -> Option<MatchResult> {
    rules.winner(state).map(|o| o.for_side(side))
}
