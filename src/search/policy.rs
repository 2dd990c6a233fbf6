//! Difficulty tiers and their per-game search parameters
//!
//! Difficulty is orthogonal to game type; this module is the one place
//! where the pair is resolved into concrete numbers. Depths are sized to
//! each game's branching factor so the hard tier stays well inside an
//! interactive time budget. Omok and Battleship carry a depth of 0 here
//! because their hard tier goes through [`Rules::hard_move`] instead of
//! alpha-beta.
//!
//! [`Rules::hard_move`]: crate::engine::Rules::hard_move

use crate::types::GameKind;

/// AI strength tier selected per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Mostly random, with a light screen against instant losses
    Easy,
    /// Greedy one-ply evaluation with randomized tie-breaking
    Normal,
    /// Bounded alpha-beta, or the game's specialized strategy
    Hard,
}

/// Resolved search parameters for one (difficulty, game) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Plies of lookahead. The easy tier searches none, the normal
    /// tier's single ply is built into its greedy evaluation, and only
    /// the hard tier feeds this value to alpha-beta.
    pub depth: u8,
    /// Easy tier: probability of skipping the instant-loss screen
    pub blunder_chance: f64,
    /// Normal tier: moves scoring within this margin of the best are
    /// tie-broken at random
    pub tie_margin: i32,
}

impl Difficulty {
    /// Resolve this tier into search parameters for `game`.
    #[must_use]
    pub fn params(self, game: GameKind) -> SearchParams {
        let depth = match game {
            GameKind::Connect4 => 7,
            GameKind::Othello => 5,
            GameKind::Checkers => 7,
            GameKind::Mancala => 8,
            GameKind::DotsAndBoxes => 5,
            // Hard tier handled by Rules::hard_move
            GameKind::Omok | GameKind::Battleship => 0,
        };

        match self {
            Difficulty::Easy => SearchParams {
                depth: 0,
                blunder_chance: 0.35,
                tie_margin: 0,
            },
            Difficulty::Normal => SearchParams {
                depth: 1,
                blunder_chance: 0.0,
                tie_margin: 50,
            },
            Difficulty::Hard => SearchParams {
                depth,
                blunder_chance: 0.0,
                tie_margin: 0,
            },
        }
    }
}
