//! The AI controller: difficulty-tiered move selection
//!
//! Per AI turn the controller runs a small state machine: gather the
//! candidate moves, evaluate them (directly for the greedy tier,
//! recursively through alpha-beta for the hard tier), then commit to one
//! move. All randomness (easy-tier sampling, tie-breaking) flows through
//! the player's own seeded RNG, so behavior is reproducible in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engine::Rules;
use crate::error::EngineError;
use crate::eval::WIN_SCORE;
use crate::search::alphabeta;
use crate::search::policy::Difficulty;
use crate::types::{Outcome, Side};

/// Above this many candidates the easy-tier loss screen is skipped;
/// scanning opponent replies for each of them stops being cheap.
const LOSS_SCREEN_LIMIT: usize = 64;

/// A computer opponent bound to one difficulty tier.
///
/// The player owns a seeded RNG; two players built with the same seed
/// choose identical moves for identical inputs.
///
/// # Example
///
/// ```
/// use parlor::games::connect4::Connect4;
/// use parlor::search::{AiPlayer, Difficulty};
/// use parlor::engine::Rules;
///
/// let rules = Connect4;
/// let state = rules.initial();
/// let mut ai = AiPlayer::with_seed(Difficulty::Hard, 7);
/// let mv = ai.choose_move(&rules, &state).unwrap();
/// assert!(rules.apply(&state, &mv).is_ok());
/// ```
pub struct AiPlayer {
    difficulty: Difficulty,
    rng: StdRng,
}

impl AiPlayer {
    /// Create a player seeded from OS entropy.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a player with a fixed seed for reproducible play.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The tier this player was built with
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Choose a move for the side to move in `state`.
    ///
    /// Never fails when at least one legal move exists. Returns
    /// [`EngineError::GameOver`] against a finished state and
    /// [`EngineError::NoLegalMoves`] when the side cannot move (the
    /// caller then applies pass or end-of-game handling).
    pub fn choose_move<R: Rules>(
        &mut self,
        rules: &R,
        state: &R::State,
    ) -> Result<R::Move, EngineError> {
        if rules.winner(state).is_some() {
            return Err(EngineError::GameOver);
        }

        let side = rules.side_to_move(state);
        let moves = rules.legal_moves(state, side);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let params = self.difficulty.params(rules.kind());
        let chosen = match self.difficulty {
            Difficulty::Easy => self.choose_easy(rules, state, side, moves, params.blunder_chance),
            Difficulty::Normal => {
                if let Some(mv) = rules.normal_move(state, side, &mut self.rng) {
                    debug!(game = ?rules.kind(), ?side, "normal move from game strategy");
                    mv
                } else {
                    self.choose_greedy(rules, state, side, moves, params.tie_margin)
                }
            }
            Difficulty::Hard => {
                if let Some(mv) = rules.hard_move(state, side, &mut self.rng) {
                    debug!(game = ?rules.kind(), ?side, "hard move from game strategy");
                    mv
                } else {
                    let result = alphabeta::search(rules, state, side, params.depth);
                    debug!(
                        game = ?rules.kind(),
                        ?side,
                        depth = params.depth,
                        nodes = result.nodes,
                        score = result.score,
                        "alpha-beta search finished"
                    );
                    match result.best_move {
                        Some(mv) => mv,
                        // Every root move errored, which the Rules
                        // contract rules out; fall back to the list.
                        None => rules.legal_moves(state, side).swap_remove(0),
                    }
                }
            }
        };

        debug!(game = ?rules.kind(), ?side, mv = ?chosen, "move chosen");
        Ok(chosen)
    }

    /// Easy tier: random legal move, usually screened against handing the
    /// opponent an immediate win.
    fn choose_easy<R: Rules>(
        &mut self,
        rules: &R,
        state: &R::State,
        side: Side,
        moves: Vec<R::Move>,
        blunder_chance: f64,
    ) -> R::Move {
        if moves.len() <= LOSS_SCREEN_LIMIT && !self.rng.random_bool(blunder_chance) {
            let safe: Vec<&R::Move> = moves
                .iter()
                .filter(|mv| !self.hands_opponent_win(rules, state, side, mv))
                .collect();
            if !safe.is_empty() {
                let idx = self.rng.random_range(0..safe.len());
                return safe[idx].clone();
            }
        }
        let idx = self.rng.random_range(0..moves.len());
        moves[idx].clone()
    }

    /// Does playing `mv` let the opponent win on their next move?
    fn hands_opponent_win<R: Rules>(
        &self,
        rules: &R,
        state: &R::State,
        side: Side,
        mv: &R::Move,
    ) -> bool {
        let Ok(next) = rules.apply(state, mv) else {
            return true;
        };
        if rules.winner(&next).is_some() {
            // Winning or drawing ourselves is never a blunder
            return false;
        }
        let opponent = side.opponent();
        if rules.side_to_move(&next) != opponent {
            return false;
        }
        rules
            .legal_moves(&next, opponent)
            .iter()
            .any(|reply| match rules.apply(&next, reply) {
                Ok(after) => rules.winner(&after) == Some(Outcome::Win(opponent)),
                Err(_) => false,
            })
    }

    /// Normal tier: one-ply evaluation of every candidate, randomized
    /// tie-breaking among near-equal scores. The tier's single ply of
    /// lookahead lives in the apply-then-score loop here, not in
    /// [`SearchParams::depth`](crate::search::SearchParams::depth).
    fn choose_greedy<R: Rules>(
        &mut self,
        rules: &R,
        state: &R::State,
        side: Side,
        moves: Vec<R::Move>,
        tie_margin: i32,
    ) -> R::Move {
        let mut scored: Vec<(R::Move, i32)> = Vec::with_capacity(moves.len());
        for mv in moves {
            let Ok(next) = rules.apply(state, &mv) else {
                continue;
            };
            let score = match rules.winner(&next) {
                Some(Outcome::Win(w)) if w == side => WIN_SCORE,
                Some(Outcome::Win(_)) => -WIN_SCORE,
                Some(Outcome::Draw) => 0,
                None => rules.evaluate(&next, side),
            };
            scored.push((mv, score));
        }

        let best = scored.iter().map(|(_, s)| *s).max().unwrap_or(0);
        let near: Vec<usize> = scored
            .iter()
            .enumerate()
            .filter(|(_, (_, s))| best - *s <= tie_margin)
            .map(|(i, _)| i)
            .collect();
        let pick = near[self.rng.random_range(0..near.len())];
        scored.swap_remove(pick).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::Connect4;
    use crate::games::mancala::Mancala;
    use crate::types::Side;

    #[test]
    fn test_rejects_finished_game() {
        let rules = Connect4;
        let mut state = rules.initial();
        // First wins in column 0 while Second shuffles in column 6
        for _ in 0..3 {
            state = rules.apply(&state, &0).unwrap();
            state = rules.apply(&state, &6).unwrap();
        }
        state = rules.apply(&state, &0).unwrap();
        assert!(rules.winner(&state).is_some());

        let mut ai = AiPlayer::with_seed(Difficulty::Normal, 1);
        assert_eq!(ai.choose_move(&rules, &state), Err(EngineError::GameOver));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let rules = Connect4;
        let state = rules.initial();
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let a = AiPlayer::with_seed(difficulty, 42).choose_move(&rules, &state).unwrap();
            let b = AiPlayer::with_seed(difficulty, 42).choose_move(&rules, &state).unwrap();
            assert_eq!(a, b, "{difficulty:?} must be reproducible");
        }
    }

    #[test]
    fn test_always_returns_legal_move() {
        let rules = Mancala;
        let state = rules.initial();
        for seed in 0..20 {
            let mut ai = AiPlayer::with_seed(Difficulty::Easy, seed);
            let mv = ai.choose_move(&rules, &state).unwrap();
            assert!(rules.legal_moves(&state, Side::First).contains(&mv));
        }
    }

    #[test]
    fn test_normal_takes_immediate_win() {
        let rules = Connect4;
        let mut state = rules.initial();
        for (mine, theirs) in [(0u8, 6u8), (1, 6), (2, 6)] {
            state = rules.apply(&state, &mine).unwrap();
            state = rules.apply(&state, &theirs).unwrap();
        }
        // Greedy must find the winning drop in column 3
        let mut ai = AiPlayer::with_seed(Difficulty::Normal, 9);
        assert_eq!(ai.choose_move(&rules, &state).unwrap(), 3);
    }

    #[test]
    fn test_easy_screens_instant_loss() {
        let rules = Connect4;
        let mut state = rules.initial();
        // First has an open three on the bottom row, Second to move.
        for (first, second) in [(0u8, 0u8), (1, 1)] {
            state = rules.apply(&state, &first).unwrap();
            state = rules.apply(&state, &second).unwrap();
        }
        state = rules.apply(&state, &2).unwrap();

        // With blunder_chance = 0.35 most seeds should block at 3.
        let blocked = (0..50)
            .filter(|&seed| {
                let mut ai = AiPlayer::with_seed(Difficulty::Easy, seed);
                ai.choose_move(&rules, &state).unwrap() == 3
            })
            .count();
        assert!(blocked > 25, "easy tier blocked only {blocked}/50 runs");
    }
}
