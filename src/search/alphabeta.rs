//! Bounded-depth minimax with alpha-beta pruning, generic over [`Rules`]
//!
//! One searcher serves every game with a tractable branching factor
//! (Connect Four, Othello, Checkers, Mancala, Dots-and-Boxes). Whether a
//! node maximizes or minimizes is decided by comparing the side to move
//! against the root side rather than by ply parity, so extra-turn rules
//! (Mancala store landings, Dots-and-Boxes box completions) search
//! correctly: two consecutive max nodes are simply two moves by the same
//! player.
//!
//! The depth bound guarantees a move is returned in bounded time; there
//! is no unbounded deepening anywhere in the engine.

use crate::engine::Rules;
use crate::eval::WIN_SCORE;
use crate::types::{Outcome, Side};

/// Alpha-beta bounds safely beyond any terminal score
const INF: i32 = WIN_SCORE * 2;

/// Result of a bounded search from the root position
#[derive(Debug, Clone)]
pub struct SearchOutcome<M> {
    /// Best move found; `None` only when the root has no legal moves
    pub best_move: Option<M>,
    /// Score of the best line from the root side's perspective
    pub score: i32,
    /// Nodes visited, for diagnostics
    pub nodes: u64,
}

/// Search `depth` plies ahead for the best move by `side`.
///
/// Terminal positions score `±WIN_SCORE` adjusted by remaining depth so
/// the searcher prefers faster wins and slower losses.
#[must_use]
pub fn search<R: Rules>(rules: &R, state: &R::State, side: Side, depth: u8) -> SearchOutcome<R::Move> {
    let depth = depth.max(1);
    let moves = rules.legal_moves(state, side);
    let mut nodes = 1u64;

    let mut best_move = None;
    let mut best_score = -INF;
    let mut alpha = -INF;

    for mv in moves {
        let Ok(child) = rules.apply(state, &mv) else {
            // legal_moves and apply agree by contract; skip defensively
            continue;
        };
        let score = alphabeta(rules, &child, depth - 1, alpha, INF, side, &mut nodes);
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
            alpha = alpha.max(score);
        }
    }

    SearchOutcome {
        best_move,
        score: best_score,
        nodes,
    }
}

fn alphabeta<R: Rules>(
    rules: &R,
    state: &R::State,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    root: Side,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if let Some(outcome) = rules.winner(state) {
        return terminal_score(outcome, root, depth);
    }
    if depth == 0 {
        return rules.evaluate(state, root);
    }

    let mover = rules.side_to_move(state);
    let moves = rules.legal_moves(state, mover);
    if moves.is_empty() {
        // Games resolve stalemates into `winner` at apply time; an empty
        // set here is a leaf for search purposes.
        return rules.evaluate(state, root);
    }

    let maximizing = mover == root;
    let mut best = if maximizing { -INF } else { INF };

    for mv in &moves {
        let Ok(child) = rules.apply(state, mv) else {
            continue;
        };
        let score = alphabeta(rules, &child, depth - 1, alpha, beta, root, nodes);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

#[inline]
fn terminal_score(outcome: Outcome, root: Side, depth_left: u8) -> i32 {
    match outcome {
        Outcome::Win(w) if w == root => WIN_SCORE + depth_left as i32,
        Outcome::Win(_) => -(WIN_SCORE + depth_left as i32),
        Outcome::Draw => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::Connect4;
    use crate::games::mancala::Mancala;

    #[test]
    fn test_finds_immediate_connect4_win() {
        let rules = Connect4;
        let mut state = rules.initial();
        // First: three in a row at the bottom of columns 0-2,
        // Second: stacked in column 6.
        for (mine, theirs) in [(0u8, 6u8), (1, 6), (2, 6)] {
            state = rules.apply(&state, &mine).unwrap();
            state = rules.apply(&state, &theirs).unwrap();
        }
        let result = search(&rules, &state, Side::First, 3);
        assert_eq!(result.best_move, Some(3));
        assert!(result.score >= WIN_SCORE);
    }

    #[test]
    fn test_blocks_immediate_connect4_loss() {
        let rules = Connect4;
        let mut state = rules.initial();
        // First threatens columns 0-2 on the bottom row; Second to move.
        for (first, second) in [(0u8, 0u8), (1, 1)] {
            state = rules.apply(&state, &first).unwrap();
            state = rules.apply(&state, &second).unwrap();
        }
        state = rules.apply(&state, &2).unwrap();
        let result = search(&rules, &state, Side::Second, 3);
        assert_eq!(result.best_move, Some(3), "must block the open three");
    }

    #[test]
    fn test_extra_turn_states_keep_maximizing() {
        // Mancala pit 2 grants an extra turn; searching past it must not
        // flip the perspective. Smoke-check that the search runs and
        // returns a legal pit.
        let rules = Mancala;
        let state = rules.initial();
        let result = search(&rules, &state, Side::First, 4);
        let mv = result.best_move.expect("initial position has moves");
        assert!(rules.legal_moves(&state, Side::First).contains(&mv));
        assert!(result.nodes > 1);
    }

    #[test]
    fn test_deeper_search_never_returns_none_with_moves() {
        let rules = Connect4;
        let state = rules.initial();
        for depth in 1..=5 {
            let result = search(&rules, &state, Side::First, depth);
            assert!(result.best_move.is_some(), "depth {depth}");
        }
    }
}
