//! Pattern-based threat search for the Omok hard tier
//!
//! Brute-force tree search is infeasible on a 19x19 board, so the hard
//! tier plays a priority ladder instead:
//!
//! 1. complete five (immediate win)
//! 2. block the opponent's immediate win
//! 3. best dual-purpose placement: extend our strongest lines while
//!    devaluing the opponent's, scored by the shared pattern ladder
//!
//! Candidates are restricted to cells near existing stones, which bounds
//! the work per move regardless of board size. The ladder is
//! deterministic; tie-breaking falls to the first candidate in scan
//! order.

use tracing::debug;

use crate::engine::Rules;
use crate::eval::lines::LINE_DIRECTIONS;
use crate::eval::patterns::run_score;
use crate::types::{Pos, Side};

use super::{Omok, OmokState, SIZE};

/// Chebyshev radius around existing stones considered for placement
const CANDIDATE_RADIUS: i32 = 2;

/// Defensive value of a cell relative to its attacking value. Slightly
/// below 1 so that, between equal threats, extending our own line beats
/// blocking the opponent's.
const BLOCK_NUM: i32 = 9;
const BLOCK_DEN: i32 = 10;

/// Choose the hard-tier move for `side`, or `None` when no legal move
/// exists.
pub fn best_move(rules: &Omok, state: &OmokState, side: Side) -> Option<Pos> {
    let legal = rules.legal_moves(state, side);
    if legal.is_empty() {
        return None;
    }
    if state.stone_count() == 0 {
        return Some(Pos::new((SIZE / 2) as u8, (SIZE / 2) as u8));
    }

    // 1. Immediate win
    if let Some(win) = legal.iter().find(|&&pos| state.wins_with(pos, side)) {
        debug!(pos = %win, "omok: winning placement");
        return Some(*win);
    }

    // 2. Block the opponent's immediate win
    let opponent = side.opponent();
    for &pos in &legal {
        if state.wins_with(pos, opponent) {
            debug!(pos = %pos, "omok: blocking opponent five");
            return Some(pos);
        }
    }

    // 3. Strongest dual-purpose placement among nearby candidates
    let candidates = candidate_cells(state, &legal);
    let pool = if candidates.is_empty() { &legal } else { &candidates };

    pool.iter()
        .map(|&pos| {
            let attack = placement_score(state, pos, side);
            let defend = placement_score(state, pos, opponent);
            (pos, attack + defend * BLOCK_NUM / BLOCK_DEN)
        })
        .max_by_key(|&(_, score)| score)
        .map(|(pos, score)| {
            debug!(pos = %pos, score, "omok: pattern placement");
            pos
        })
}

/// Legal cells within [`CANDIDATE_RADIUS`] of any stone
fn candidate_cells(state: &OmokState, legal: &[Pos]) -> Vec<Pos> {
    legal
        .iter()
        .copied()
        .filter(|pos| near_stone(state, *pos))
        .collect()
}

fn near_stone(state: &OmokState, pos: Pos) -> bool {
    for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
        for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = pos.row as i32 + dr;
            let c = pos.col as i32 + dc;
            if Pos::in_bounds(r, c, SIZE, SIZE) && state.stone(r as usize, c as usize).is_some() {
                return true;
            }
        }
    }
    false
}

/// Threat value of placing `side` at `pos`: the pattern score of the
/// runs the new stone would participate in, over all four directions.
fn placement_score(state: &OmokState, pos: Pos, side: Side) -> i32 {
    let cells = state.cells();
    let own = |r: i32, c: i32| -> bool {
        if r == pos.row as i32 && c == pos.col as i32 {
            return true;
        }
        Pos::in_bounds(r, c, SIZE, SIZE) && cells[r as usize][c as usize] == Some(side)
    };
    let empty = |r: i32, c: i32| -> bool {
        Pos::in_bounds(r, c, SIZE, SIZE)
            && cells[r as usize][c as usize].is_none()
            && !(r == pos.row as i32 && c == pos.col as i32)
    };

    let mut total = 0;
    for &(dr, dc) in &LINE_DIRECTIONS {
        let mut len = 1u8;
        let mut open_ends = 0u8;
        for sign in [1i32, -1] {
            let mut i = 1;
            loop {
                let r = pos.row as i32 + dr * i * sign;
                let c = pos.col as i32 + dc * i * sign;
                if own(r, c) {
                    len += 1;
                    i += 1;
                } else {
                    if empty(r, c) {
                        open_ends += 1;
                    }
                    break;
                }
            }
        }
        total += run_score(len, open_ends, 5);
    }
    total
}
