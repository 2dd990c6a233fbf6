//! Mancala in its Kalah variant: 6 pits and a store per player, 4 stones
//! per pit, 48 stones total
//!
//! Pits live in one counter-clockwise array: indices 0-5 are the first
//! player's pits, 6 their store, 7-12 the second player's pits, 13 their
//! store. Sowing drops one stone per pit counter-clockwise and skips the
//! opponent's store. Landing the last stone in the own store grants an
//! extra turn; landing it in an own empty pit captures that stone plus
//! the opposite pit. When a move empties the mover's whole row the
//! opponent sweeps their remaining stones and the stores decide the game.

use crate::engine::Rules;
use crate::error::{EngineError, IllegalMoveKind};
use crate::types::{GameKind, Outcome, Side};

pub const PITS_PER_SIDE: usize = 6;
const SLOTS: usize = 14;
const STONES_PER_PIT: u8 = 4;
pub const TOTAL_STONES: u32 = 48;

#[inline]
fn store_of(side: Side) -> usize {
    match side {
        Side::First => 6,
        Side::Second => 13,
    }
}

#[inline]
fn row_of(side: Side) -> std::ops::Range<usize> {
    match side {
        Side::First => 0..6,
        Side::Second => 7..13,
    }
}

/// Pit directly across the board, for captures. Pairs 0-12, 1-11, .. 5-7.
#[inline]
fn opposite(pit: usize) -> usize {
    12 - pit
}

/// Mancala game state
#[derive(Debug, Clone, PartialEq)]
pub struct MancalaState {
    pits: [u8; SLOTS],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<u8>,
    last_move: Option<u8>,
    /// Set when the previous move earned another turn for the same side
    extra_turn: bool,
}

impl MancalaState {
    fn new() -> Self {
        let mut pits = [STONES_PER_PIT; SLOTS];
        pits[store_of(Side::First)] = 0;
        pits[store_of(Side::Second)] = 0;
        Self {
            pits,
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
            extra_turn: false,
        }
    }

    #[inline]
    pub fn pit(&self, index: usize) -> u8 {
        self.pits[index]
    }

    #[inline]
    pub fn store(&self, side: Side) -> u8 {
        self.pits[store_of(side)]
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<u8> {
        self.last_move
    }

    /// Did the previous move grant the mover another turn?
    #[inline]
    pub fn extra_turn(&self) -> bool {
        self.extra_turn
    }

    fn row_empty(&self, side: Side) -> bool {
        row_of(side).all(|i| self.pits[i] == 0)
    }

    fn row_sum(&self, side: Side) -> u32 {
        row_of(side).map(|i| self.pits[i] as u32).sum()
    }
}

/// Mancala (Kalah) rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Mancala;

impl Rules for Mancala {
    type State = MancalaState;
    type Move = u8;

    fn kind(&self) -> GameKind {
        GameKind::Mancala
    }

    fn initial(&self) -> MancalaState {
        MancalaState::new()
    }

    fn side_to_move(&self, state: &MancalaState) -> Side {
        state.turn
    }

    fn winner(&self, state: &MancalaState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &MancalaState, side: Side) -> Vec<u8> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        row_of(side)
            .filter(|&i| state.pits[i] > 0)
            .map(|i| i as u8)
            .collect()
    }

    fn apply(&self, state: &MancalaState, mv: &u8) -> Result<MancalaState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        let side = state.turn;
        let pit = *mv as usize;
        if pit >= SLOTS || pit == store_of(Side::First) || pit == store_of(Side::Second) {
            return Err(EngineError::out_of_bounds());
        }
        if !row_of(side).contains(&pit) {
            return Err(EngineError::Illegal(IllegalMoveKind::NotAPiece));
        }
        if state.pits[pit] == 0 {
            return Err(EngineError::Illegal(IllegalMoveKind::EmptySource));
        }

        let mut next = state.clone();
        let mut in_hand = next.pits[pit];
        next.pits[pit] = 0;

        let skip = store_of(side.opponent());
        let mut at = pit;
        while in_hand > 0 {
            at = (at + 1) % SLOTS;
            if at == skip {
                continue;
            }
            next.pits[at] += 1;
            in_hand -= 1;
        }

        let own_store = store_of(side);
        let landed_in_store = at == own_store;

        // Capture: last stone into an own pit that was empty takes it and
        // everything across the board, provided the opposite pit has stones.
        if !landed_in_store
            && row_of(side).contains(&at)
            && next.pits[at] == 1
            && next.pits[opposite(at)] > 0
        {
            let captured = next.pits[at] + next.pits[opposite(at)];
            next.pits[at] = 0;
            next.pits[opposite(at)] = 0;
            next.pits[own_store] += captured;
        }

        next.history.push(*mv);
        next.last_move = Some(*mv);
        next.extra_turn = landed_in_store;
        if !landed_in_store {
            next.turn = side.opponent();
        }

        // An empty row ends the game: the other side sweeps its remaining
        // stones into its store and the store totals decide.
        for emptied in [Side::First, Side::Second] {
            if next.row_empty(emptied) {
                let other = emptied.opponent();
                let sweep = next.row_sum(other) as u8;
                for i in row_of(other) {
                    next.pits[i] = 0;
                }
                next.pits[store_of(other)] += sweep;

                let first = next.store(Side::First);
                let second = next.store(Side::Second);
                next.winner = Some(match first.cmp(&second) {
                    std::cmp::Ordering::Greater => Outcome::Win(Side::First),
                    std::cmp::Ordering::Less => Outcome::Win(Side::Second),
                    std::cmp::Ordering::Equal => Outcome::Draw,
                });
                break;
            }
        }

        Ok(next)
    }

    fn evaluate(&self, state: &MancalaState, side: Side) -> i32 {
        let opponent = side.opponent();
        let store_diff = state.store(side) as i32 - state.store(opponent) as i32;
        let row_diff = state.row_sum(side) as i32 - state.row_sum(opponent) as i32;
        store_diff * 4 + row_diff
    }
}
