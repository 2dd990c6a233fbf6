//! Othello / Reversi on the standard 8x8 board
//!
//! A placement is legal only if it flips at least one opposing line: a
//! contiguous run of opponent discs ending in one of the mover's discs,
//! in any of the eight directions. A side with no placement must pass;
//! when neither side can place, the game ends and the majority wins.

use crate::engine::Rules;
use crate::error::{EngineError, IllegalMoveKind};
use crate::types::{GameKind, Outcome, Pos, Side};

pub const SIZE: usize = 8;

/// All eight flip directions
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Positional weights: corners dominate, the X/C squares beside them are
/// liabilities while the corner is open.
#[rustfmt::skip]
const WEIGHTS: [[i32; SIZE]; SIZE] = [
    [120, -20,  20,  5,  5,  20, -20, 120],
    [-20, -40,  -5, -5, -5,  -5, -40, -20],
    [ 20,  -5,  15,  3,  3,  15,  -5,  20],
    [  5,  -5,   3,  3,  3,   3,  -5,   5],
    [  5,  -5,   3,  3,  3,   3,  -5,   5],
    [ 20,  -5,  15,  3,  3,  15,  -5,  20],
    [-20, -40,  -5, -5, -5,  -5, -40, -20],
    [120, -20,  20,  5,  5,  20, -20, 120],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Disc(Side),
}

/// Placement at a cell, or a pass when no placement flips anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OthelloMove {
    Place(Pos),
    Pass,
}

/// Othello game state
#[derive(Debug, Clone, PartialEq)]
pub struct OthelloState {
    cells: [[Cell; SIZE]; SIZE],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<OthelloMove>,
    last_move: Option<OthelloMove>,
    /// Consecutive passes; two in a row end the game
    pass_streak: u8,
}

impl OthelloState {
    fn new() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        // Standard opening: white on the main diagonal of the center
        cells[3][3] = Cell::Disc(Side::Second);
        cells[4][4] = Cell::Disc(Side::Second);
        cells[3][4] = Cell::Disc(Side::First);
        cells[4][3] = Cell::Disc(Side::First);
        Self {
            cells,
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
            pass_streak: 0,
        }
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn last_move(&self) -> Option<OthelloMove> {
        self.last_move
    }

    #[inline]
    pub fn history(&self) -> &[OthelloMove] {
        &self.history
    }

    /// Disc count for one side
    pub fn count(&self, side: Side) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Disc(side))
            .count() as u32
    }

    /// Discs flipped by `side` placing at `pos`, across all eight
    /// directions. Empty when the placement is illegal.
    fn flips_at(&self, pos: Pos, side: Side) -> Vec<Pos> {
        if self.cells[pos.row as usize][pos.col as usize] != Cell::Empty {
            return Vec::new();
        }
        let opponent = side.opponent();
        let mut flips = Vec::new();

        for &(dr, dc) in &DIRECTIONS {
            let mut line = Vec::new();
            let mut r = pos.row as i32 + dr;
            let mut c = pos.col as i32 + dc;
            while Pos::in_bounds(r, c, SIZE, SIZE) {
                match self.cells[r as usize][c as usize] {
                    Cell::Disc(s) if s == opponent => {
                        line.push(Pos::new(r as u8, c as u8));
                        r += dr;
                        c += dc;
                    }
                    Cell::Disc(_) => {
                        // Run terminated by our own disc: flip it all
                        flips.extend(line);
                        break;
                    }
                    Cell::Empty => break,
                }
            }
        }
        flips
    }

    fn can_place(&self, side: Side) -> bool {
        (0..SIZE).any(|r| {
            (0..SIZE).any(|c| !self.flips_at(Pos::new(r as u8, c as u8), side).is_empty())
        })
    }

    fn resolve_winner(&self) -> Outcome {
        let first = self.count(Side::First);
        let second = self.count(Side::Second);
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Outcome::Win(Side::First),
            std::cmp::Ordering::Less => Outcome::Win(Side::Second),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Othello rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Othello;

impl Rules for Othello {
    type State = OthelloState;
    type Move = OthelloMove;

    fn kind(&self) -> GameKind {
        GameKind::Othello
    }

    fn initial(&self) -> OthelloState {
        OthelloState::new()
    }

    fn side_to_move(&self, state: &OthelloState) -> Side {
        state.turn
    }

    fn winner(&self, state: &OthelloState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &OthelloState, side: Side) -> Vec<OthelloMove> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                let pos = Pos::new(r as u8, c as u8);
                if !state.flips_at(pos, side).is_empty() {
                    moves.push(OthelloMove::Place(pos));
                }
            }
        }
        if moves.is_empty() {
            // Pass is the only move when nothing flips
            moves.push(OthelloMove::Pass);
        }
        moves
    }

    fn apply(&self, state: &OthelloState, mv: &OthelloMove) -> Result<OthelloState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        let side = state.turn;
        let mut next = state.clone();

        match *mv {
            OthelloMove::Place(pos) => {
                if !Pos::in_bounds(pos.row as i32, pos.col as i32, SIZE, SIZE) {
                    return Err(EngineError::out_of_bounds());
                }
                if state.cells[pos.row as usize][pos.col as usize] != Cell::Empty {
                    return Err(EngineError::occupied());
                }
                let flips = state.flips_at(pos, side);
                if flips.is_empty() {
                    // Legal placements must flip at least one line
                    return Err(EngineError::Illegal(IllegalMoveKind::NoFlips));
                }
                next.cells[pos.row as usize][pos.col as usize] = Cell::Disc(side);
                for f in flips {
                    next.cells[f.row as usize][f.col as usize] = Cell::Disc(side);
                }
                next.pass_streak = 0;
            }
            OthelloMove::Pass => {
                if state.can_place(side) {
                    return Err(EngineError::Illegal(IllegalMoveKind::PassWithMoves));
                }
                next.pass_streak = state.pass_streak + 1;
            }
        }

        next.history.push(*mv);
        next.last_move = Some(*mv);
        next.turn = side.opponent();

        let board_full = next.cells.iter().flatten().all(|&c| c != Cell::Empty);
        let both_stuck = next.pass_streak >= 2 || (!next.can_place(Side::First) && !next.can_place(Side::Second));
        if board_full || both_stuck {
            next.winner = Some(next.resolve_winner());
        }
        Ok(next)
    }

    fn evaluate(&self, state: &OthelloState, side: Side) -> i32 {
        let opponent = side.opponent();

        let mut positional = 0;
        for r in 0..SIZE {
            for c in 0..SIZE {
                match state.cells[r][c] {
                    Cell::Disc(s) if s == side => positional += WEIGHTS[r][c],
                    Cell::Disc(_) => positional -= WEIGHTS[r][c],
                    Cell::Empty => {}
                }
            }
        }

        let my_moves = count_placements(state, side) as i32;
        let opp_moves = count_placements(state, opponent) as i32;
        let mobility = 8 * (my_moves - opp_moves);

        // Disc differential only matters late; early on it is noise that
        // trades position for greedy flips.
        let my_discs = state.count(side) as i32;
        let opp_discs = state.count(opponent) as i32;
        let total = my_discs + opp_discs;
        let material_weight = if total > 48 { 10 } else { 1 };

        positional + mobility + material_weight * (my_discs - opp_discs)
    }
}

fn count_placements(state: &OthelloState, side: Side) -> usize {
    let mut n = 0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            if !state.flips_at(Pos::new(r as u8, c as u8), side).is_empty() {
                n += 1;
            }
        }
    }
    n
}
