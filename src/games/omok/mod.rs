//! Omok (Gomoku) with Renju forbidden-move rules on a 19x19 board
//!
//! Five in a row wins. Black, the first player, is additionally bound by
//! the Renju restrictions: double-three, double-four and overline moves
//! are rejected *before* they are committed ([`forbidden`]). White wins
//! with five or more; black needs exactly five, since six or more is an
//! overline and never reaches the board.
//!
//! Full minimax is infeasible at this branching factor, so the hard tier
//! plays through the pattern-based threat search in [`threat`].

pub mod forbidden;
pub mod threat;

use rand::RngCore;

use crate::engine::Rules;
use crate::error::{EngineError, ForbiddenKind};
use crate::eval::lines::{scan_run, LineCell, LINE_DIRECTIONS};
use crate::eval::patterns::run_score;
use crate::types::{GameKind, Outcome, Pos, Side};

pub const SIZE: usize = 19;
const WIN_LEN: u8 = 5;

/// Omok game state
#[derive(Debug, Clone, PartialEq)]
pub struct OmokState {
    cells: [[Option<Side>; SIZE]; SIZE],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<Pos>,
    last_move: Option<Pos>,
    stones: u32,
}

impl OmokState {
    fn new() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
            stones: 0,
        }
    }

    #[inline]
    pub fn stone(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[row][col]
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.stones
    }

    pub(crate) fn cells(&self) -> &[[Option<Side>; SIZE]; SIZE] {
        &self.cells
    }

    fn line_cell(&self, side: Side) -> impl Fn(i32, i32) -> LineCell + Copy + '_ {
        move |r, c| {
            if !Pos::in_bounds(r, c, SIZE, SIZE) {
                return LineCell::Edge;
            }
            match self.cells[r as usize][c as usize] {
                Some(s) if s == side => LineCell::Own,
                Some(_) => LineCell::Opponent,
                None => LineCell::Empty,
            }
        }
    }

    /// Longest consecutive run through `pos` for `side`, over the four
    /// line directions.
    fn max_run_at(&self, pos: Pos, side: Side) -> u8 {
        let cell = self.line_cell(side);
        LINE_DIRECTIONS
            .iter()
            .map(|&(dr, dc)| scan_run(pos.row as i32, pos.col as i32, dr, dc, cell).len)
            .max()
            .unwrap_or(1)
    }

    /// Would placing at `pos` win for `side`?
    ///
    /// Black must make exactly five (six or more is an overline); white
    /// wins with five or more.
    pub(crate) fn wins_with(&self, pos: Pos, side: Side) -> bool {
        let mut probe = self.clone();
        probe.cells[pos.row as usize][pos.col as usize] = Some(side);
        let run = probe.max_run_at(pos, side);
        match side {
            Side::First => run == WIN_LEN,
            Side::Second => run >= WIN_LEN,
        }
    }
}

/// Omok rule engine (Renju rules)
#[derive(Debug, Clone, Copy, Default)]
pub struct Omok;

impl Omok {
    /// Renju check for a prospective black move, without committing it.
    ///
    /// Returns the violated restriction, or `None` when the placement is
    /// fine (including the case where it wins outright: a move that
    /// completes exactly five is never forbidden).
    pub fn forbidden_for_black(&self, state: &OmokState, pos: Pos) -> Option<ForbiddenKind> {
        if state.wins_with(pos, Side::First) {
            return None;
        }
        forbidden::check(state.cells(), pos)
    }
}

impl Rules for Omok {
    type State = OmokState;
    type Move = Pos;

    fn kind(&self) -> GameKind {
        GameKind::Omok
    }

    fn initial(&self) -> OmokState {
        OmokState::new()
    }

    fn side_to_move(&self, state: &OmokState) -> Side {
        state.turn
    }

    fn winner(&self, state: &OmokState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &OmokState, side: Side) -> Vec<Pos> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if state.cells[r][c].is_some() {
                    continue;
                }
                let pos = Pos::new(r as u8, c as u8);
                if side == Side::First && self.forbidden_for_black(state, pos).is_some() {
                    continue;
                }
                moves.push(pos);
            }
        }
        moves
    }

    fn apply(&self, state: &OmokState, mv: &Pos) -> Result<OmokState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        if !Pos::in_bounds(mv.row as i32, mv.col as i32, SIZE, SIZE) {
            return Err(EngineError::out_of_bounds());
        }
        if state.cells[mv.row as usize][mv.col as usize].is_some() {
            return Err(EngineError::occupied());
        }
        let side = state.turn;
        if side == Side::First {
            if let Some(kind) = self.forbidden_for_black(state, *mv) {
                return Err(EngineError::Forbidden(kind));
            }
        }

        let mut next = state.clone();
        next.cells[mv.row as usize][mv.col as usize] = Some(side);
        next.stones += 1;
        next.history.push(*mv);
        next.last_move = Some(*mv);

        let run = next.max_run_at(*mv, side);
        let won = match side {
            Side::First => run == WIN_LEN,
            Side::Second => run >= WIN_LEN,
        };
        if won {
            next.winner = Some(Outcome::Win(side));
        } else if next.stones == (SIZE * SIZE) as u32 {
            next.winner = Some(Outcome::Draw);
        }
        next.turn = side.opponent();
        Ok(next)
    }

    fn evaluate(&self, state: &OmokState, side: Side) -> i32 {
        pattern_score(state, side) - pattern_score(state, side.opponent())
    }

    fn hard_move(&self, state: &OmokState, side: Side, _rng: &mut dyn RngCore) -> Option<Pos> {
        threat::best_move(self, state, side)
    }
}

/// Sum of run scores over all stones of `side`, each run counted once,
/// plus a mild center-control bonus.
pub(crate) fn pattern_score(state: &OmokState, side: Side) -> i32 {
    let cell = state.line_cell(side);
    let center = SIZE as i32 / 2;
    let mut score = 0;

    for r in 0..SIZE as i32 {
        for c in 0..SIZE as i32 {
            if cell(r, c) != LineCell::Own {
                continue;
            }
            score += 8 - ((r - center).abs() + (c - center).abs()) / 2;

            for &(dr, dc) in &LINE_DIRECTIONS {
                if cell(r - dr, c - dc) == LineCell::Own {
                    continue;
                }
                let run = scan_run(r, c, dr, dc, cell);
                score += run_score(run.len, run.open_ends, WIN_LEN);
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForbiddenKind;

    fn put(state: &mut OmokState, side: Side, coords: &[(u8, u8)]) {
        for &(r, c) in coords {
            state.cells[r as usize][c as usize] = Some(side);
            state.stones += 1;
        }
    }

    #[test]
    fn test_place_and_alternate() {
        let rules = Omok;
        let mut state = rules.initial();
        state = rules.apply(&state, &Pos::new(9, 9)).unwrap();
        assert_eq!(state.stone(9, 9), Some(Side::First));
        assert_eq!(state.turn(), Side::Second);
        state = rules.apply(&state, &Pos::new(9, 10)).unwrap();
        assert_eq!(state.turn(), Side::First);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_occupied_rejected() {
        let rules = Omok;
        let state = rules.apply(&rules.initial(), &Pos::new(9, 9)).unwrap();
        assert_eq!(rules.apply(&state, &Pos::new(9, 9)), Err(EngineError::occupied()));
    }

    #[test]
    fn test_five_in_a_row_wins_for_black() {
        let rules = Omok;
        let mut state = rules.initial();
        put(&mut state, Side::First, &[(9, 5), (9, 6), (9, 7), (9, 8)]);
        put(&mut state, Side::Second, &[(3, 3), (3, 4), (3, 5)]);
        let next = rules.apply(&state, &Pos::new(9, 9)).unwrap();
        assert_eq!(rules.winner(&next), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn test_six_wins_for_white_but_not_black() {
        let rules = Omok;

        // White: _WWWW_W with the gap filled makes six, which still wins
        let mut state = rules.initial();
        state.turn = Side::Second;
        put(&mut state, Side::Second, &[(9, 4), (9, 5), (9, 6), (9, 7), (9, 9)]);
        put(&mut state, Side::First, &[(3, 3), (3, 4), (4, 3), (4, 4), (5, 3)]);
        let next = rules.apply(&state, &Pos::new(9, 8)).unwrap();
        assert_eq!(rules.winner(&next), Some(Outcome::Win(Side::Second)));

        // The same shape for black is an overline and is rejected
        let mut state = rules.initial();
        put(&mut state, Side::First, &[(9, 4), (9, 5), (9, 6), (9, 7), (9, 9)]);
        put(&mut state, Side::Second, &[(3, 3), (3, 4), (4, 3), (4, 4), (5, 3)]);
        assert_eq!(
            rules.apply(&state, &Pos::new(9, 8)),
            Err(EngineError::Forbidden(ForbiddenKind::Overline))
        );
    }

    #[test]
    fn test_double_three_forbidden_for_black_only() {
        let rules = Omok;
        // Cross pattern: placing at (9,9) completes two open threes
        let black = [(9, 8), (9, 10), (8, 9), (10, 9)];

        let mut state = rules.initial();
        put(&mut state, Side::First, &black);
        assert_eq!(
            rules.apply(&state, &Pos::new(9, 9)),
            Err(EngineError::Forbidden(ForbiddenKind::DoubleThree))
        );
        assert!(!rules.legal_moves(&state, Side::First).contains(&Pos::new(9, 9)));

        // The identical placement by white is accepted
        let mut state = rules.initial();
        state.turn = Side::Second;
        put(&mut state, Side::Second, &black);
        assert!(rules.apply(&state, &Pos::new(9, 9)).is_ok());
    }

    #[test]
    fn test_winning_move_overrides_double_three() {
        let rules = Omok;
        let mut state = rules.initial();
        // Four in a row plus a crossing pair: completing five wins even
        // though the same cell would also make threes.
        put(&mut state, Side::First, &[(9, 5), (9, 6), (9, 7), (9, 8), (8, 9), (10, 9)]);
        put(&mut state, Side::Second, &[(3, 3), (3, 4), (4, 3), (4, 4), (5, 5), (5, 6)]);
        let next = rules.apply(&state, &Pos::new(9, 9)).unwrap();
        assert_eq!(rules.winner(&next), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn test_terminal_state_frozen() {
        let rules = Omok;
        let mut state = rules.initial();
        put(&mut state, Side::First, &[(9, 5), (9, 6), (9, 7), (9, 8)]);
        put(&mut state, Side::Second, &[(3, 3), (3, 4), (3, 5)]);
        let done = rules.apply(&state, &Pos::new(9, 9)).unwrap();
        assert_eq!(rules.apply(&done, &Pos::new(0, 0)), Err(EngineError::GameOver));
        assert!(rules.legal_moves(&done, Side::Second).is_empty());
    }

    #[test]
    fn test_legal_moves_exclude_forbidden() {
        let rules = Omok;
        let mut state = rules.initial();
        put(&mut state, Side::First, &[(9, 8), (9, 10), (8, 9), (10, 9)]);
        state.turn = Side::First;
        let moves = rules.legal_moves(&state, Side::First);
        assert!(!moves.contains(&Pos::new(9, 9)));
        // Every generated move must be accepted by apply
        for mv in moves.iter().take(40) {
            assert!(rules.apply(&state, mv).is_ok(), "{mv}");
        }
    }
}
