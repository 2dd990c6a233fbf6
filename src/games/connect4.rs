//! Connect Four: 7x6 grid with gravity
//!
//! A move names a column; the disc falls to the lowest empty row. Four
//! contiguous same-color discs in any of the four line directions win.
//! A full board with no winner is a draw.

use crate::engine::Rules;
use crate::error::{EngineError, IllegalMoveKind};
use crate::eval::lines::{scan_run, LineCell, LINE_DIRECTIONS};
use crate::eval::patterns::run_score;
use crate::types::{GameKind, Outcome, Pos, Side};

pub const COLS: usize = 7;
pub const ROWS: usize = 6;
const WIN_LEN: u8 = 4;

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Disc(Side),
}

/// Full Connect Four game state.
///
/// Row 0 is the top of the board; discs land at the highest row index
/// whose cell is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Connect4State {
    cells: [[Cell; COLS]; ROWS],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<u8>,
    last_move: Option<Pos>,
}

impl Connect4State {
    fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
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
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// Columns played so far, in order
    #[inline]
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Landing cell of the most recent disc
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Lowest empty row in `col`, or `None` when the column is full
    fn drop_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&r| self.cells[r][col] == Cell::Empty)
    }

    fn is_full(&self) -> bool {
        (0..COLS).all(|c| self.cells[0][c] != Cell::Empty)
    }

    fn line_cell(&self, side: Side) -> impl Fn(i32, i32) -> LineCell + Copy + '_ {
        move |r, c| {
            if !Pos::in_bounds(r, c, ROWS, COLS) {
                return LineCell::Edge;
            }
            match self.cells[r as usize][c as usize] {
                Cell::Disc(s) if s == side => LineCell::Own,
                Cell::Disc(_) => LineCell::Opponent,
                Cell::Empty => LineCell::Empty,
            }
        }
    }

    /// Win check through the last-placed disc only
    fn wins_at(&self, pos: Pos, side: Side) -> bool {
        let cell = self.line_cell(side);
        LINE_DIRECTIONS
            .iter()
            .any(|&(dr, dc)| scan_run(pos.row as i32, pos.col as i32, dr, dc, cell).len >= WIN_LEN)
    }
}

/// Connect Four rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4;

impl Rules for Connect4 {
    type State = Connect4State;
    type Move = u8;

    fn kind(&self) -> GameKind {
        GameKind::Connect4
    }

    fn initial(&self) -> Connect4State {
        Connect4State::new()
    }

    fn side_to_move(&self, state: &Connect4State) -> Side {
        state.turn
    }

    fn winner(&self, state: &Connect4State) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &Connect4State, side: Side) -> Vec<u8> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        (0..COLS as u8)
            .filter(|&c| state.drop_row(c as usize).is_some())
            .collect()
    }

    fn apply(&self, state: &Connect4State, mv: &u8) -> Result<Connect4State, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        let col = *mv as usize;
        if col >= COLS {
            return Err(EngineError::out_of_bounds());
        }
        let row = state
            .drop_row(col)
            .ok_or(EngineError::Illegal(IllegalMoveKind::BlockedDestination))?;

        let mut next = state.clone();
        let side = next.turn;
        let pos = Pos::new(row as u8, col as u8);
        next.cells[row][col] = Cell::Disc(side);
        next.history.push(*mv);
        next.last_move = Some(pos);

        if next.wins_at(pos, side) {
            next.winner = Some(Outcome::Win(side));
        } else if next.is_full() {
            next.winner = Some(Outcome::Draw);
        }
        next.turn = side.opponent();
        Ok(next)
    }

    fn evaluate(&self, state: &Connect4State, side: Side) -> i32 {
        score_for(state, side) - score_for(state, side.opponent())
    }
}

/// Per-disc line value plus a center-control bonus.
///
/// Each run is counted once by only scoring from its first disc (no
/// same-color disc behind it in the scan direction).
fn score_for(state: &Connect4State, side: Side) -> i32 {
    let cell = state.line_cell(side);
    let mut score = 0;

    for row in 0..ROWS as i32 {
        for col in 0..COLS as i32 {
            if cell(row, col) != LineCell::Own {
                continue;
            }
            // Center columns contest the most lines
            score += 6 - 2 * (col - COLS as i32 / 2).abs();

            for &(dr, dc) in &LINE_DIRECTIONS {
                if cell(row - dr, col - dc) == LineCell::Own {
                    continue; // not the start of this run
                }
                let run = scan_run(row, col, dr, dc, cell);
                score += run_score(run.len, run.open_ends, WIN_LEN);
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(rules: &Connect4, state: &Connect4State, cols: &[u8]) -> Connect4State {
        let mut s = state.clone();
        for c in cols {
            s = rules.apply(&s, c).unwrap();
        }
        s
    }

    #[test]
    fn test_disc_falls_to_bottom() {
        let rules = Connect4;
        let state = rules.apply(&rules.initial(), &3).unwrap();
        assert_eq!(state.cell(ROWS - 1, 3), Cell::Disc(Side::First));
        assert_eq!(state.last_move(), Some(Pos::new(5, 3)));
    }

    #[test]
    fn test_discs_stack() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[3, 3]);
        assert_eq!(state.cell(ROWS - 1, 3), Cell::Disc(Side::First));
        assert_eq!(state.cell(ROWS - 2, 3), Cell::Disc(Side::Second));
    }

    #[test]
    fn test_turn_alternates() {
        let rules = Connect4;
        let mut state = rules.initial();
        assert_eq!(state.turn(), Side::First);
        state = rules.apply(&state, &0).unwrap();
        assert_eq!(state.turn(), Side::Second);
        state = rules.apply(&state, &1).unwrap();
        assert_eq!(state.turn(), Side::First);
    }

    #[test]
    fn test_full_column_rejected() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(
            rules.apply(&state, &0),
            Err(EngineError::Illegal(IllegalMoveKind::BlockedDestination))
        );
        assert!(!rules.legal_moves(&state, state.turn()).contains(&0));
    }

    #[test]
    fn test_out_of_bounds_column_rejected() {
        let rules = Connect4;
        assert_eq!(rules.apply(&rules.initial(), &7), Err(EngineError::out_of_bounds()));
    }

    /// Four red discs dropped in columns 0-3 of the same row win for red.
    #[test]
    fn test_horizontal_win_columns_0_to_3() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(rules.winner(&state), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn test_vertical_win() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(rules.winner(&state), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn test_diagonal_win() {
        let rules = Connect4;
        // Staircase: First lands on (5,0), (4,1), (3,2), (2,3)
        let state = play(&rules, &rules.initial(), &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(rules.winner(&state), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 0, 1, 1, 2, 2, 3]);
        let before = state.history().to_vec();
        assert_eq!(rules.apply(&state, &4), Err(EngineError::GameOver));
        assert_eq!(state.history(), &before[..]);
        assert!(rules.legal_moves(&state, Side::Second).is_empty());
    }

    #[test]
    fn test_draw_on_full_board() {
        let rules = Connect4;
        let mut state = rules.initial();
        // Column pattern that fills the board without four in a row:
        // pairs of columns swap every two rows.
        let order = [
            0, 1, 2, 3, 4, 5, 6, //
            0, 1, 2, 3, 4, 5, 6, //
            1, 0, 3, 2, 5, 4, 6, //
            1, 0, 3, 2, 5, 4, 6, //
            0, 1, 2, 3, 4, 5, 6, //
            0, 1, 2, 3, 4, 5, 6,
        ];
        for c in order {
            if rules.winner(&state).is_some() {
                break;
            }
            state = rules.apply(&state, &c).unwrap();
        }
        assert_eq!(rules.winner(&state), Some(Outcome::Draw));
    }

    #[test]
    fn test_rejected_move_leaves_state_equal() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 0, 0, 0, 0, 0]);
        let snapshot = state.clone();
        assert!(rules.apply(&state, &0).is_err());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_history_length_tracks_moves() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[3, 3, 4]);
        assert_eq!(state.history(), &[3, 3, 4]);
    }

    #[test]
    fn test_generated_moves_all_apply() {
        let rules = Connect4;
        let state = play(&rules, &rules.initial(), &[0, 0, 0, 0, 0, 0, 3, 4]);
        for mv in rules.legal_moves(&state, state.turn()) {
            assert!(rules.apply(&state, &mv).is_ok(), "column {mv}");
        }
    }

    #[test]
    fn test_center_preferred_by_eval() {
        let rules = Connect4;
        let center = rules.apply(&rules.initial(), &3).unwrap();
        let edge = rules.apply(&rules.initial(), &0).unwrap();
        assert!(
            rules.evaluate(&center, Side::First) > rules.evaluate(&edge, Side::First),
            "center drop should evaluate higher than edge drop"
        );
    }
}
