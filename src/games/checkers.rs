//! Checkers (draughts) on the dark squares of an 8x8 board
//!
//! A move is a path of positions: two entries for a quiet diagonal step,
//! more for a jump chain where every hop captures the piece in between.
//! Captures are mandatory and maximal per branch: when a jump is
//! available only jump moves are legal, and a chain may not stop while
//! the jumping piece can keep jumping. Promotion to king at the far row
//! ends the chain immediately; kings move and jump in all four diagonal
//! directions.
//!
//! The first player starts on rows 0-2 and moves toward row 7.

use crate::engine::Rules;
use crate::error::{EngineError, IllegalMoveKind};
use crate::types::{GameKind, Outcome, Pos, Side};

pub const SIZE: usize = 8;

const ALL_DIRS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    fn man(side: Side) -> Self {
        Piece { side, kind: PieceKind::Man }
    }

    fn directions(&self) -> &'static [(i32, i32)] {
        match (self.kind, self.side) {
            (PieceKind::King, _) => &ALL_DIRS,
            (PieceKind::Man, Side::First) => &ALL_DIRS[..2],
            (PieceKind::Man, Side::Second) => &ALL_DIRS[2..],
        }
    }
}

/// Promotion row for each side
#[inline]
fn far_row(side: Side) -> i32 {
    match side {
        Side::First => (SIZE - 1) as i32,
        Side::Second => 0,
    }
}

#[inline]
fn dark(r: i32, c: i32) -> bool {
    (r + c) % 2 == 1
}

type Cells = [[Option<Piece>; SIZE]; SIZE];

/// A quiet step (two positions) or a full jump chain (start, then every
/// landing square in order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersMove {
    pub path: Vec<Pos>,
}

impl CheckersMove {
    pub fn step(from: Pos, to: Pos) -> Self {
        CheckersMove { path: vec![from, to] }
    }

    /// A jump chain moves two rows per hop
    fn is_jump(&self) -> bool {
        self.path.len() >= 2
            && (self.path[1].row as i32 - self.path[0].row as i32).abs() == 2
    }
}

/// Checkers game state
#[derive(Debug, Clone, PartialEq)]
pub struct CheckersState {
    cells: Cells,
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<CheckersMove>,
    last_move: Option<CheckersMove>,
}

impl CheckersState {
    fn new() -> Self {
        let mut cells: Cells = [[None; SIZE]; SIZE];
        for r in 0..SIZE {
            for c in 0..SIZE {
                if !dark(r as i32, c as i32) {
                    continue;
                }
                if r < 3 {
                    cells[r][c] = Some(Piece::man(Side::First));
                } else if r >= SIZE - 3 {
                    cells[r][c] = Some(Piece::man(Side::Second));
                }
            }
        }
        Self {
            cells,
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
        }
    }

    #[inline]
    pub fn piece(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells[row][col]
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[CheckersMove] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&CheckersMove> {
        self.last_move.as_ref()
    }

    pub fn piece_count(&self, side: Side) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.map(|p| p.side) == Some(side))
            .count() as u32
    }
}

/// Checkers rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkers;

impl Checkers {
    /// All maximal jump chains for `side`. Empty iff no capture exists.
    fn capture_moves(&self, cells: &Cells, side: Side) -> Vec<CheckersMove> {
        let mut out = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                let Some(piece) = cells[r][c] else { continue };
                if piece.side != side {
                    continue;
                }
                let mut scratch = *cells;
                scratch[r][c] = None;
                let start = Pos::new(r as u8, c as u8);
                let mut path = vec![start];
                extend_chain(&mut scratch, start, piece, &mut path, &mut out);
            }
        }
        out
    }

    fn quiet_moves(&self, cells: &Cells, side: Side) -> Vec<CheckersMove> {
        let mut out = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                let Some(piece) = cells[r][c] else { continue };
                if piece.side != side {
                    continue;
                }
                for &(dr, dc) in piece.directions() {
                    let (tr, tc) = (r as i32 + dr, c as i32 + dc);
                    if Pos::in_bounds(tr, tc, SIZE, SIZE)
                        && cells[tr as usize][tc as usize].is_none()
                    {
                        out.push(CheckersMove::step(
                            Pos::new(r as u8, c as u8),
                            Pos::new(tr as u8, tc as u8),
                        ));
                    }
                }
            }
        }
        out
    }

    /// Explain why a structurally well-formed move was rejected
    fn diagnose(
        &self,
        state: &CheckersState,
        mv: &CheckersMove,
        legal: &[CheckersMove],
    ) -> EngineError {
        let path = &mv.path;
        if path.len() < 2
            || path.iter().any(|p| {
                !Pos::in_bounds(p.row as i32, p.col as i32, SIZE, SIZE)
                    || !dark(p.row as i32, p.col as i32)
            })
        {
            return EngineError::out_of_bounds();
        }
        match state.cells[path[0].row as usize][path[0].col as usize] {
            None => return EngineError::Illegal(IllegalMoveKind::EmptySource),
            Some(p) if p.side != state.turn => {
                return EngineError::Illegal(IllegalMoveKind::NotAPiece)
            }
            Some(_) => {}
        }
        let captures_required = legal.first().is_some_and(CheckersMove::is_jump);
        if captures_required && !mv.is_jump() {
            return EngineError::MandatoryCapture;
        }
        // A jump prefix of a longer legal chain stopped too early
        if mv.is_jump() && legal.iter().any(|m| m.path.starts_with(path)) {
            return EngineError::MandatoryCapture;
        }
        EngineError::Illegal(IllegalMoveKind::BlockedDestination)
    }
}

/// Depth-first chain extension over a scratch board. The moving piece is
/// held in hand (its origin square is already cleared), captured pieces
/// are removed as the chain grows and restored on backtrack. A path is
/// emitted only when no further jump exists, or on promotion, which ends
/// the chain.
fn extend_chain(
    cells: &mut Cells,
    pos: Pos,
    piece: Piece,
    path: &mut Vec<Pos>,
    out: &mut Vec<CheckersMove>,
) {
    let mut extended = false;
    for &(dr, dc) in piece.directions() {
        let (mr, mc) = (pos.row as i32 + dr, pos.col as i32 + dc);
        let (tr, tc) = (pos.row as i32 + 2 * dr, pos.col as i32 + 2 * dc);
        if !Pos::in_bounds(tr, tc, SIZE, SIZE) {
            continue;
        }
        let Some(victim) = cells[mr as usize][mc as usize] else {
            continue;
        };
        if victim.side == piece.side || cells[tr as usize][tc as usize].is_some() {
            continue;
        }

        extended = true;
        cells[mr as usize][mc as usize] = None;
        let landing = Pos::new(tr as u8, tc as u8);
        path.push(landing);
        if piece.kind == PieceKind::Man && tr == far_row(piece.side) {
            out.push(CheckersMove { path: path.clone() });
        } else {
            extend_chain(cells, landing, piece, path, out);
        }
        path.pop();
        cells[mr as usize][mc as usize] = Some(victim);
    }
    if !extended && path.len() >= 2 {
        out.push(CheckersMove { path: path.clone() });
    }
}

impl Rules for Checkers {
    type State = CheckersState;
    type Move = CheckersMove;

    fn kind(&self) -> GameKind {
        GameKind::Checkers
    }

    fn initial(&self) -> CheckersState {
        CheckersState::new()
    }

    fn side_to_move(&self, state: &CheckersState) -> Side {
        state.turn
    }

    fn winner(&self, state: &CheckersState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &CheckersState, side: Side) -> Vec<CheckersMove> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        let captures = self.capture_moves(&state.cells, side);
        if !captures.is_empty() {
            return captures;
        }
        self.quiet_moves(&state.cells, side)
    }

    fn apply(&self, state: &CheckersState, mv: &CheckersMove) -> Result<CheckersState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        let side = state.turn;
        let legal = self.legal_moves(state, side);
        if !legal.contains(mv) {
            return Err(self.diagnose(state, mv, &legal));
        }

        let mut next = state.clone();
        let start = mv.path[0];
        let end = mv.path[mv.path.len() - 1];
        let Some(mut piece) = next.cells[start.row as usize][start.col as usize].take() else {
            return Err(EngineError::Illegal(IllegalMoveKind::EmptySource));
        };

        if mv.is_jump() {
            for pair in mv.path.windows(2) {
                let mr = (pair[0].row + pair[1].row) / 2;
                let mc = (pair[0].col + pair[1].col) / 2;
                next.cells[mr as usize][mc as usize] = None;
            }
        }
        if piece.kind == PieceKind::Man && end.row as i32 == far_row(side) {
            piece.kind = PieceKind::King;
        }
        next.cells[end.row as usize][end.col as usize] = Some(piece);

        next.history.push(mv.clone());
        next.last_move = Some(mv.clone());
        next.turn = side.opponent();

        let opponent = side.opponent();
        if next.piece_count(opponent) == 0 || self.legal_moves(&next, opponent).is_empty() {
            next.winner = Some(Outcome::Win(side));
        }
        Ok(next)
    }

    fn evaluate(&self, state: &CheckersState, side: Side) -> i32 {
        material(state, side) - material(state, side.opponent())
    }
}

/// Material plus advancement: a king outweighs a man, a man gains value
/// as it nears the promotion row.
fn material(state: &CheckersState, side: Side) -> i32 {
    let mut score = 0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let Some(piece) = state.cells[r][c] else { continue };
            if piece.side != side {
                continue;
            }
            score += match piece.kind {
                PieceKind::King => 160,
                PieceKind::Man => {
                    let advance = match side {
                        Side::First => r as i32,
                        Side::Second => (SIZE - 1 - r) as i32,
                    };
                    100 + 2 * advance
                }
            };
        }
    }
    score
}
