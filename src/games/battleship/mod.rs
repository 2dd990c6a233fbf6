//! Battleship on two 10x10 grids with the standard five-ship fleet
//!
//! Each side owns a [`Board`]: fleet placement plus the record of shots
//! it has received. A move is an attack position on the opponent's
//! board; the outcome lands on the successor state as an
//! [`AttackReport`]. Hit and miss results are public knowledge, ship
//! locations are not, so the AI tiers never read the opponent's fleet:
//! they work from the shot record alone through [`targeting`].

pub mod targeting;

use rand::{Rng, RngCore};

use crate::engine::Rules;
use crate::error::EngineError;
use crate::types::{GameKind, Outcome, Pos, Side};

pub const SIZE: usize = 10;

/// Standard fleet: carrier, battleship, cruiser, submarine, destroyer
pub const FLEET: [u8; 5] = [5, 4, 3, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    #[inline]
    fn delta(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// Result of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackReport {
    Miss,
    Hit,
    Sunk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    length: u8,
    cells: Vec<Pos>,
    hits: u8,
}

impl Ship {
    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    #[inline]
    pub fn is_sunk(&self) -> bool {
        self.hits == self.length
    }
}

/// One side's waters: the placed fleet and every shot received so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    ships: Vec<Ship>,
    occupancy: [[Option<u8>; SIZE]; SIZE],
    /// `Some(true)` hit, `Some(false)` miss, `None` untried
    incoming: [[Option<bool>; SIZE]; SIZE],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one ship with its bow at `bow`, extending right or down.
    ///
    /// Rejects zero length, cells off the board and overlap with ships
    /// already placed; the board is unchanged on error.
    pub fn place_ship(
        &mut self,
        length: u8,
        bow: Pos,
        orientation: Orientation,
    ) -> Result<(), EngineError> {
        if length == 0 {
            return Err(EngineError::InvalidPlacement);
        }
        let (dr, dc) = orientation.delta();
        let mut cells = Vec::with_capacity(length as usize);
        for i in 0..length as i32 {
            let r = bow.row as i32 + dr * i;
            let c = bow.col as i32 + dc * i;
            if !Pos::in_bounds(r, c, SIZE, SIZE)
                || self.occupancy[r as usize][c as usize].is_some()
            {
                return Err(EngineError::InvalidPlacement);
            }
            cells.push(Pos::new(r as u8, c as u8));
        }
        let index = self.ships.len() as u8;
        for &cell in &cells {
            self.occupancy[cell.row as usize][cell.col as usize] = Some(index);
        }
        self.ships.push(Ship { length, cells, hits: 0 });
        Ok(())
    }

    /// Place the standard fleet at random positions drawn from `rng`.
    ///
    /// Rejected positions are simply redrawn; with 17 fleet cells on 100
    /// squares a valid layout is always found quickly.
    #[must_use]
    pub fn random_fleet(rng: &mut dyn RngCore) -> Self {
        let mut board = Board::new();
        for &length in &FLEET {
            loop {
                let orientation = if rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (rows, cols) = match orientation {
                    Orientation::Horizontal => (SIZE, SIZE - length as usize + 1),
                    Orientation::Vertical => (SIZE - length as usize + 1, SIZE),
                };
                let bow = Pos::new(
                    rng.random_range(0..rows) as u8,
                    rng.random_range(0..cols) as u8,
                );
                if board.place_ship(length, bow, orientation).is_ok() {
                    break;
                }
            }
        }
        board
    }

    #[inline]
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Shot record at one cell: `Some(true)` hit, `Some(false)` miss
    #[inline]
    pub fn shot(&self, row: usize, col: usize) -> Option<bool> {
        self.incoming[row][col]
    }

    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Resolve an incoming attack. Cells resolve at most once.
    fn receive(&mut self, target: Pos) -> Result<AttackReport, EngineError> {
        if !Pos::in_bounds(target.row as i32, target.col as i32, SIZE, SIZE) {
            return Err(EngineError::out_of_bounds());
        }
        let (r, c) = (target.row as usize, target.col as usize);
        if self.incoming[r][c].is_some() {
            return Err(EngineError::occupied());
        }
        match self.occupancy[r][c] {
            Some(index) => {
                self.incoming[r][c] = Some(true);
                let ship = &mut self.ships[index as usize];
                ship.hits += 1;
                if ship.is_sunk() {
                    Ok(AttackReport::Sunk)
                } else {
                    Ok(AttackReport::Hit)
                }
            }
            None => {
                self.incoming[r][c] = Some(false);
                Ok(AttackReport::Miss)
            }
        }
    }

    /// Everything an attacker legitimately knows about this board
    pub(crate) fn target_view(&self) -> targeting::TargetView {
        let mut sunk = [[false; SIZE]; SIZE];
        let mut remaining = Vec::new();
        for ship in &self.ships {
            if ship.is_sunk() {
                for &cell in &ship.cells {
                    sunk[cell.row as usize][cell.col as usize] = true;
                }
            } else {
                remaining.push(ship.length);
            }
        }
        targeting::TargetView {
            resolved: self.incoming,
            sunk,
            remaining,
        }
    }

    fn revealed_hits(&self) -> i32 {
        self.incoming
            .iter()
            .flatten()
            .filter(|&&shot| shot == Some(true))
            .count() as i32
    }
}

/// Battleship game state: both boards plus the usual turn bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct BattleshipState {
    boards: [Board; 2],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<Pos>,
    last_move: Option<Pos>,
    last_report: Option<AttackReport>,
}

impl BattleshipState {
    /// The given side's own waters
    #[inline]
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
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

    /// Outcome of the most recent attack
    #[inline]
    pub fn last_report(&self) -> Option<AttackReport> {
        self.last_report
    }
}

/// Battleship rule engine. The starting fleets live on the rules value,
/// so one engine replays the same setup for every [`Rules::initial`].
#[derive(Debug, Clone)]
pub struct Battleship {
    fleets: [Board; 2],
}

impl Battleship {
    /// Engine over two explicitly placed boards
    #[must_use]
    pub fn new(first: Board, second: Board) -> Self {
        Self { fleets: [first, second] }
    }

    /// Engine with both fleets placed randomly from `rng`
    #[must_use]
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::new(Board::random_fleet(rng), Board::random_fleet(rng))
    }

    /// Fixed preset: every ship horizontal, one per row from the top
    fn preset_board() -> Board {
        let mut board = Board::new();
        for (row, &length) in FLEET.iter().enumerate() {
            board
                .place_ship(length, Pos::new(row as u8, 0), Orientation::Horizontal)
                .unwrap_or_else(|_| unreachable!("preset layout is valid"));
        }
        board
    }
}

impl Default for Battleship {
    fn default() -> Self {
        Self::new(Self::preset_board(), Self::preset_board())
    }
}

impl Rules for Battleship {
    type State = BattleshipState;
    type Move = Pos;

    fn kind(&self) -> GameKind {
        GameKind::Battleship
    }

    fn initial(&self) -> BattleshipState {
        BattleshipState {
            boards: self.fleets.clone(),
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
            last_report: None,
        }
    }

    fn side_to_move(&self, state: &BattleshipState) -> Side {
        state.turn
    }

    fn winner(&self, state: &BattleshipState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &BattleshipState, side: Side) -> Vec<Pos> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        let target = state.board(side.opponent());
        let mut moves = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if target.shot(r, c).is_none() {
                    moves.push(Pos::new(r as u8, c as u8));
                }
            }
        }
        moves
    }

    fn apply(&self, state: &BattleshipState, mv: &Pos) -> Result<BattleshipState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        let side = state.turn;
        let mut next = state.clone();
        let report = next.boards[side.opponent().index()].receive(*mv)?;

        next.history.push(*mv);
        next.last_move = Some(*mv);
        next.last_report = Some(report);
        if next.board(side.opponent()).all_sunk() {
            next.winner = Some(Outcome::Win(side));
        }
        next.turn = side.opponent();
        Ok(next)
    }

    /// Revealed information only: hits scored minus hits conceded
    fn evaluate(&self, state: &BattleshipState, side: Side) -> i32 {
        state.board(side.opponent()).revealed_hits() - state.board(side).revealed_hits()
    }

    fn normal_move(&self, state: &BattleshipState, side: Side, rng: &mut dyn RngCore) -> Option<Pos> {
        if state.winner.is_some() || side != state.turn {
            return None;
        }
        let view = state.board(side.opponent()).target_view();
        targeting::select(&view, rng, false)
    }

    fn hard_move(&self, state: &BattleshipState, side: Side, rng: &mut dyn RngCore) -> Option<Pos> {
        if state.winner.is_some() || side != state.turn {
            return None;
        }
        let view = state.board(side.opponent()).target_view();
        targeting::select(&view, rng, true)
    }
}
