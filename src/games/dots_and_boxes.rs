//! Dots-and-Boxes on a 4x4 box grid (5x5 dots)
//!
//! A move draws one undrawn edge. Drawing the fourth side of a box
//! claims it for the mover; one edge can complete two adjacent boxes at
//! once. Any completion grants an extra turn, and completions can chain
//! through a whole run of boxes. When all 16 boxes are claimed the
//! larger share wins, an 8-8 split is a draw.

use crate::engine::Rules;
use crate::error::EngineError;
use crate::types::{GameKind, Outcome, Side};

/// Boxes per row and column
pub const BOXES: usize = 4;
const DOTS: usize = BOXES + 1;
const TOTAL_BOXES: u8 = (BOXES * BOXES) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One edge of the dot grid.
///
/// A horizontal edge at `(row, col)` joins dots `(row, col)` and
/// `(row, col + 1)`; a vertical edge joins `(row, col)` and
/// `(row + 1, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub orientation: Orientation,
    pub row: u8,
    pub col: u8,
}

impl Edge {
    pub fn horizontal(row: u8, col: u8) -> Self {
        Edge { orientation: Orientation::Horizontal, row, col }
    }

    pub fn vertical(row: u8, col: u8) -> Self {
        Edge { orientation: Orientation::Vertical, row, col }
    }

    fn in_bounds(&self) -> bool {
        match self.orientation {
            Orientation::Horizontal => (self.row as usize) < DOTS && (self.col as usize) < BOXES,
            Orientation::Vertical => (self.row as usize) < BOXES && (self.col as usize) < DOTS,
        }
    }
}

/// Dots-and-Boxes game state
#[derive(Debug, Clone, PartialEq)]
pub struct DotsAndBoxesState {
    horizontal: [[bool; BOXES]; DOTS],
    vertical: [[bool; DOTS]; BOXES],
    boxes: [[Option<Side>; BOXES]; BOXES],
    claimed: [u8; 2],
    turn: Side,
    winner: Option<Outcome>,
    history: Vec<Edge>,
    last_move: Option<Edge>,
    /// Set when the previous move completed a box for the same side
    extra_turn: bool,
}

impl DotsAndBoxesState {
    fn new() -> Self {
        Self {
            horizontal: [[false; BOXES]; DOTS],
            vertical: [[false; DOTS]; BOXES],
            boxes: [[None; BOXES]; BOXES],
            claimed: [0; 2],
            turn: Side::First,
            winner: None,
            history: Vec::new(),
            last_move: None,
            extra_turn: false,
        }
    }

    #[inline]
    pub fn is_drawn(&self, edge: Edge) -> bool {
        match edge.orientation {
            Orientation::Horizontal => self.horizontal[edge.row as usize][edge.col as usize],
            Orientation::Vertical => self.vertical[edge.row as usize][edge.col as usize],
        }
    }

    #[inline]
    pub fn box_owner(&self, row: usize, col: usize) -> Option<Side> {
        self.boxes[row][col]
    }

    #[inline]
    pub fn boxes_claimed(&self, side: Side) -> u8 {
        self.claimed[side.index()]
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[Edge] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Edge> {
        self.last_move
    }

    /// Did the previous move grant the mover another turn?
    #[inline]
    pub fn extra_turn(&self) -> bool {
        self.extra_turn
    }

    /// Drawn sides around one box, 0 to 4
    fn box_sides(&self, row: usize, col: usize) -> u8 {
        let mut sides = 0;
        if self.horizontal[row][col] {
            sides += 1;
        }
        if self.horizontal[row + 1][col] {
            sides += 1;
        }
        if self.vertical[row][col] {
            sides += 1;
        }
        if self.vertical[row][col + 1] {
            sides += 1;
        }
        sides
    }

    /// Boxes touching an edge: at most two, one on each side of it
    fn adjacent_boxes(edge: Edge) -> Vec<(usize, usize)> {
        let (r, c) = (edge.row as i32, edge.col as i32);
        let pair = match edge.orientation {
            Orientation::Horizontal => [(r - 1, c), (r, c)],
            Orientation::Vertical => [(r, c - 1), (r, c)],
        };
        pair.into_iter()
            .filter(|&(br, bc)| br >= 0 && bc >= 0 && (br as usize) < BOXES && (bc as usize) < BOXES)
            .map(|(br, bc)| (br as usize, bc as usize))
            .collect()
    }
}

/// Dots-and-Boxes rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DotsAndBoxes;

impl Rules for DotsAndBoxes {
    type State = DotsAndBoxesState;
    type Move = Edge;

    fn kind(&self) -> GameKind {
        GameKind::DotsAndBoxes
    }

    fn initial(&self) -> DotsAndBoxesState {
        DotsAndBoxesState::new()
    }

    fn side_to_move(&self, state: &DotsAndBoxesState) -> Side {
        state.turn
    }

    fn winner(&self, state: &DotsAndBoxesState) -> Option<Outcome> {
        state.winner
    }

    fn legal_moves(&self, state: &DotsAndBoxesState, side: Side) -> Vec<Edge> {
        if state.winner.is_some() || side != state.turn {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for r in 0..DOTS {
            for c in 0..BOXES {
                if !state.horizontal[r][c] {
                    moves.push(Edge::horizontal(r as u8, c as u8));
                }
            }
        }
        for r in 0..BOXES {
            for c in 0..DOTS {
                if !state.vertical[r][c] {
                    moves.push(Edge::vertical(r as u8, c as u8));
                }
            }
        }
        moves
    }

    fn apply(&self, state: &DotsAndBoxesState, mv: &Edge) -> Result<DotsAndBoxesState, EngineError> {
        if state.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        if !mv.in_bounds() {
            return Err(EngineError::out_of_bounds());
        }
        if state.is_drawn(*mv) {
            return Err(EngineError::occupied());
        }

        let side = state.turn;
        let mut next = state.clone();
        match mv.orientation {
            Orientation::Horizontal => next.horizontal[mv.row as usize][mv.col as usize] = true,
            Orientation::Vertical => next.vertical[mv.row as usize][mv.col as usize] = true,
        }

        let mut completed = 0;
        for (br, bc) in DotsAndBoxesState::adjacent_boxes(*mv) {
            if next.boxes[br][bc].is_none() && next.box_sides(br, bc) == 4 {
                next.boxes[br][bc] = Some(side);
                next.claimed[side.index()] += 1;
                completed += 1;
            }
        }

        next.history.push(*mv);
        next.last_move = Some(*mv);
        next.extra_turn = completed > 0;
        if completed == 0 {
            next.turn = side.opponent();
        }

        if next.claimed[0] + next.claimed[1] == TOTAL_BOXES {
            next.winner = Some(match next.claimed[0].cmp(&next.claimed[1]) {
                std::cmp::Ordering::Greater => Outcome::Win(Side::First),
                std::cmp::Ordering::Less => Outcome::Win(Side::Second),
                std::cmp::Ordering::Equal => Outcome::Draw,
            });
        }
        Ok(next)
    }

    /// Box differential, the boxes the mover can capture right now, and a
    /// penalty for edges that would hand the opponent a third side.
    fn evaluate(&self, state: &DotsAndBoxesState, side: Side) -> i32 {
        let diff = state.boxes_claimed(side) as i32
            - state.boxes_claimed(side.opponent()) as i32;

        let mut capturable = 0;
        let mut two_sided = 0;
        for r in 0..BOXES {
            for c in 0..BOXES {
                match state.box_sides(r, c) {
                    3 if state.boxes[r][c].is_none() => capturable += 1,
                    2 => two_sided += 1,
                    _ => {}
                }
            }
        }

        // Capturable boxes and forced giveaways belong to whoever moves
        let mover = if state.turn == side { 1 } else { -1 };
        25 * diff + mover * (20 * capturable - 2 * two_sided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let rules = DotsAndBoxes;
        let state = rules.initial();
        assert_eq!(rules.legal_moves(&state, Side::First).len(), 40);
        assert_eq!(state.boxes_claimed(Side::First), 0);
        assert_eq!(state.boxes_claimed(Side::Second), 0);
        assert_eq!(state.turn(), Side::First);
    }

    #[test]
    fn test_plain_edge_passes_turn() {
        let rules = DotsAndBoxes;
        let state = rules.apply(&rules.initial(), &Edge::horizontal(0, 0)).unwrap();
        assert!(state.is_drawn(Edge::horizontal(0, 0)));
        assert!(!state.extra_turn());
        assert_eq!(state.turn(), Side::Second);
    }

    #[test]
    fn test_rejections() {
        let rules = DotsAndBoxes;
        let state = rules.apply(&rules.initial(), &Edge::horizontal(0, 0)).unwrap();
        assert_eq!(
            rules.apply(&state, &Edge::horizontal(0, 0)),
            Err(EngineError::occupied())
        );
        assert_eq!(
            rules.apply(&state, &Edge::horizontal(0, 4)),
            Err(EngineError::out_of_bounds())
        );
        assert_eq!(
            rules.apply(&state, &Edge::vertical(4, 0)),
            Err(EngineError::out_of_bounds())
        );
    }

    #[test]
    fn test_completing_box_claims_and_grants_extra_turn() {
        let rules = DotsAndBoxes;
        let mut state = rules.initial();
        // Three sides of box (0,0) drawn without completing anything
        for edge in [
            Edge::horizontal(0, 0), // First
            Edge::horizontal(3, 3), // Second, far away
            Edge::horizontal(1, 0), // First
            Edge::horizontal(4, 3), // Second
            Edge::vertical(0, 0),   // First
            Edge::vertical(3, 0),   // Second
        ] {
            state = rules.apply(&state, &edge).unwrap();
        }
        assert_eq!(state.turn(), Side::First);
        let next = rules.apply(&state, &Edge::vertical(0, 1)).unwrap();
        assert_eq!(next.box_owner(0, 0), Some(Side::First));
        assert_eq!(next.boxes_claimed(Side::First), 1);
        assert!(next.extra_turn());
        assert_eq!(next.turn(), Side::First, "completion keeps the turn");
    }

    #[test]
    fn test_one_edge_can_complete_two_boxes() {
        let rules = DotsAndBoxes;
        let mut state = rules.initial();
        // Boxes (0,0) and (0,1) each lack only the shared edge V(0,1)
        for edge in [
            Edge::horizontal(0, 0), // First
            Edge::horizontal(1, 0), // Second
            Edge::vertical(0, 0),   // First
            Edge::horizontal(0, 1), // Second
            Edge::horizontal(1, 1), // First
            Edge::vertical(0, 2),   // Second
        ] {
            state = rules.apply(&state, &edge).unwrap();
        }
        assert_eq!(state.turn(), Side::First);
        let next = rules.apply(&state, &Edge::vertical(0, 1)).unwrap();
        assert_eq!(next.box_owner(0, 0), Some(Side::First));
        assert_eq!(next.box_owner(0, 1), Some(Side::First));
        assert_eq!(next.boxes_claimed(Side::First), 2);
        assert!(next.extra_turn());
    }

    #[test]
    fn test_full_game_resolves_winner() {
        let rules = DotsAndBoxes;
        let mut state = rules.initial();
        let mut guard = 0;
        while rules.winner(&state).is_none() {
            let moves = rules.legal_moves(&state, state.turn());
            assert!(!moves.is_empty());
            state = rules.apply(&state, &moves[0]).unwrap();
            guard += 1;
            assert!(guard <= 40, "more moves than edges");
        }
        let first = state.boxes_claimed(Side::First);
        let second = state.boxes_claimed(Side::Second);
        assert_eq!(first + second, TOTAL_BOXES);
        let expected = match first.cmp(&second) {
            std::cmp::Ordering::Greater => Outcome::Win(Side::First),
            std::cmp::Ordering::Less => Outcome::Win(Side::Second),
            std::cmp::Ordering::Equal => Outcome::Draw,
        };
        assert_eq!(rules.winner(&state), Some(expected));
        assert!(rules
            .apply(&state, &Edge::horizontal(0, 0))
            .is_err_and(|e| e == EngineError::GameOver || e == EngineError::occupied()));
        // Frozen for both sides
        assert!(rules.legal_moves(&state, Side::First).is_empty());
        assert!(rules.legal_moves(&state, Side::Second).is_empty());
    }

    #[test]
    fn test_evaluate_rewards_boxes_and_capturable() {
        let rules = DotsAndBoxes;
        let mut state = rules.initial();
        // Give the mover a capturable box
        for edge in [
            Edge::horizontal(0, 0), // First
            Edge::horizontal(1, 0), // Second
            Edge::vertical(0, 0),   // First
        ] {
            state = rules.apply(&state, &edge).unwrap();
        }
        // Second to move with box (0,0) on three sides
        assert!(rules.evaluate(&state, Side::Second) > 0);
        assert!(rules.evaluate(&state, Side::First) < 0);
    }
}
