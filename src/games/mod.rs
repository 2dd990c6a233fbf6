//! The seven rule engines
//!
//! Each module owns its board representation, move legality, move
//! application with side effects, terminal detection and heuristic
//! evaluation, and exposes them through [`crate::engine::Rules`].

pub mod battleship;
pub mod checkers;
pub mod connect4;
pub mod dots_and_boxes;
pub mod mancala;
pub mod omok;
pub mod othello;
