//! Move selection: difficulty policy, bounded alpha-beta, AI controller
//!
//! The controller is the single entry point the UI layer calls:
//! [`AiPlayer::choose_move`] takes a state snapshot and returns one move,
//! synchronously and deterministically given the seed. Any "thinking"
//! delay is a presentation concern, not ours.

pub mod alphabeta;
pub mod controller;
pub mod policy;

pub use alphabeta::{search, SearchOutcome};
pub use controller::AiPlayer;
pub use policy::{Difficulty, SearchParams};
