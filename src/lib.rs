//! Multi-game rule engine and AI move selection
//!
//! Seven board games behind one capability interface, each playable
//! against a computer opponent at three difficulty levels:
//! Connect Four, Othello, Omok (Renju rules), Checkers, Mancala (Kalah),
//! Battleship, and Dots-and-Boxes.
//!
//! # Architecture
//!
//! - [`types`]: shared `Side`/`Outcome`/`Pos` vocabulary
//! - [`error`]: the recoverable rejection taxonomy
//! - [`engine`]: the [`Rules`](engine::Rules) trait every game implements
//! - [`eval`]: shared line scanning and pattern scores
//! - [`search`]: difficulty policy, alpha-beta, the [`AiPlayer`](search::AiPlayer) controller
//! - [`games`]: the seven rule engines
//!
//! # Quick start
//!
//! ```
//! use parlor::engine::Rules;
//! use parlor::games::connect4::Connect4;
//! use parlor::search::{AiPlayer, Difficulty};
//!
//! let rules = Connect4;
//! let mut state = rules.initial();
//!
//! // Human drops in the middle column
//! state = rules.apply(&state, &3).unwrap();
//!
//! // AI answers
//! let mut ai = AiPlayer::with_seed(Difficulty::Hard, 0xC0FFEE);
//! let reply = ai.choose_move(&rules, &state).unwrap();
//! state = rules.apply(&state, &reply).unwrap();
//! assert!(rules.winner(&state).is_none());
//! ```
//!
//! # Design
//!
//! State transitions are pure: `apply` validates first and returns a new
//! state, so callers can keep undo stacks or replay histories by holding
//! onto old values.
//! Randomness is injected (seeded [`rand::rngs::StdRng`]), making every
//! difficulty tier reproducible under test. The engine is synchronous
//! and single-threaded; sessions are independent values with no shared
//! mutable state between them.

pub mod engine;
pub mod error;
pub mod eval;
pub mod games;
pub mod search;
pub mod types;

// Re-export the types nearly every caller touches
pub use engine::{match_result, Rules};
pub use error::{EngineError, ForbiddenKind, IllegalMoveKind};
pub use search::{AiPlayer, Difficulty};
pub use types::{GameKind, MatchResult, Outcome, Pos, Side};
