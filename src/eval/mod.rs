//! Shared heuristic-evaluation building blocks
//!
//! Each game's `Rules::evaluate` composes its own heuristic (material,
//! position, threats, mobility), but the line-based games share the run
//! scanner and the pattern score ladder defined here.

pub mod lines;
pub mod patterns;

pub use lines::{scan_run, LineCell, Run};
pub use patterns::LineScore;

/// Score for a decided game inside search. Large enough to dominate any
/// heuristic sum; depth-adjusted by the searcher to prefer faster wins.
pub const WIN_SCORE: i32 = 1_000_000;
