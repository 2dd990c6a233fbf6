//! Pattern scores for line-based evaluation
//!
//! One score ladder shared by Connect Four and Omok. The exact values are
//! tunable; what matters is the strict ordering, so a longer or more open
//! run always dominates any number of weaker patterns.

/// Scores for runs of same-side pieces, indexed by length and openness
pub struct LineScore;

impl LineScore {
    /// Winning run (five in Omok, four in Connect Four)
    pub const WIN: i32 = 1_000_000;
    /// One short of a win with both ends open - unstoppable next turn
    pub const OPEN_WIN_THREAT: i32 = 100_000;
    /// One short of a win with one open end
    pub const CLOSED_WIN_THREAT: i32 = 50_000;
    /// Two short of a win, both ends open
    pub const OPEN_BUILD: i32 = 10_000;
    /// Two short of a win, one open end
    pub const CLOSED_BUILD: i32 = 1_500;
    /// Early run, both ends open
    pub const OPEN_PAIR: i32 = 1_000;
    /// Early run, one open end
    pub const CLOSED_PAIR: i32 = 200;
}

/// Score a run of `len` friendly pieces with `open_ends` open ends,
/// in a game whose winning run length is `win_len`.
///
/// Runs that cannot grow (`open_ends == 0` and shorter than a win) are
/// dead wood and score zero.
#[must_use]
pub fn run_score(len: u8, open_ends: u8, win_len: u8) -> i32 {
    if len >= win_len {
        return LineScore::WIN;
    }
    if open_ends == 0 {
        return 0;
    }
    let gap = win_len - len;
    let open = open_ends >= 2;
    match (gap, open) {
        (1, true) => LineScore::OPEN_WIN_THREAT,
        (1, false) => LineScore::CLOSED_WIN_THREAT,
        (2, true) => LineScore::OPEN_BUILD,
        (2, false) => LineScore::CLOSED_BUILD,
        (_, true) => LineScore::OPEN_PAIR,
        (_, false) => LineScore::CLOSED_PAIR,
    }
}
