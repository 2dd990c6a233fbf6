//! Renju forbidden-move detection for black
//!
//! Black may not play a move that creates two simultaneous free threes
//! (double-three), two simultaneous fours (double-four), or a line of
//! six or more (overline). Checks run against the *prospective* board,
//! before the stone is committed; a rejected move never touches state.
//!
//! The line scan is gap-aware: `_BB_B_` counts as a three because one
//! filled gap turns it into an open four.

use crate::error::ForbiddenKind;
use crate::types::{Pos, Side};

use super::SIZE;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

type Cells = [[Option<Side>; SIZE]; SIZE];

/// Stones collected along one line through the probe position, allowing
/// a single gap per scan direction.
#[derive(Debug)]
struct LinePattern {
    /// Offsets of black stones from the probe (0 = the probe itself)
    stones: Vec<i32>,
    /// Ends that terminate in an empty cell (0, 1 or 2)
    open_ends: u8,
    /// Distance spanned by the outermost stones
    span: i32,
}

#[inline]
fn at(cells: &Cells, r: i32, c: i32) -> Option<Option<Side>> {
    if Pos::in_bounds(r, c, SIZE, SIZE) {
        Some(cells[r as usize][c as usize])
    } else {
        None
    }
}

/// Scan both ways from `pos` along `(dr, dc)` as if black had already
/// played there. At most one empty gap per direction is tolerated when a
/// black stone continues behind it.
fn scan_line(cells: &Cells, pos: Pos, dr: i32, dc: i32, allow_gap: bool) -> LinePattern {
    let mut stones = vec![0i32];
    let mut open_ends = 0u8;

    for sign in [1i32, -1] {
        let mut gap_used = false;
        for i in 1..=5 {
            let r = pos.row as i32 + dr * i * sign;
            let c = pos.col as i32 + dc * i * sign;
            match at(cells, r, c) {
                None => break, // board edge
                Some(Some(Side::First)) => stones.push(i * sign),
                Some(Some(Side::Second)) => break,
                Some(None) => {
                    if allow_gap && !gap_used {
                        // Continue through a single gap only when a black
                        // stone sits directly behind it
                        let nr = r + dr * sign;
                        let nc = c + dc * sign;
                        if at(cells, nr, nc) == Some(Some(Side::First)) {
                            gap_used = true;
                            continue;
                        }
                    }
                    open_ends += 1;
                    break;
                }
            }
        }
    }

    stones.sort_unstable();
    let span = stones[stones.len() - 1] - stones[0] + 1;
    LinePattern { stones, open_ends, span }
}

/// A free three: exactly three stones, both ends open, spanning at most
/// four cells (`BBB` or a single-gap `BB_B`/`B_BB`), so one more stone
/// makes an open four.
fn is_free_three(p: &LinePattern) -> bool {
    if p.stones.len() != 3 || p.open_ends < 2 || p.span > 4 {
        return false;
    }
    if p.span == 4 {
        // The single gap must sit inside the trio
        let d1 = p.stones[1] - p.stones[0];
        let d2 = p.stones[2] - p.stones[1];
        return (d1 == 1 && d2 == 2) || (d1 == 2 && d2 == 1);
    }
    true
}

/// Distinct fours a black placement at `pos` would create along one
/// line: five-cell windows through the probe holding four black stones
/// and one empty cell, deduplicated by their stone set. An open four
/// has two completing cells but one stone set, so it counts once; the
/// split pattern `BBB_*_BBB` yields two sets and counts twice.
fn fours_on_line(cells: &Cells, pos: Pos, dr: i32, dc: i32) -> u8 {
    let mut stone_sets: Vec<[i32; 4]> = Vec::new();
    for start in -4..=0i32 {
        let mut stones = Vec::with_capacity(4);
        let mut empties = 0;
        let mut blocked = false;
        for i in start..start + 5 {
            if i == 0 {
                stones.push(i);
                continue;
            }
            let r = pos.row as i32 + dr * i;
            let c = pos.col as i32 + dc * i;
            match at(cells, r, c) {
                Some(Some(Side::First)) => stones.push(i),
                Some(None) => empties += 1,
                _ => {
                    blocked = true;
                    break;
                }
            }
        }
        if blocked || stones.len() != 4 || empties != 1 {
            continue;
        }
        let set = [stones[0], stones[1], stones[2], stones[3]];
        if !stone_sets.contains(&set) {
            stone_sets.push(set);
        }
    }
    stone_sets.len() as u8
}

fn creates_free_three(cells: &Cells, pos: Pos, dr: i32, dc: i32) -> bool {
    let gapped = scan_line(cells, pos, dr, dc, true);
    if is_free_three(&gapped) {
        return true;
    }
    // A gap-connected extra stone can hide a consecutive free three;
    // re-scan without gaps to catch it.
    if gapped.stones.len() > 3 {
        return is_free_three(&scan_line(cells, pos, dr, dc, false));
    }
    false
}

/// Length of the consecutive black run through `pos` after a virtual
/// placement there.
fn run_length(cells: &Cells, pos: Pos, dr: i32, dc: i32) -> i32 {
    let mut len = 1;
    for sign in [1i32, -1] {
        let mut i = 1;
        while at(cells, pos.row as i32 + dr * i * sign, pos.col as i32 + dc * i * sign)
            == Some(Some(Side::First))
        {
            len += 1;
            i += 1;
        }
    }
    len
}

/// Number of free threes a black placement at `pos` would create
pub fn count_free_threes(cells: &Cells, pos: Pos) -> u8 {
    let mut count = 0;
    for &(dr, dc) in &DIRECTIONS {
        if creates_free_three(cells, pos, dr, dc) {
            count += 1;
            if count >= 2 {
                break;
            }
        }
    }
    count
}

/// Number of distinct fours a black placement at `pos` would create,
/// counting two on the same line separately
pub fn count_fours(cells: &Cells, pos: Pos) -> u8 {
    let mut count = 0;
    for &(dr, dc) in &DIRECTIONS {
        count += fours_on_line(cells, pos, dr, dc);
        if count >= 2 {
            break;
        }
    }
    count.min(2)
}

/// Check a prospective black placement against the Renju restrictions.
///
/// `pos` must be an empty cell. Callers exempt outright winning moves
/// before calling (a move completing exactly five is never forbidden).
pub fn check(cells: &Cells, pos: Pos) -> Option<ForbiddenKind> {
    if DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(cells, pos, dr, dc) >= 6)
    {
        return Some(ForbiddenKind::Overline);
    }
    if count_fours(cells, pos) >= 2 {
        return Some(ForbiddenKind::DoubleFour);
    }
    if count_free_threes(cells, pos) >= 2 {
        return Some(ForbiddenKind::DoubleThree);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(black: &[(u8, u8)], white: &[(u8, u8)]) -> Cells {
        let mut cells = [[None; SIZE]; SIZE];
        for &(r, c) in black {
            cells[r as usize][c as usize] = Some(Side::First);
        }
        for &(r, c) in white {
            cells[r as usize][c as usize] = Some(Side::Second);
        }
        cells
    }

    #[test]
    fn test_empty_board_nothing_forbidden() {
        let cells = board(&[], &[]);
        assert_eq!(check(&cells, Pos::new(9, 9)), None);
    }

    #[test]
    fn test_single_free_three_allowed() {
        // _ B _ B _ ; placing between makes one open three
        let cells = board(&[(9, 8), (9, 10)], &[]);
        assert_eq!(count_free_threes(&cells, Pos::new(9, 9)), 1);
        assert_eq!(check(&cells, Pos::new(9, 9)), None);
    }

    #[test]
    fn test_double_three_cross() {
        let cells = board(&[(9, 8), (9, 10), (8, 9), (10, 9)], &[]);
        assert_eq!(count_free_threes(&cells, Pos::new(9, 9)), 2);
        assert_eq!(check(&cells, Pos::new(9, 9)), Some(ForbiddenKind::DoubleThree));
    }

    #[test]
    fn test_double_three_diagonal_cross() {
        let cells = board(&[(8, 8), (10, 10), (8, 10), (10, 8)], &[]);
        assert_eq!(check(&cells, Pos::new(9, 9)), Some(ForbiddenKind::DoubleThree));
    }

    #[test]
    fn test_blocked_three_not_free() {
        // W B _ B _ ; the left end is closed, so no free three
        let cells = board(&[(9, 6), (9, 8)], &[(9, 5)]);
        assert_eq!(count_free_threes(&cells, Pos::new(9, 7)), 0);
    }

    #[test]
    fn test_gapped_free_three() {
        // _ B B _ * _ with the probe two to the right of the pair
        let cells = board(&[(9, 6), (9, 7)], &[]);
        assert_eq!(count_free_threes(&cells, Pos::new(9, 9)), 1);
    }

    #[test]
    fn test_edge_blocked_three_not_free() {
        // B at column 0 leaves no room behind; not a free three
        let cells = board(&[(0, 0), (0, 2)], &[]);
        assert_eq!(count_free_threes(&cells, Pos::new(0, 1)), 0);
    }

    #[test]
    fn test_double_four() {
        // Two crossing lines of three; the probe completes a four in each
        let cells = board(
            &[(9, 6), (9, 7), (9, 8), (6, 9), (7, 9), (8, 9)],
            &[(9, 5), (5, 9)], // close one end of each so neither is a win
        );
        assert_eq!(count_fours(&cells, Pos::new(9, 9)), 2);
        assert_eq!(check(&cells, Pos::new(9, 9)), Some(ForbiddenKind::DoubleFour));
    }

    #[test]
    fn test_single_four_allowed() {
        let cells = board(&[(9, 6), (9, 7), (9, 8)], &[(9, 5)]);
        assert_eq!(count_fours(&cells, Pos::new(9, 9)), 1);
        assert_eq!(check(&cells, Pos::new(9, 9)), None);
    }

    #[test]
    fn test_gapped_four_counts() {
        // B B _ B * : the internal gap still completes five, so this is a four
        let cells = board(&[(9, 5), (9, 6), (9, 8)], &[]);
        assert_eq!(count_fours(&cells, Pos::new(9, 9)), 1);
        // Solid four via the probe
        let cells = board(&[(9, 6), (9, 7), (9, 9)], &[]);
        assert!(count_fours(&cells, Pos::new(9, 8)) >= 1);
    }

    #[test]
    fn test_double_four_on_one_line() {
        // B B B _ * _ B B B : one placement completes a four on each
        // side of the gap pair, all in the same direction
        let cells = board(
            &[(9, 3), (9, 4), (9, 5), (9, 9), (9, 10), (9, 11)],
            &[],
        );
        assert_eq!(count_fours(&cells, Pos::new(9, 7)), 2);
        assert_eq!(check(&cells, Pos::new(9, 7)), Some(ForbiddenKind::DoubleFour));
    }

    #[test]
    fn test_open_four_is_a_single_four() {
        // _ B B B * _ : two completing cells but one stone set
        let cells = board(&[(9, 5), (9, 6), (9, 7)], &[]);
        assert_eq!(count_fours(&cells, Pos::new(9, 8)), 1);
        assert_eq!(check(&cells, Pos::new(9, 8)), None);
    }

    #[test]
    fn test_overline() {
        // Five in a row already; filling the middle of B B B _ B B
        let cells = board(&[(9, 4), (9, 5), (9, 6), (9, 8), (9, 9)], &[]);
        assert_eq!(check(&cells, Pos::new(9, 7)), Some(ForbiddenKind::Overline));
    }

    #[test]
    fn test_dead_four_blocked_both_ends_with_gapless_span() {
        // W B B B * W : four stones, span 4, both ends closed - dead
        let cells = board(&[(9, 5), (9, 6), (9, 7)], &[(9, 4), (9, 9)]);
        assert_eq!(count_fours(&cells, Pos::new(9, 8)), 0);
    }
}
