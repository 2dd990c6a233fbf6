//! Direction-agnostic run scanning over arbitrary board storage
//!
//! The scanner walks both ways from an anchor cell and reports the run
//! length and number of open ends. Callers supply a closure mapping
//! signed coordinates to [`LineCell`], so the same code serves Connect
//! Four's 7x6 grid and Omok's 19x19 board.

/// What the scanner sees at a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCell {
    /// A piece of the side being scanned
    Own,
    /// An opposing piece
    Opponent,
    /// An empty, in-bounds cell
    Empty,
    /// Outside the board
    Edge,
}

/// A contiguous run of same-side pieces through the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Number of consecutive friendly pieces, anchor included
    pub len: u8,
    /// Open (empty) ends: 0, 1 or 2
    pub open_ends: u8,
}

/// The four line directions every grid game checks
pub const LINE_DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal down-right
    (1, -1), // diagonal down-left
];

/// Scan the run through `(row, col)` along `(dr, dc)`.
///
/// The anchor is assumed to hold a piece of the scanned side and counts
/// toward the length. `cell` is consulted for every other coordinate and
/// must return [`LineCell::Edge`] out of bounds.
pub fn scan_run<F>(row: i32, col: i32, dr: i32, dc: i32, cell: F) -> Run
where
    F: Fn(i32, i32) -> LineCell,
{
    let mut len = 1u8;
    let mut open_ends = 0u8;

    for sign in [1i32, -1] {
        let mut step = 1;
        loop {
            let r = row + dr * step * sign;
            let c = col + dc * step * sign;
            match cell(r, c) {
                LineCell::Own => {
                    len += 1;
                    step += 1;
                }
                LineCell::Empty => {
                    open_ends += 1;
                    break;
                }
                LineCell::Opponent | LineCell::Edge => break,
            }
        }
    }

    Run { len, open_ends }
}

/// True when the run through the anchor reaches `target` in any of the
/// four line directions. Used for last-move win checks.
pub fn has_run_of<F>(row: i32, col: i32, target: u8, cell: F) -> bool
where
    F: Fn(i32, i32) -> LineCell + Copy,
{
    LINE_DIRECTIONS
        .iter()
        .any(|&(dr, dc)| scan_run(row, col, dr, dc, cell).len >= target)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny fixture: a 1x7 strip described by a byte string.
    /// `o` = own, `x` = opponent, `.` = empty, out of range = edge.
    fn strip(cells: &'static str) -> impl Fn(i32, i32) -> LineCell + Copy {
        move |r, c| {
            if r != 0 || c < 0 || c >= cells.len() as i32 {
                return LineCell::Edge;
            }
            match cells.as_bytes()[c as usize] {
                b'o' => LineCell::Own,
                b'x' => LineCell::Opponent,
                _ => LineCell::Empty,
            }
        }
    }

    #[test]
    fn test_single_piece_both_open() {
        let run = scan_run(0, 3, 0, 1, strip("...o..."));
        assert_eq!(run, Run { len: 1, open_ends: 2 });
    }

    #[test]
    fn test_run_of_three_blocked_one_side() {
        let run = scan_run(0, 2, 0, 1, strip("xooo..."));
        assert_eq!(run, Run { len: 3, open_ends: 1 });
    }

    #[test]
    fn test_run_against_edge() {
        let run = scan_run(0, 0, 0, 1, strip("ooo...."));
        assert_eq!(run, Run { len: 3, open_ends: 1 });
    }

    #[test]
    fn test_fully_blocked_run() {
        let run = scan_run(0, 2, 0, 1, strip("xoox..."));
        assert_eq!(run, Run { len: 2, open_ends: 0 });
    }

    #[test]
    fn test_anchor_mid_run() {
        // Anchor in the middle still counts the whole run
        let run = scan_run(0, 3, 0, 1, strip(".ooooo."));
        assert_eq!(run, Run { len: 5, open_ends: 2 });
    }

    #[test]
    fn test_has_run_of() {
        assert!(has_run_of(0, 3, 5, strip(".ooooo.")));
        assert!(!has_run_of(0, 2, 5, strip(".oooo..")));
    }
}
