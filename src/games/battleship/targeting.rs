//! Attack selection from public shot information only
//!
//! Two modes. Target mode runs whenever a hit cell belongs to a ship
//! that is not yet sunk: shoot the cells that extend an aligned run of
//! hits, or failing that any unresolved neighbor of a hit. Hunt mode
//! covers the rest of the board on a checkerboard parity mask (no
//! two-cell ship fits between two same-parity cells, so half the squares
//! suffice to find every ship).
//!
//! The hard tier additionally weights every candidate by how many
//! placements of the remaining ships could cover it, which concentrates
//! fire on the open middle instead of the edges.

use rand::{Rng, RngCore};

use crate::types::Pos;

use super::SIZE;

const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const AXES: [(i32, i32); 2] = [(0, 1), (1, 0)];

/// What an attacker knows about the opposing board
pub(crate) struct TargetView {
    /// `Some(true)` hit, `Some(false)` miss, `None` untried
    pub resolved: [[Option<bool>; SIZE]; SIZE],
    /// Cells of ships already reported sunk
    pub sunk: [[bool; SIZE]; SIZE],
    /// Lengths of the ships still afloat
    pub remaining: Vec<u8>,
}

impl TargetView {
    #[inline]
    fn untried(&self, r: i32, c: i32) -> bool {
        Pos::in_bounds(r, c, SIZE, SIZE) && self.resolved[r as usize][c as usize].is_none()
    }

    #[inline]
    fn active_hit(&self, r: i32, c: i32) -> bool {
        Pos::in_bounds(r, c, SIZE, SIZE)
            && self.resolved[r as usize][c as usize] == Some(true)
            && !self.sunk[r as usize][c as usize]
    }

    /// Could a ship segment occupy this cell? Misses and sunk wreckage
    /// exclude it, unresolved and live-hit cells do not.
    #[inline]
    fn could_hold_ship(&self, r: i32, c: i32) -> bool {
        Pos::in_bounds(r, c, SIZE, SIZE)
            && self.resolved[r as usize][c as usize] != Some(false)
            && !self.sunk[r as usize][c as usize]
    }
}

/// Pick the next attack, or `None` when every cell is resolved.
pub(crate) fn select(view: &TargetView, rng: &mut dyn RngCore, density: bool) -> Option<Pos> {
    if let Some(pos) = target_mode(view, rng, density) {
        return Some(pos);
    }
    hunt_mode(view, rng, density)
}

/// Finish off a wounded ship: extend aligned hit runs at their ends,
/// or probe around an isolated hit.
fn target_mode(view: &TargetView, rng: &mut dyn RngCore, density: bool) -> Option<Pos> {
    let mut hits = Vec::new();
    for r in 0..SIZE as i32 {
        for c in 0..SIZE as i32 {
            if view.active_hit(r, c) {
                hits.push((r, c));
            }
        }
    }
    if hits.is_empty() {
        return None;
    }

    // Ends of aligned runs of two or more hits
    let mut candidates = Vec::new();
    for &(dr, dc) in &AXES {
        for &(r, c) in &hits {
            if !view.active_hit(r + dr, c + dc) {
                continue;
            }
            let (mut ar, mut ac) = (r, c);
            while view.active_hit(ar - dr, ac - dc) {
                ar -= dr;
                ac -= dc;
            }
            let (mut br, mut bc) = (r + dr, c + dc);
            while view.active_hit(br + dr, bc + dc) {
                br += dr;
                bc += dc;
            }
            for (er, ec) in [(ar - dr, ac - dc), (br + dr, bc + dc)] {
                if view.untried(er, ec) {
                    candidates.push(Pos::new(er as u8, ec as u8));
                }
            }
        }
    }

    if candidates.is_empty() {
        // Isolated hit: any unresolved orthogonal neighbor
        for &(r, c) in &hits {
            for &(dr, dc) in &ORTHOGONAL {
                if view.untried(r + dr, c + dc) {
                    candidates.push(Pos::new((r + dr) as u8, (c + dc) as u8));
                }
            }
        }
    }

    candidates.sort_unstable_by_key(|p| (p.row, p.col));
    candidates.dedup();
    choose(view, candidates, rng, density)
}

/// Sweep untried cells on the parity mask
fn hunt_mode(view: &TargetView, rng: &mut dyn RngCore, density: bool) -> Option<Pos> {
    let mut pool = Vec::new();
    for r in 0..SIZE as i32 {
        for c in 0..SIZE as i32 {
            if view.untried(r, c) && (r + c) % 2 == 0 {
                pool.push(Pos::new(r as u8, c as u8));
            }
        }
    }
    if pool.is_empty() {
        for r in 0..SIZE as i32 {
            for c in 0..SIZE as i32 {
                if view.untried(r, c) {
                    pool.push(Pos::new(r as u8, c as u8));
                }
            }
        }
    }
    choose(view, pool, rng, density)
}

fn choose(
    view: &TargetView,
    mut candidates: Vec<Pos>,
    rng: &mut dyn RngCore,
    density: bool,
) -> Option<Pos> {
    if candidates.is_empty() {
        return None;
    }
    if density {
        let best = candidates
            .iter()
            .map(|&p| density_score(view, p))
            .max()
            .unwrap_or(0);
        candidates.retain(|&p| density_score(view, p) == best);
    }
    let index = rng.random_range(0..candidates.len());
    Some(candidates[index])
}

/// Number of placements of the remaining ships that would cover `pos`
pub(crate) fn density_score(view: &TargetView, pos: Pos) -> u32 {
    let mut score = 0;
    for &length in &view.remaining {
        for &(dr, dc) in &AXES {
            for offset in 0..length as i32 {
                let fits = (0..length as i32).all(|i| {
                    let r = pos.row as i32 + dr * (i - offset);
                    let c = pos.col as i32 + dc * (i - offset);
                    view.could_hold_ship(r, c)
                });
                if fits {
                    score += 1;
                }
            }
        }
    }
    score
}
