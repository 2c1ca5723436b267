//! Separating-axis collision detection between squares.
//!
//! A square has two independent edge directions, so a pair needs at most
//! four axis tests. Projections are measured from corner 0 of the square
//! that owns the axis, which puts that square's own extent at `[0, side]`.

use serde::{Deserialize, Serialize};

use crate::geometry::{CornerSet, Point};

/// Min and max of `corners` projected onto `axis`, relative to `origin`.
fn project(corners: &CornerSet, origin: Point, axis: Point) -> (f64, f64) {
    corners
        .corners()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            let dot = axis.dot(p - origin);
            (lo.min(dot), hi.max(dot))
        })
}

/// One-sided test: does `b` overlap `a` on both of `a`'s edge axes?
///
/// Returns `false` as soon as one of `a`'s axes separates the squares.
/// Projections that only share an endpoint with `[0, side]` separate.
pub fn sat_one_sided(a: &CornerSet, b: &CornerSet, side: f64) -> bool {
    let [origin, right, _, down] = *a.corners();
    for far in [right, down] {
        let axis = (far - origin).scale(1.0 / side);
        let (lo, hi) = project(b, origin, axis);
        if hi <= 0.0 || lo >= side {
            return false;
        }
    }
    true
}

/// True if the interiors of two squares overlap.
///
/// Symmetric in `a` and `b`. Touching edges or corners do not overlap.
pub fn overlaps(a: &CornerSet, b: &CornerSet, side: f64) -> bool {
    sat_one_sided(a, b, side) && sat_one_sided(b, a, side)
}

/// Every overlapping pair in a packing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// Overlapping pairs `(i, j)` with `i < j`, in lexicographic order.
    pub pairs: Vec<(usize, usize)>,
}

impl CollisionReport {
    /// True when at least one pair overlaps.
    pub fn any(&self) -> bool {
        !self.pairs.is_empty()
    }
}

/// Checks every unordered pair once and reports all overlaps.
///
/// Quadratic in the number of squares. No early exit, so the full pair
/// list is always available.
pub fn all_collisions(packing: &[CornerSet], side: f64) -> CollisionReport {
    let mut pairs = Vec::new();
    for (i, a) in packing.iter().enumerate() {
        for (j, b) in packing.iter().enumerate().skip(i + 1) {
            if overlaps(a, b, side) {
                pairs.push((i, j));
            }
        }
    }
    CollisionReport { pairs }
}
