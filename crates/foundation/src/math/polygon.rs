//! Planar polygon helpers for region footprints.
//!
//! Rings are slices of `Vec2`; a closing vertex equal to the first one is
//! allowed and contributes nothing.

use super::Vec2;
use super::precision::stable_total_cmp_f64;

/// Unsigned shoelace area: `0.5 * |Σ(x_i*y_{i+1} - x_{i+1}*y_i)|`.
pub fn ring_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        twice += a.perp_dot(b);
    }
    twice.abs() * 0.5
}

/// Index of the ring with the largest area. The first ring wins ties.
pub fn largest_ring<R: AsRef<[Vec2]>>(rings: &[R]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, ring) in rings.iter().enumerate() {
        let area = ring_area(ring.as_ref());
        best = match best {
            Some((_, best_area)) if stable_total_cmp_f64(area, best_area).is_gt() => {
                Some((idx, area))
            }
            None => Some((idx, area)),
            keep => keep,
        };
    }
    best.map(|(idx, _)| idx)
}

/// Even-odd containment test. Points exactly on an edge may go either way.
pub fn ring_contains(ring: &[Vec2], p: Vec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Removes a trailing vertex that repeats the first one.
pub fn drop_closing_duplicate(ring: &mut Vec<Vec2>) {
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring.pop();
    }
}
