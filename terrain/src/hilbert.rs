//! Two-dimensional Hilbert curve index mapping.
//!
//! Snapshots list a chunk's cells in Hilbert order so that runs of equal
//! altitude stay long. The traversal is Skilling's transpose form
//! ("Programming the Hilbert curve", AIP Conf. Proc. 707, 2004); the server
//! encodes with the same variant, and any other orientation of the curve
//! scrambles decoded terrain.

/// Maps a distance along the curve to an `(x, y)` grid point.
///
/// `order` is `log2` of the grid side; `distance` must be below
/// `4^order`. Higher bits of `distance` are ignored.
#[must_use]
pub fn point_from_distance(order: u32, distance: u32) -> (u32, u32) {
    debug_assert!((1..=16).contains(&order), "order {order} out of range");
    let mut x = deinterleave(order, distance);

    // Gray decode.
    let t = x[1] >> 1;
    x[1] ^= x[0];
    x[0] ^= t;

    // Undo excess work.
    let top = 2u32 << (order - 1);
    let mut q = 2u32;
    while q != top {
        let p = q - 1;
        for i in (0..2).rev() {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q <<= 1;
    }

    (x[0], x[1])
}

/// Maps an `(x, y)` grid point to its distance along the curve.
///
/// Inverse of [`point_from_distance`] for points inside the grid.
#[must_use]
pub fn distance_from_point(order: u32, point: (u32, u32)) -> u32 {
    debug_assert!((1..=16).contains(&order), "order {order} out of range");
    let mut x = [point.0, point.1];
    let m = 1u32 << (order - 1);

    // Inverse undo.
    let mut q = m;
    while q > 1 {
        let p = q - 1;
        for i in 0..2 {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q >>= 1;
    }

    // Gray encode.
    x[1] ^= x[0];
    let mut t = 0u32;
    let mut q = m;
    while q > 1 {
        if x[1] & q != 0 {
            t ^= q - 1;
        }
        q >>= 1;
    }
    x[0] ^= t;
    x[1] ^= t;

    interleave(order, x)
}

/// Splits a distance into its transposed form: bits are taken from the most
/// significant end, alternating between the two axes.
fn deinterleave(order: u32, distance: u32) -> [u32; 2] {
    let width = 2 * order;
    let mut x = [0u32; 2];
    for k in 0..width {
        let bit = (distance >> (width - 1 - k)) & 1;
        let axis = (k % 2) as usize;
        x[axis] = (x[axis] << 1) | bit;
    }
    x
}

fn interleave(order: u32, x: [u32; 2]) -> u32 {
    let mut distance = 0u32;
    for level in (0..order).rev() {
        for axis in x {
            distance = (distance << 1) | ((axis >> level) & 1);
        }
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_one_visits_unit_square() {
        let points: Vec<_> = (0..4).map(|d| point_from_distance(1, d)).collect();
        assert_eq!(points, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn curve_starts_at_origin() {
        for order in 1..=8 {
            assert_eq!(point_from_distance(order, 0), (0, 0));
        }
    }

    #[test]
    fn consecutive_distances_are_neighbours() {
        let order = 6;
        let mut prev = point_from_distance(order, 0);
        for d in 1..4096 {
            let next = point_from_distance(order, d);
            let dx = prev.0.abs_diff(next.0);
            let dy = prev.1.abs_diff(next.1);
            assert_eq!(dx + dy, 1, "distance {d}: {prev:?} -> {next:?}");
            prev = next;
        }
    }

    #[test]
    fn mapping_is_a_bijection() {
        let order = 6;
        let mut seen = vec![false; 64 * 64];
        for d in 0..4096 {
            let (x, y) = point_from_distance(order, d);
            assert!(x < 64 && y < 64);
            let idx = (x * 64 + y) as usize;
            assert!(!seen[idx], "point ({x}, {y}) visited twice");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn distance_inverts_point() {
        for order in 1..=6 {
            let cells = 1u32 << (2 * order);
            for d in 0..cells {
                let p = point_from_distance(order, d);
                assert_eq!(distance_from_point(order, p), d, "order {order}");
            }
        }
    }

    #[test]
    fn curve_ends_on_bottom_edge() {
        // The last cell of a Hilbert curve is adjacent to the start corner's edge.
        let (x, y) = point_from_distance(6, 4095);
        assert_eq!((x, y), (63, 0));
    }

    #[test]
    fn transpose_roundtrip() {
        for d in 0..4096 {
            assert_eq!(interleave(6, deinterleave(6, d)), d);
        }
    }
}
