use crate::models::{Bar, BitMatrix};

/// Merge the closest adjacent pair into its midpoint until at most `target` remain.
///
/// Always collapses the smallest gap (left-most on ties) and rounds the
/// midpoint down. Greedy: a later merge never revisits an earlier one.
pub fn merge_closest(mut xs: Vec<usize>, target: usize) -> Vec<usize> {
    while xs.len() > target && xs.len() >= 2 {
        let k = (0..xs.len() - 1)
            .min_by_key(|&i| xs[i + 1] - xs[i])
            .unwrap_or(0);
        xs[k] = (xs[k] + xs[k + 1]) / 2;
        xs.remove(k + 1);
    }
    xs
}

/// Insert the midpoint of the widest gap until `target` positions exist.
///
/// Picks the widest gap (left-most on ties) each round. A single position
/// has no gap to split and is returned as is.
pub fn split_widest(mut xs: Vec<usize>, target: usize) -> Vec<usize> {
    while xs.len() < target && xs.len() > 1 {
        let mut k = 0;
        for i in 1..xs.len() - 1 {
            if xs[i + 1] - xs[i] > xs[k + 1] - xs[k] {
                k = i;
            }
        }
        let mid = (xs[k] + xs[k + 1]) / 2;
        xs.insert(k + 1, mid);
    }
    xs
}

/// Force a sorted peak list to exactly `target` entries where possible
pub fn correct_count(xs: Vec<usize>, target: usize) -> Vec<usize> {
    let xs = merge_closest(xs, target);
    split_widest(xs, target)
}

/// Offsets probed, in order, when a peak column holds no ink
const PROBE_OFFSETS: [isize; 4] = [-1, 1, -2, 2];

/// Rebuild a bar around peak column `x`.
///
/// The vertical extent comes from the ink in column `x` (or the first of
/// `x-1, x+1, x-2, x+2` that has any). The horizontal extent is the ink run
/// through `x` on row `midline`, at least one pixel wide. Returns `None`
/// when no probed column holds ink.
pub fn reconstruct_bar(matrix: &BitMatrix, x: usize, midline: usize) -> Option<Bar> {
    let width = matrix.width();
    if width == 0 {
        return None;
    }
    let x = x.min(width - 1);

    let (top, bottom) = matrix.column_extent(x).or_else(|| {
        PROBE_OFFSETS.iter().find_map(|&dx| {
            let xx = x as isize + dx;
            if xx < 0 || xx as usize >= width {
                return None;
            }
            matrix.column_extent(xx as usize)
        })
    })?;

    let mut left = x;
    while left > 0 && matrix.get(left - 1, midline) {
        left -= 1;
    }
    let mut right = x;
    while right + 1 < width && matrix.get(right + 1, midline) {
        right += 1;
    }

    Some(Bar::new(left, top, (right - left + 1).max(1), bottom - top + 1))
}
