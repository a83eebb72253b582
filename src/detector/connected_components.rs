/// Connected components over a binary raster
/// Finds 8-connected foreground regions and tells outer regions from nested ones
use crate::models::{Bar, BitMatrix};

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    /// Add a fresh singleton set and return its id
    pub fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    /// Number of sets ever created
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether no set has been created
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set holding `x`, with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    /// Merge the sets holding `x` and `y`
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// Per-pixel region labels and one bounding box per region
///
/// `labels[y * width + x]` is `0` for background and `i + 1` for a pixel of
/// the region whose box is `boxes[i]`.
pub struct RegionMap {
    /// Region index plus one per pixel, 0 for background
    pub labels: Vec<usize>,
    /// Bounding box per region, in order of each region's first pixel in raster order
    pub boxes: Vec<Bar>,
}

/// Label 8-connected foreground regions
pub fn label_regions(matrix: &BitMatrix) -> RegionMap {
    let width = matrix.width();
    let height = matrix.height();

    let mut provisional = vec![0u32; width * height];
    // set 0 stands for background
    let mut uf = UnionFind::new(1);

    // First pass: provisional labels
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }

            let idx = y * width + x;
            let mut neighbors = [0u32; 4];
            let mut count = 0;

            // left
            if x > 0 && matrix.get(x - 1, y) {
                neighbors[count] = provisional[idx - 1];
                count += 1;
            }
            if y > 0 {
                let above = idx - width;
                // upper-left
                if x > 0 && matrix.get(x - 1, y - 1) {
                    neighbors[count] = provisional[above - 1];
                    count += 1;
                }
                // above
                if matrix.get(x, y - 1) {
                    neighbors[count] = provisional[above];
                    count += 1;
                }
                // upper-right
                if x + 1 < width && matrix.get(x + 1, y - 1) {
                    neighbors[count] = provisional[above + 1];
                    count += 1;
                }
            }

            let seen = &neighbors[..count];
            match seen.iter().copied().min() {
                None => provisional[idx] = uf.make_set(),
                Some(min_label) => {
                    provisional[idx] = min_label;
                    for &l in seen {
                        if l != min_label {
                            uf.union(min_label, l);
                        }
                    }
                }
            }
        }
    }

    // Second pass: final labels and bounding boxes per root, in first-seen order
    let mut slot_of_root = vec![usize::MAX; uf.len()];
    let mut labels = vec![0usize; width * height];
    let mut corners: Vec<(usize, usize, usize, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if provisional[idx] == 0 {
                continue;
            }
            let root = uf.find(provisional[idx]) as usize;

            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = corners.len();
                corners.push((x, y, x, y));
            }
            let slot = slot_of_root[root];
            labels[idx] = slot + 1;
            let entry = &mut corners[slot];
            entry.0 = entry.0.min(x);
            entry.1 = entry.1.min(y);
            entry.2 = entry.2.max(x);
            entry.3 = entry.3.max(y);
        }
    }

    let boxes = corners
        .into_iter()
        .map(|(min_x, min_y, max_x, max_y)| Bar::from_corners(min_x, min_y, max_x, max_y))
        .collect();
    RegionMap { labels, boxes }
}

/// Find 8-connected foreground regions and return their bounding boxes
///
/// Boxes come back in order of each region's first pixel in raster order.
pub fn find_foreground_regions(matrix: &BitMatrix) -> Vec<Bar> {
    label_regions(matrix).boxes
}

/// Bounding boxes of the regions not enclosed in a hole of another region
///
/// Background is 4-connected (the dual of 8-connected foreground). A region
/// is outer when it touches the image border or a background pixel reachable
/// from outside the image. Runs in time linear in the pixel count.
pub fn find_outer_regions(matrix: &BitMatrix) -> Vec<Bar> {
    let width = matrix.width();
    let height = matrix.height();
    let RegionMap { labels, boxes } = label_regions(matrix);

    let outside = outer_background(matrix);
    let mut is_outer = vec![false; boxes.len()];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let label = labels[idx];
            if label == 0 || is_outer[label - 1] {
                continue;
            }
            let on_border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            let touches_outside = on_border
                || outside[idx - 1]
                || outside[idx + 1]
                || outside[idx - width]
                || outside[idx + width];
            if touches_outside {
                is_outer[label - 1] = true;
            }
        }
    }

    boxes
        .into_iter()
        .zip(is_outer)
        .filter_map(|(bar, outer)| outer.then_some(bar))
        .collect()
}

/// Background pixels 4-connected to the image border
fn outer_background(matrix: &BitMatrix) -> Vec<bool> {
    let width = matrix.width();
    let height = matrix.height();
    let mut outside = vec![false; width * height];
    if outside.is_empty() {
        return outside;
    }
    let mut stack = Vec::new();

    let seed = |x: usize, y: usize, outside: &mut [bool], stack: &mut Vec<(usize, usize)>| {
        let idx = y * width + x;
        if !outside[idx] && !matrix.get(x, y) {
            outside[idx] = true;
            stack.push((x, y));
        }
    };

    for x in 0..width {
        seed(x, 0, &mut outside, &mut stack);
        if height > 1 {
            seed(x, height - 1, &mut outside, &mut stack);
        }
    }
    for y in 0..height {
        seed(0, y, &mut outside, &mut stack);
        if width > 1 {
            seed(width - 1, y, &mut outside, &mut stack);
        }
    }

    while let Some((x, y)) = stack.pop() {
        if x > 0 {
            seed(x - 1, y, &mut outside, &mut stack);
        }
        if x + 1 < width {
            seed(x + 1, y, &mut outside, &mut stack);
        }
        if y > 0 {
            seed(x, y - 1, &mut outside, &mut stack);
        }
        if y + 1 < height {
            seed(x, y + 1, &mut outside, &mut stack);
        }
    }

    outside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_foreground_regions() {
        let mut matrix = BitMatrix::new(10, 10);
        // Create 2x2 square at (2,2)
        matrix.set(2, 2, true);
        matrix.set(3, 2, true);
        matrix.set(2, 3, true);
        matrix.set(3, 3, true);

        let regions = find_foreground_regions(&matrix);
        assert_eq!(regions, vec![Bar::from_corners(2, 2, 3, 3)]);
    }

    #[test]
    fn test_diagonal_pixels_connect() {
        let mut matrix = BitMatrix::new(6, 6);
        matrix.set(1, 1, true);
        matrix.set(2, 2, true);
        matrix.set(3, 1, true);

        let regions = find_foreground_regions(&matrix);
        assert_eq!(regions, vec![Bar::from_corners(1, 1, 3, 2)]);
    }

    #[test]
    fn test_u_shape_merges_late() {
        // two arms only meet on the bottom row
        let mut matrix = BitMatrix::new(7, 5);
        for y in 0..5 {
            matrix.set(1, y, true);
            matrix.set(5, y, true);
        }
        for x in 1..=5 {
            matrix.set(x, 4, true);
        }
        matrix.set(3, 0, true);

        let regions = find_foreground_regions(&matrix);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], Bar::from_corners(1, 0, 5, 4));
        assert_eq!(regions[1], Bar::from_corners(3, 0, 3, 0));
    }

    fn draw(matrix: &mut BitMatrix, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                matrix.set(x, y, true);
            }
        }
    }

    #[test]
    fn test_region_in_hole_is_dropped() {
        let mut matrix = BitMatrix::new(20, 12);
        // closed frame with a blob inside its hole
        draw(&mut matrix, 1, 1, 10, 1);
        draw(&mut matrix, 1, 10, 10, 10);
        draw(&mut matrix, 1, 1, 1, 10);
        draw(&mut matrix, 10, 1, 10, 10);
        draw(&mut matrix, 4, 4, 6, 6);
        // separate bar beside it
        draw(&mut matrix, 13, 0, 15, 11);

        let all = find_foreground_regions(&matrix);
        assert_eq!(all.len(), 3);

        let outer = find_outer_regions(&matrix);
        assert_eq!(
            outer,
            vec![Bar::from_corners(13, 0, 15, 11), Bar::from_corners(1, 1, 10, 10)]
        );
    }

    #[test]
    fn test_region_inside_open_box_is_kept() {
        let mut matrix = BitMatrix::new(20, 12);
        // an L: its bounding box covers the blob, but no hole encloses it
        draw(&mut matrix, 1, 1, 2, 10);
        draw(&mut matrix, 1, 9, 12, 10);
        draw(&mut matrix, 6, 2, 8, 6);

        let outer = find_outer_regions(&matrix);
        assert_eq!(
            outer,
            vec![Bar::from_corners(1, 1, 12, 10), Bar::from_corners(6, 2, 8, 6)]
        );
    }

    #[test]
    fn test_hole_with_a_diagonal_gap_stays_closed() {
        // 4-connected background cannot leak through a diagonal corner
        let mut matrix = BitMatrix::new(7, 7);
        draw(&mut matrix, 1, 1, 4, 1);
        draw(&mut matrix, 1, 1, 1, 5);
        draw(&mut matrix, 1, 5, 5, 5);
        draw(&mut matrix, 5, 2, 5, 5);
        matrix.set(3, 3, true);

        let outer = find_outer_regions(&matrix);
        assert_eq!(outer, vec![Bar::from_corners(1, 1, 5, 5)]);
    }

    #[test]
    fn test_empty_and_full_matrices() {
        assert!(find_outer_regions(&BitMatrix::new(0, 0)).is_empty());
        assert!(find_outer_regions(&BitMatrix::new(4, 0)).is_empty());
        assert!(find_outer_regions(&BitMatrix::new(5, 5)).is_empty());

        let mut full = BitMatrix::new(3, 2);
        draw(&mut full, 0, 0, 2, 1);
        assert_eq!(find_outer_regions(&full), vec![Bar::from_corners(0, 0, 2, 1)]);
    }
}
