/// Compact bit matrix holding a binary raster
///
/// `true` marks a foreground (bar) pixel. Reads outside the matrix return
/// `false` and writes outside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-background matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        (self.data[byte_index] >> bit_index) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Copy out the half-open region `[x0, x1) x [y0, y1)`, clamped to the matrix
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> BitMatrix {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let w = x1.saturating_sub(x0);
        let h = y1.saturating_sub(y0);

        let mut out = BitMatrix::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if self.get(x0 + x, y0 + y) {
                    out.set(x, y, true);
                }
            }
        }
        out
    }

    /// Number of foreground pixels in column `x`
    pub fn column_count(&self, x: usize) -> usize {
        (0..self.height).filter(|&y| self.get(x, y)).count()
    }

    /// First and last foreground row in column `x`, if any
    pub fn column_extent(&self, x: usize) -> Option<(usize, usize)> {
        let top = (0..self.height).find(|&y| self.get(x, y))?;
        let bottom = (0..self.height).rev().find(|&y| self.get(x, y))?;
        Some((top, bottom))
    }

    /// Total number of foreground pixels
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
