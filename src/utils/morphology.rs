//! Binary morphology with a 3x3 square structuring element
//!
//! The square is separable, so each operator runs a 3-wide horizontal pass
//! followed by a 3-tall vertical pass. Pixels outside the matrix count as
//! foreground for erosion and background for dilation, which keeps the image
//! border from eating into or growing shapes that touch it.

use crate::models::BitMatrix;

/// Erode with a 3x3 square
pub fn erode_3x3(matrix: &BitMatrix) -> BitMatrix {
    let horizontal = sweep(matrix, true, Axis::Horizontal);
    sweep(&horizontal, true, Axis::Vertical)
}

/// Dilate with a 3x3 square
pub fn dilate_3x3(matrix: &BitMatrix) -> BitMatrix {
    let horizontal = sweep(matrix, false, Axis::Horizontal);
    sweep(&horizontal, false, Axis::Vertical)
}

/// Morphological opening (erode then dilate), one iteration
pub fn open_3x3(matrix: &BitMatrix) -> BitMatrix {
    dilate_3x3(&erode_3x3(matrix))
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One separable pass. `erode` selects AND over the 3-neighbourhood (with
/// out-of-range samples reading as set); otherwise OR (reading as clear).
fn sweep(matrix: &BitMatrix, erode: bool, axis: Axis) -> BitMatrix {
    let width = matrix.width();
    let height = matrix.height();
    let mut out = BitMatrix::new(width, height);

    let sample = |x: isize, y: isize| -> bool {
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            erode
        } else {
            matrix.get(x as usize, y as usize)
        }
    };

    for y in 0..height as isize {
        for x in 0..width as isize {
            let (a, b, c) = match axis {
                Axis::Horizontal => (sample(x - 1, y), sample(x, y), sample(x + 1, y)),
                Axis::Vertical => (sample(x, y - 1), sample(x, y), sample(x, y + 1)),
            };
            let value = if erode { a && b && c } else { a || b || c };
            if value {
                out.set(x as usize, y as usize, true);
            }
        }
    }

    out
}
