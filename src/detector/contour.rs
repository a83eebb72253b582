use crate::decoder::config::DecodeParams;
use crate::detector::connected_components::find_outer_regions;
use crate::models::{Bar, BitMatrix};

/// Component-based bar finder, the precise first stage of extraction.
pub struct ContourDetector;

impl ContourDetector {
    /// Outer foreground regions tall enough to be bars, sorted left to right.
    ///
    /// Regions shorter than `max(8, 0.05 * height)` are specks and dropped.
    pub fn detect(matrix: &BitMatrix, params: &DecodeParams) -> Vec<Bar> {
        let min_height = params.min_bar_height(matrix.height());

        let mut bars: Vec<Bar> = find_outer_regions(matrix)
            .into_iter()
            .filter(|bar| bar.height >= min_height)
            .collect();
        bars.sort_by_key(|bar| bar.x);

        log::trace!(
            "contour pass on {}x{}: {} bars (min height {})",
            matrix.width(),
            matrix.height(),
            bars.len(),
            min_height
        );
        bars
    }

    /// Re-run [`ContourDetector::detect`] on the padded bounding box of `found`.
    ///
    /// Returns the bars translated back into `matrix` coordinates. The crop
    /// changes the relative height filter, so bars rejected against a tall
    /// canvas can pass once the canvas is trimmed to the content.
    pub fn detect_cropped(matrix: &BitMatrix, found: &[Bar], params: &DecodeParams) -> Vec<Bar> {
        let Some((x0, y0, x1, y1)) = content_box(found) else {
            return Vec::new();
        };

        let pad = params.crop_padding;
        let x0 = x0.saturating_sub(pad);
        let y0 = y0.saturating_sub(pad);
        let x1 = (x1 + pad).min(matrix.width());
        let y1 = (y1 + pad).min(matrix.height());

        let cropped = matrix.crop(x0, y0, x1, y1);
        Self::detect(&cropped, params)
            .into_iter()
            .map(|bar| bar.translate(x0, y0))
            .collect()
    }
}

/// Half-open box `[x0, x1) x [y0, y1)` enclosing every bar
fn content_box(bars: &[Bar]) -> Option<(usize, usize, usize, usize)> {
    let x0 = bars.iter().map(|b| b.x).min()?;
    let y0 = bars.iter().map(|b| b.y).min()?;
    let x1 = bars.iter().map(|b| b.x + b.width).max()?;
    let y1 = bars.iter().map(|b| b.y + b.height).max()?;
    Some((x0, y0, x1, y1))
}
