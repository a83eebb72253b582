use crate::models::Bar;

/// Half-height of each bar about the row `midline`.
///
/// Takes the shorter of the two arms, `min(midline - top, bottom - midline)`,
/// so ink bleeding past one side of the bar does not inflate the reading.
/// A bar entirely above or below the midline measures 0.
pub fn measure(bars: &[Bar], midline: usize) -> Vec<f64> {
    bars.iter()
        .map(|bar| {
            let above = midline.saturating_sub(bar.y);
            let below = bar.bottom().saturating_sub(midline);
            above.min(below) as f64
        })
        .collect()
}
