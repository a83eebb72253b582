//! Bar extraction modules
//!
//! This module turns a binary raster into exactly 23 bar rectangles:
//! - Connected components (8-connected foreground regions)
//! - Contour pass, with a retry on the cropped content box
//! - Column-density peak fallback for touching or broken bars

/// Union-find labelling of foreground regions
pub mod connected_components;
/// Component-based bar detection and crop retry
pub mod contour;
/// Peak count correction and bar reconstruction
pub mod peaks;
/// Column-density profile, smoothing and peak finding
pub mod profile;

use crate::decoder::config::DecodeParams;
use crate::error::DecodeError;
use crate::models::{Bar, BitMatrix, DIGIT_COUNT};
use contour::ContourDetector;

/// Which stage of the fallback chain produced the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// First contour pass over the full raster
    Contour,
    /// Contour pass over the padded content box
    CroppedContour,
    /// Rebuilt from column-density peaks
    PeakReconstruction,
}

/// Exactly 23 bars sorted by strictly increasing `x`
#[derive(Debug, Clone, PartialEq)]
pub struct BarExtraction {
    /// Bars left to right
    pub bars: [Bar; DIGIT_COUNT],
    /// Stage that produced them
    pub path: ExtractionPath,
}

/// Counts recorded at each stage, whether or not extraction succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Bars found by the first contour pass
    pub contour_bars: usize,
    /// Bars found by the crop retry, if it ran
    pub cropped_bars: Option<usize>,
    /// Peaks found in the smoothed profile, if the fallback ran
    pub raw_peaks: Option<usize>,
    /// Peaks left after count correction, if the fallback ran
    pub corrected_peaks: Option<usize>,
}

/// Extract 23 bars, trying contour, cropped contour, then peak reconstruction
pub fn extract_bars(matrix: &BitMatrix, params: &DecodeParams) -> Result<BarExtraction, DecodeError> {
    extract_bars_with_stats(matrix, params, &mut ExtractionStats::default())
}

/// Like [`extract_bars`] but also fills `stats` for diagnostics
pub fn extract_bars_with_stats(
    matrix: &BitMatrix,
    params: &DecodeParams,
    stats: &mut ExtractionStats,
) -> Result<BarExtraction, DecodeError> {
    let found = ContourDetector::detect(matrix, params);
    stats.contour_bars = found.len();
    if let Some(bars) = accept(&found) {
        return Ok(BarExtraction {
            bars,
            path: ExtractionPath::Contour,
        });
    }

    if !found.is_empty() && found.len() != DIGIT_COUNT {
        log::debug!(
            "contour pass found {} bars, retrying on the content box",
            found.len()
        );
        let cropped = ContourDetector::detect_cropped(matrix, &found, params);
        stats.cropped_bars = Some(cropped.len());
        if let Some(bars) = accept(&cropped) {
            return Ok(BarExtraction {
                bars,
                path: ExtractionPath::CroppedContour,
            });
        }
    }

    log::debug!("contour extraction failed, falling back to column-density peaks");
    let bars = extract_from_peaks(matrix, params, stats)?;
    Ok(BarExtraction {
        bars,
        path: ExtractionPath::PeakReconstruction,
    })
}

fn extract_from_peaks(
    matrix: &BitMatrix,
    params: &DecodeParams,
    stats: &mut ExtractionStats,
) -> Result<[Bar; DIGIT_COUNT], DecodeError> {
    let density = profile::column_density(matrix);
    let smooth = profile::gaussian_smooth(&density, params.smoothing_sigma);
    let found = profile::find_peaks(&smooth, params.peak_distance(matrix.width()));
    stats.raw_peaks = Some(found.len());

    if found.is_empty() {
        return Err(DecodeError::NoBarsDetected);
    }

    let corrected = peaks::correct_count(found, DIGIT_COUNT);
    stats.corrected_peaks = Some(corrected.len());
    log::debug!(
        "peak fallback: {} raw peaks, {} after correction",
        stats.raw_peaks.unwrap_or(0),
        corrected.len()
    );
    if corrected.len() != DIGIT_COUNT {
        return Err(DecodeError::BarCountMismatch {
            detected: corrected.len(),
        });
    }

    let midline = matrix.height() / 2;
    let mut bars: Vec<Bar> = corrected
        .iter()
        .filter_map(|&x| peaks::reconstruct_bar(matrix, x, midline))
        .collect();
    bars.sort_by_key(|bar| bar.x);
    // neighbouring peaks inside one ink run rebuild the same bar
    bars.dedup_by_key(|bar| bar.x);

    for bar in &bars {
        log::trace!("reconstructed bar {:?}", bar);
    }

    let detected = bars.len();
    accept(&bars).ok_or(DecodeError::BarCountMismatch { detected })
}

/// 23 bars with strictly increasing `x`, or nothing
fn accept(bars: &[Bar]) -> Option<[Bar; DIGIT_COUNT]> {
    if !bars.windows(2).all(|w| w[0].x < w[1].x) {
        return None;
    }
    <[Bar; DIGIT_COUNT]>::try_from(bars).ok()
}
