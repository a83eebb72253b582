//! Decode pipeline shared by every public entry point
//!
//! Runs binarization, bar extraction, measurement, calibration and digit
//! mapping in order, recording what each stage saw in [`DecodeTelemetry`].

use crate::decoder::calibration::{CalibrationStep, calibrate};
use crate::decoder::config::DecodeParams;
use crate::decoder::mapping::map_digits;
use crate::decoder::measure::measure;
use crate::detector::{ExtractionPath, ExtractionStats, extract_bars_with_stats};
use crate::error::DecodeError;
use crate::models::{BitMatrix, DigitString};
use crate::utils::binarization::binarize;

/// Stage-level counters from one decode call.
///
/// Filled as far as the pipeline got, so a failed decode still shows which
/// stage gave up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeTelemetry {
    /// Foreground pixels after binarization and opening
    pub ink_pixels: usize,
    /// Bar and peak counts from the extraction stages
    pub extraction: ExtractionStats,
    /// Stage that produced the 23 bars, if any did
    pub path: Option<ExtractionPath>,
    /// Half-heights of the extracted bars, left to right
    pub half_heights: Vec<f64>,
    /// Unit step derived from the reference bars
    pub calibration: Option<CalibrationStep>,
}

/// Decode a grayscale buffer of `width * height` bytes
pub(crate) fn decode_gray(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &DecodeParams,
) -> (Result<DigitString, DecodeError>, DecodeTelemetry) {
    let mut tel = DecodeTelemetry::default();
    let binary = match binarize(gray, width, height, params) {
        Ok(binary) => binary,
        Err(err) => return (Err(err), tel),
    };
    tel.ink_pixels = binary.count_ones();

    let result = decode_binary(&binary, params, &mut tel);
    match &result {
        Ok(digits) => log::debug!("decoded {digits} via {:?}", tel.path),
        Err(err) => log::debug!("decode failed on {width}x{height} image: {err}"),
    }
    (result, tel)
}

fn decode_binary(
    binary: &BitMatrix,
    params: &DecodeParams,
    tel: &mut DecodeTelemetry,
) -> Result<DigitString, DecodeError> {
    let extraction = extract_bars_with_stats(binary, params, &mut tel.extraction)?;
    tel.path = Some(extraction.path);

    let half_heights = measure(&extraction.bars, binary.height() / 2);
    tel.half_heights.clone_from(&half_heights);

    let step = calibrate(&half_heights, params.calibration_tolerance)?;
    tel.calibration = Some(step);

    map_digits(&half_heights, step.step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![255u8; width * height]
    }

    #[test]
    fn test_blank_image_telemetry() {
        let (result, tel) = decode_gray(&blank(300, 100), 300, 100, &DecodeParams::default());
        assert_eq!(result, Err(DecodeError::NoBarsDetected));
        assert_eq!(tel.ink_pixels, 0);
        assert_eq!(tel.path, None);
        assert_eq!(tel.extraction.contour_bars, 0);
        assert_eq!(tel.extraction.raw_peaks, Some(0));
        assert!(tel.half_heights.is_empty());
    }

    #[test]
    fn test_short_buffer_is_reported() {
        let (result, tel) = decode_gray(&blank(10, 10), 10, 11, &DecodeParams::default());
        assert_eq!(
            result,
            Err(DecodeError::InvalidBuffer {
                expected: 110,
                actual: 100
            })
        );
        assert_eq!(tel, DecodeTelemetry::default());
    }

    #[test]
    fn test_specks_are_opened_away() {
        let (width, height) = (300, 100);
        let mut gray = blank(width, height);
        for y in (1..height).step_by(4) {
            for x in (1..width).step_by(4) {
                gray[y * width + x] = 0;
            }
        }
        let (result, tel) = decode_gray(&gray, width, height, &DecodeParams::default());
        assert_eq!(tel.ink_pixels, 0);
        assert_eq!(result, Err(DecodeError::NoBarsDetected));
    }
}
