use crate::error::DecodeError;
use crate::models::{DIGIT_COUNT, REFERENCE_POSITIONS};

/// Pixel height of one digit unit, derived from the reference bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationStep {
    /// Mean of both estimates, used for mapping
    pub step: f64,
    /// Estimate from the two outer bars, which encode 1 (half-height 2 units)
    pub from_one: f64,
    /// Estimate from the middle bar, which encodes 9 (half-height 10 units)
    pub from_nine: f64,
}

/// Derive the unit step from the three reference half-heights.
///
/// Fails with [`DecodeError::CalibrationFailed`] when the step is not a
/// positive finite number, and with [`DecodeError::CalibrationInconsistent`]
/// when the two estimates differ by more than `tolerance * step`. A
/// difference of exactly `tolerance * step` passes.
pub fn calibrate(half_heights: &[f64], tolerance: f64) -> Result<CalibrationStep, DecodeError> {
    if half_heights.len() != DIGIT_COUNT {
        return Err(DecodeError::BarCountMismatch {
            detected: half_heights.len(),
        });
    }

    let [first, last, middle] = REFERENCE_POSITIONS.map(|pos| half_heights[pos]);
    let from_one = (first + last) / 2.0 / 2.0;
    let from_nine = middle / 10.0;
    let step = (from_one + from_nine) / 2.0;

    if !step.is_finite() || step <= 0.0 {
        return Err(DecodeError::CalibrationFailed { step });
    }
    if (from_one - from_nine).abs() > tolerance * step {
        return Err(DecodeError::CalibrationInconsistent {
            from_one,
            from_nine,
            step,
        });
    }

    log::trace!("calibrated step {step:.3} (from 1s {from_one:.3}, from 9 {from_nine:.3})");
    Ok(CalibrationStep {
        step,
        from_one,
        from_nine,
    })
}
