use crate::error::DecodeError;
use crate::models::digits::reference_digits_of;
use crate::models::{DIGIT_COUNT, DigitString, REFERENCE_VALUES};

/// Map half-heights to digits and check the reference bars.
///
/// Each digit is `round(half_height / step - 1)` with ties going to the even
/// neighbour, clamped to `0..=9`. The reference positions must read back as
/// `1, 1, 9`; mismatches are reported, never corrected.
pub fn map_digits(half_heights: &[f64], step: f64) -> Result<DigitString, DecodeError> {
    if half_heights.len() != DIGIT_COUNT {
        return Err(DecodeError::BarCountMismatch {
            detected: half_heights.len(),
        });
    }

    let mut digits = [0u8; DIGIT_COUNT];
    for (digit, &hh) in digits.iter_mut().zip(half_heights) {
        *digit = to_digit(hh, step);
    }

    let got = reference_digits_of(&digits);
    if got != REFERENCE_VALUES {
        return Err(DecodeError::ReferenceValidationFailed { got });
    }
    DigitString::try_from(digits).map_err(|_| DecodeError::ReferenceValidationFailed { got })
}

fn to_digit(half_height: f64, step: f64) -> u8 {
    let value = (half_height / step - 1.0).round_ties_even();
    // NaN falls through both comparisons and lands on 0
    if value >= 9.0 {
        9
    } else if value > 0.0 {
        value as u8
    } else {
        0
    }
}
