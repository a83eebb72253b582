//! Error types for encoding and decoding
//!
//! Every variant is terminal for the call that produced it and carries the
//! values needed to render a precise message.

/// Errors returned while validating input or rendering a symbol.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// Input does not hold exactly 23 symbols
    #[error("expected 23 digits, got {found}")]
    InvalidLength {
        /// Number of symbols supplied
        found: usize,
    },
    /// A symbol outside `0..=9`
    #[error("invalid character {found:?} at position {position}, all characters must be digits 0-9")]
    InvalidAlphabet {
        /// Zero-based position of the offending symbol
        position: usize,
        /// The offending symbol
        found: char,
    },
    /// Reference positions 0, 22, 11 do not hold 1, 1, 9
    #[error(
        "reference bars must be 1, 1, 9 at positions 0, 22, 11, got {}, {}, {}",
        .found[0], .found[1], .found[2]
    )]
    InvalidReferenceBars {
        /// Digits found at positions 0, 22, 11
        found: [u8; 3],
    },
    /// Canvas too small to lay out 23 bars
    #[error("canvas {width}x{height} is too small, need at least 283x120")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// PNG encoding failed
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl PartialEq for EncodeError {
    fn eq(&self, other: &Self) -> bool {
        use EncodeError::*;
        match (self, other) {
            (InvalidLength { found: a }, InvalidLength { found: b }) => a == b,
            (
                InvalidAlphabet {
                    position: pa,
                    found: fa,
                },
                InvalidAlphabet {
                    position: pb,
                    found: fb,
                },
            ) => pa == pb && fa == fb,
            (InvalidReferenceBars { found: a }, InvalidReferenceBars { found: b }) => a == b,
            (
                InvalidDimensions {
                    width: wa,
                    height: ha,
                },
                InvalidDimensions {
                    width: wb,
                    height: hb,
                },
            ) => wa == wb && ha == hb,
            // image errors carry no comparable payload
            _ => false,
        }
    }
}

/// Errors returned by the decoding pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Raw pixel buffer length does not match the stated dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer {
        /// Bytes required by width, height and channel count
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Column-density fallback found no peaks at all
    #[error("no bars detected")]
    NoBarsDetected,
    /// Extraction could not settle on exactly 23 bars
    #[error("detected {detected} bars instead of 23")]
    BarCountMismatch {
        /// Number of bars (or peaks) the failing stage ended with
        detected: usize,
    },
    /// Calibration step is not strictly positive
    #[error("calibration failed, invalid step {step}")]
    CalibrationFailed {
        /// Computed step in pixels per unit
        step: f64,
    },
    /// The two reference estimates disagree by more than the tolerance
    #[error(
        "calibration failed, reference bars inconsistent (step from 1s = {from_one:.3}, step from 9 = {from_nine:.3}, step = {step:.3})"
    )]
    CalibrationInconsistent {
        /// Step implied by the two outer "1" bars
        from_one: f64,
        /// Step implied by the middle "9" bar
        from_nine: f64,
        /// Mean of both estimates
        step: f64,
    },
    /// Mapped digits do not reproduce the reference values
    #[error(
        "reference bars validation failed, got {}, {}, {}, expected 1, 1, 9",
        .got[0], .got[1], .got[2]
    )]
    ReferenceValidationFailed {
        /// Decoded digits at positions 0, 22, 11
        got: [u8; 3],
    },
}
