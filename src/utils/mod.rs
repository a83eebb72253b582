//! Utility functions for image processing
//!
//! This module provides the pixel-level steps in front of bar extraction:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (fixed inverted threshold)
//! - Morphology (3x3 opening for speck removal)

pub mod binarization;
pub mod grayscale;
pub mod morphology;

use crate::error::DecodeError;

/// Check that `buf` holds exactly `width * height * channels` bytes
pub(crate) fn check_buffer(
    buf: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<(), DecodeError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .unwrap_or(usize::MAX);
    if buf.len() != expected {
        return Err(DecodeError::InvalidBuffer {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}
