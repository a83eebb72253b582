//! rust_hbar - encoder and self-calibrating decoder for a 23-bar height-modulated bar code
//!
//! A symbol is a row of 23 black bars on white. Each bar encodes one digit
//! by its height about the horizontal midline. Bars 0 and 22 always carry 1
//! and bar 11 always carries 9, so the decoder can recover the pixel size of
//! one height unit from the symbol itself and read images at any scale.
//!
//! ```no_run
//! let image = rust_hbar::encode("10123456789987654321101").unwrap();
//! let digits = rust_hbar::decode(&image).unwrap();
//! assert_eq!(digits.to_string(), "10123456789987654321101");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Height measurement, calibration and digit mapping
pub mod decoder;
/// Bar extraction (contours, crop retry, column-density peaks)
pub mod detector;
/// Symbol layout and rendering
pub mod encoder;
/// Error types for encoding and decoding
pub mod error;
/// Core data structures (DigitString, Bar, BitMatrix)
pub mod models;
/// Utility functions (grayscale, binarization, morphology)
pub mod utils;

mod pipeline;

pub use decoder::{CalibrationStep, DecodeParams};
pub use detector::{BarExtraction, ExtractionPath, ExtractionStats};
pub use encoder::EncodeOptions;
pub use error::{DecodeError, EncodeError};
pub use models::{Bar, BitMatrix, DIGIT_COUNT, DigitString, REFERENCE_POSITIONS, REFERENCE_VALUES};
pub use pipeline::DecodeTelemetry;

use image::{DynamicImage, GrayImage};
use utils::check_buffer;
use utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};

/// Render a 23-digit string at the default 800x200 size
///
/// # Errors
/// `InvalidLength`, `InvalidAlphabet` or `InvalidReferenceBars`, checked in
/// that order.
pub fn encode(digits: &str) -> Result<GrayImage, EncodeError> {
    let digits: DigitString = digits.parse()?;
    encoder::render(&digits, &EncodeOptions::default())
}

/// Render validated digits onto a canvas of the given size
pub fn encode_with(digits: &DigitString, options: &EncodeOptions) -> Result<GrayImage, EncodeError> {
    encoder::render(digits, options)
}

/// Render a 23-digit string at the default size and return PNG bytes
pub fn encode_png(digits: &str) -> Result<Vec<u8>, EncodeError> {
    let image = encode(digits)?;
    encoder::to_png(&image)
}

/// Decode a grayscale image with the default parameters
pub fn decode(image: &GrayImage) -> Result<DigitString, DecodeError> {
    Decoder::new().decode(image)
}

/// Decode a raw grayscale buffer (1 byte per pixel, row-major)
pub fn decode_from_grayscale(
    gray: &[u8],
    width: usize,
    height: usize,
) -> Result<DigitString, DecodeError> {
    Decoder::new().decode_from_grayscale(gray, width, height)
}

/// Decode a raw RGB buffer (3 bytes per pixel, row-major)
pub fn decode_rgb(rgb: &[u8], width: usize, height: usize) -> Result<DigitString, DecodeError> {
    Decoder::new().decode_rgb(rgb, width, height)
}

/// Decode a raw RGBA buffer (4 bytes per pixel, row-major), ignoring alpha
pub fn decode_rgba(rgba: &[u8], width: usize, height: usize) -> Result<DigitString, DecodeError> {
    Decoder::new().decode_rgba(rgba, width, height)
}

/// Decode any image the `image` crate can represent
pub fn decode_dynamic(image: &DynamicImage) -> Result<DigitString, DecodeError> {
    Decoder::new().decode_dynamic(image)
}

/// Reusable decoder carrying its tuning parameters
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    params: DecodeParams,
}

impl Decoder {
    /// Decoder with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with explicit parameters
    pub fn with_params(params: DecodeParams) -> Self {
        Self { params }
    }

    /// Decoder with parameters read from `HBAR_*` environment variables
    pub fn from_env() -> Self {
        Self::with_params(DecodeParams::from_env())
    }

    /// Parameters in use
    pub fn params(&self) -> &DecodeParams {
        &self.params
    }

    /// Decode a grayscale image
    pub fn decode(&self, image: &GrayImage) -> Result<DigitString, DecodeError> {
        self.decode_with_telemetry(image).0
    }

    /// Decode a grayscale image and report what each stage saw
    pub fn decode_with_telemetry(
        &self,
        image: &GrayImage,
    ) -> (Result<DigitString, DecodeError>, DecodeTelemetry) {
        pipeline::decode_gray(
            image.as_raw(),
            image.width() as usize,
            image.height() as usize,
            &self.params,
        )
    }

    /// Decode a raw grayscale buffer
    ///
    /// # Errors
    /// `InvalidBuffer` if `gray.len() != width * height`.
    pub fn decode_from_grayscale(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DigitString, DecodeError> {
        check_buffer(gray, width, height, 1)?;
        pipeline::decode_gray(gray, width, height, &self.params).0
    }

    /// Decode a raw RGB buffer
    ///
    /// # Errors
    /// `InvalidBuffer` if `rgb.len() != width * height * 3`.
    pub fn decode_rgb(
        &self,
        rgb: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DigitString, DecodeError> {
        check_buffer(rgb, width, height, 3)?;
        let gray = rgb_to_grayscale(rgb, width, height);
        pipeline::decode_gray(&gray, width, height, &self.params).0
    }

    /// Decode a raw RGBA buffer, ignoring alpha
    ///
    /// # Errors
    /// `InvalidBuffer` if `rgba.len() != width * height * 4`.
    pub fn decode_rgba(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DigitString, DecodeError> {
        check_buffer(rgba, width, height, 4)?;
        let gray = rgba_to_grayscale(rgba, width, height);
        pipeline::decode_gray(&gray, width, height, &self.params).0
    }

    /// Decode any image, converting colour input with the same luma weights
    /// as [`Decoder::decode_rgb`]
    pub fn decode_dynamic(&self, image: &DynamicImage) -> Result<DigitString, DecodeError> {
        match image {
            DynamicImage::ImageLuma8(gray) => self.decode(gray),
            DynamicImage::ImageRgb8(rgb) => {
                self.decode_rgb(rgb.as_raw(), rgb.width() as usize, rgb.height() as usize)
            }
            other => {
                let rgba = other.to_rgba8();
                self.decode_rgba(rgba.as_raw(), rgba.width() as usize, rgba.height() as usize)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "10123456789987654321101";

    #[test]
    fn test_scenario_round_trip() {
        let image = encode(SCENARIO).unwrap();
        assert_eq!(image.dimensions(), (800, 200));
        assert_eq!(decode(&image).unwrap().to_string(), SCENARIO);
    }

    #[test]
    fn test_telemetry_on_clean_symbol() {
        let image = encode(SCENARIO).unwrap();
        let (result, tel) = Decoder::new().decode_with_telemetry(&image);
        assert!(result.is_ok());
        assert_eq!(tel.path, Some(ExtractionPath::Contour));
        assert_eq!(tel.extraction.contour_bars, 23);
        assert_eq!(tel.half_heights[11], 80.0);
        assert_eq!(tel.calibration.map(|c| c.step), Some(8.0));
    }

    #[test]
    fn test_raw_buffers() {
        let image = encode(SCENARIO).unwrap();
        let (w, h) = (800, 200);
        let decoded = decode_from_grayscale(image.as_raw(), w, h).unwrap();
        assert_eq!(decoded.to_string(), SCENARIO);

        let rgb: Vec<u8> = image.as_raw().iter().flat_map(|&v| [v, v, v]).collect();
        assert_eq!(decode_rgb(&rgb, w, h).unwrap().to_string(), SCENARIO);

        let rgba = DynamicImage::ImageLuma8(image.clone()).to_rgba8();
        assert_eq!(decode_rgba(rgba.as_raw(), w, h).unwrap().to_string(), SCENARIO);
        let decoded = decode_dynamic(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(decoded.to_string(), SCENARIO);
    }

    #[test]
    fn test_buffer_length_is_checked() {
        let err = decode_from_grayscale(&[255; 10], 4, 4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBuffer {
                expected: 16,
                actual: 10
            }
        );

        let err = decode_rgb(&[0; 11], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBuffer {
                expected: 12,
                actual: 11
            }
        );

        let err = decode_rgba(&[0; 15], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBuffer {
                expected: 16,
                actual: 15
            }
        );
    }
}
