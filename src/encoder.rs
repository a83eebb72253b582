//! Symbol rendering
//!
//! Bars sit in 23 equal slots between two 50 px side margins. Each bar is a
//! solid black rectangle centred on the horizontal midline whose half-height
//! is `(digit + 1) * unit_height`.

use crate::error::EncodeError;
use crate::models::{Bar, DIGIT_COUNT, DigitString};
use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use std::io::Cursor;

/// Horizontal margin on each side of the bar area
pub const MARGIN: u32 = 50;
/// Rows reserved above and below the tallest bar
pub const VERTICAL_MARGIN: u32 = 20;
/// Minimum distance of a bar edge from the top/bottom border
pub const BORDER_CLEARANCE: u32 = 10;
/// Height units spanned by the tallest bar (10 above + 10 below the midline)
pub const TOTAL_UNITS: u32 = 20;

/// Narrowest canvas where, at this and every larger width, bars are at least
/// 3 px wide with a 1 px gap and centres sit farther apart than `width / 40`
pub const MIN_WIDTH: u32 = 283;
/// Shortest canvas with a 4 px unit, so a "0" bar (9 rows) clears the 8 px
/// height filter
pub const MIN_HEIGHT: u32 = 2 * VERTICAL_MARGIN + 4 * TOTAL_UNITS;

const BACKGROUND: Luma<u8> = Luma([255]);
const INK: Luma<u8> = Luma([0]);

/// Canvas size for a rendered symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 200,
        }
    }
}

impl EncodeOptions {
    /// Options for a custom canvas size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel height of one encoding unit
    pub fn unit_height(&self) -> u32 {
        (self.height.saturating_sub(2 * VERTICAL_MARGIN) / TOTAL_UNITS).max(1)
    }

    /// Row of the midline
    pub fn midline(&self) -> u32 {
        self.height / 2
    }

    fn validate(&self) -> Result<(), EncodeError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(EncodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Rectangles the encoder draws for `digits`, left to right
pub fn layout(
    digits: &DigitString,
    options: &EncodeOptions,
) -> Result<[Bar; DIGIT_COUNT], EncodeError> {
    options.validate()?;

    let width = options.width as i64;
    let height = options.height as i64;
    let margin = MARGIN as f64;
    let pitch = (options.width - 2 * MARGIN) as f64 / DIGIT_COUNT as f64;
    let bar_width = (pitch * 0.8) as i64;
    let midline = options.midline() as i64;
    let unit = options.unit_height() as i64;

    let mut bars = [Bar::default(); DIGIT_COUNT];
    for (i, &digit) in digits.digits().iter().enumerate() {
        let half_height = (digit as i64 + 1) * unit;
        let center = (margin + i as f64 * pitch + pitch / 2.0) as i64;

        let left = (center - bar_width / 2).max(0);
        let right = (center + bar_width / 2).min(width - 1);
        let top = (midline - half_height).max(BORDER_CLEARANCE as i64);
        let bottom = (midline + half_height).min(height - BORDER_CLEARANCE as i64);

        bars[i] = Bar::from_corners(left as usize, top as usize, right as usize, bottom as usize);
    }

    Ok(bars)
}

/// Render `digits` onto a white canvas
pub fn render(digits: &DigitString, options: &EncodeOptions) -> Result<GrayImage, EncodeError> {
    let bars = layout(digits, options)?;
    let mut image = GrayImage::from_pixel(options.width, options.height, BACKGROUND);

    for bar in &bars {
        for y in bar.y..=bar.bottom() {
            for x in bar.x..=bar.right() {
                image.put_pixel(x as u32, y as u32, INK);
            }
        }
    }

    log::debug!(
        "rendered {} at {}x{} (unit {} px)",
        digits,
        options.width,
        options.height,
        options.unit_height()
    );
    Ok(image)
}

/// Encode a PNG file in memory
pub fn to_png(image: &GrayImage) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image.clone()).write_to(&mut buffer, ImageOutputFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> DigitString {
        "10123456789987654321101".parse().unwrap()
    }

    #[test]
    fn test_default_layout_geometry() {
        let options = EncodeOptions::default();
        assert_eq!(options.unit_height(), 8);
        assert_eq!(options.midline(), 100);

        let bars = layout(&scenario(), &options).unwrap();
        // slot pitch 700/23 ~ 30.43 px, bar width int(24.35) = 24 -> 25 columns inclusive
        assert_eq!(bars[0], Bar::from_corners(53, 84, 77, 116));
        for bar in &bars {
            assert_eq!(bar.width, 25);
        }
        // digit 9 in the middle spans 10 units each side
        assert_eq!(bars[11].y, 20);
        assert_eq!(bars[11].bottom(), 180);
        // digit 0 spans one unit each side
        assert_eq!(bars[1].y, 92);
        assert_eq!(bars[1].bottom(), 108);

        for pair in bars.windows(2) {
            assert!(pair[1].x > pair[0].right() + 1, "bars must not touch");
        }
    }

    #[test]
    fn test_render_draws_only_bars() {
        let options = EncodeOptions::default();
        let image = render(&scenario(), &options).unwrap();
        let bars = layout(&scenario(), &options).unwrap();

        let ink: usize = image.pixels().filter(|p| p.0[0] == 0).count();
        let expected: usize = bars.iter().map(|b| b.width * b.height).sum();
        assert_eq!(ink, expected);
        assert_eq!(image.get_pixel(0, 0).0[0], 255);
        assert_eq!(image.get_pixel(bars[11].x as u32, 100).0[0], 0);
    }

    #[test]
    fn test_unit_height_has_floor_of_one() {
        assert_eq!(EncodeOptions::new(800, 60).unit_height(), 1);
        assert_eq!(EncodeOptions::new(800, 120).unit_height(), 4);
        assert_eq!(EncodeOptions::new(1600, 400).unit_height(), 18);
    }

    #[test]
    fn test_bars_keep_border_clearance() {
        for (w, h) in [(MIN_WIDTH, MIN_HEIGHT), (800, 139), (800, 200)] {
            let options = EncodeOptions::new(w, h);
            let bars = layout(&scenario(), &options).unwrap();
            for bar in &bars {
                assert!(bar.y >= 10, "{w}x{h}");
                assert!(bar.bottom() <= (h - 10) as usize, "{w}x{h}");
            }
        }
    }

    #[test]
    fn test_minimum_canvas_keeps_bars_apart() {
        let options = EncodeOptions::new(MIN_WIDTH, MIN_HEIGHT);
        let bars = layout(&scenario(), &options).unwrap();
        let min_spacing = MIN_WIDTH as usize / 40 + 1;
        for pair in bars.windows(2) {
            assert!(pair[0].width >= 3);
            assert!(pair[1].x >= pair[0].right() + 2, "bars must not touch");
            let left = pair[0].x + pair[0].width / 2;
            let right = pair[1].x + pair[1].width / 2;
            assert!(right - left >= min_spacing);
        }
        // shortest bar: one unit each side of the midline, inclusive
        assert_eq!(bars[1].height, 9);
    }

    #[test]
    fn test_rejects_tiny_canvas() {
        assert_eq!(
            render(&scenario(), &EncodeOptions::new(100, 200)).unwrap_err(),
            EncodeError::InvalidDimensions {
                width: 100,
                height: 200
            }
        );
        assert!(render(&scenario(), &EncodeOptions::new(800, 59)).is_err());
        assert!(render(&scenario(), &EncodeOptions::new(MIN_WIDTH - 1, 200)).is_err());
        assert!(render(&scenario(), &EncodeOptions::new(800, MIN_HEIGHT - 1)).is_err());
        assert!(render(&scenario(), &EncodeOptions::new(MIN_WIDTH, MIN_HEIGHT)).is_ok());
    }

    #[test]
    fn test_png_signature() {
        let image = render(&scenario(), &EncodeOptions::default()).unwrap();
        let png = to_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded, image);
    }
}
