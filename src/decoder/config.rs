/// Tunable constants of the decoding pipeline.
///
/// The defaults are the values the symbology was tuned with; decoding a
/// symbol rendered by [`crate::encoder`] relies on them. Changing them is a
/// behavioural change, not a fix.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeParams {
    /// Gray level at or below which a pixel counts as ink
    pub threshold: u8,
    /// Run one 3x3 opening after thresholding
    pub morph_open: bool,
    /// Absolute lower bound on a bar's pixel height
    pub min_bar_height_px: usize,
    /// Lower bound on a bar's height as a fraction of the image height
    pub min_bar_height_ratio: f64,
    /// Padding around the detected content box for the crop retry
    pub crop_padding: usize,
    /// Gaussian sigma for smoothing the column-density profile
    pub smoothing_sigma: f64,
    /// Minimum peak separation is `max(1, width / peak_distance_divisor)`
    pub peak_distance_divisor: usize,
    /// Largest allowed disagreement of the two step estimates, relative to the step
    pub calibration_tolerance: f64,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            threshold: 127,
            morph_open: true,
            min_bar_height_px: 8,
            min_bar_height_ratio: 0.05,
            crop_padding: 6,
            smoothing_sigma: 2.0,
            peak_distance_divisor: 40,
            calibration_tolerance: 0.3,
        }
    }
}

impl DecodeParams {
    /// Defaults overridden by `HBAR_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default. Recognised names:
    /// `HBAR_THRESHOLD`, `HBAR_MORPH_OPEN` (0/1), `HBAR_MIN_BAR_HEIGHT_PX`,
    /// `HBAR_MIN_BAR_HEIGHT_RATIO`, `HBAR_CROP_PADDING`, `HBAR_SMOOTHING_SIGMA`,
    /// `HBAR_PEAK_DISTANCE_DIVISOR`, `HBAR_CALIBRATION_TOLERANCE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        Self {
            threshold: parse_or(&lookup, "HBAR_THRESHOLD", d.threshold),
            morph_open: parse_or::<u8>(&lookup, "HBAR_MORPH_OPEN", d.morph_open as u8) != 0,
            min_bar_height_px: parse_or(&lookup, "HBAR_MIN_BAR_HEIGHT_PX", d.min_bar_height_px),
            min_bar_height_ratio: parse_or(
                &lookup,
                "HBAR_MIN_BAR_HEIGHT_RATIO",
                d.min_bar_height_ratio,
            )
            .clamp(0.0, 1.0),
            crop_padding: parse_or(&lookup, "HBAR_CROP_PADDING", d.crop_padding),
            smoothing_sigma: parse_or(&lookup, "HBAR_SMOOTHING_SIGMA", d.smoothing_sigma)
                .max(0.0),
            peak_distance_divisor: parse_or(
                &lookup,
                "HBAR_PEAK_DISTANCE_DIVISOR",
                d.peak_distance_divisor,
            )
            .max(1),
            calibration_tolerance: parse_or(
                &lookup,
                "HBAR_CALIBRATION_TOLERANCE",
                d.calibration_tolerance,
            )
            .max(0.0),
        }
    }

    /// Minimum pixel height for a component of an image `image_height` rows tall
    pub fn min_bar_height(&self, image_height: usize) -> usize {
        let relative = (image_height as f64 * self.min_bar_height_ratio) as usize;
        self.min_bar_height_px.max(relative)
    }

    /// Minimum horizontal distance between column-density peaks
    pub fn peak_distance(&self, image_width: usize) -> usize {
        (image_width / self.peak_distance_divisor.max(1)).max(1)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    lookup(name)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
