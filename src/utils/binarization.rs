use crate::decoder::config::DecodeParams;
use crate::error::DecodeError;
use crate::models::BitMatrix;
use crate::utils::check_buffer;
use crate::utils::morphology::open_3x3;

/// Global threshold binarization with inverted polarity
/// Returns a BitMatrix where true = ink (gray <= threshold), false = paper
///
/// # Errors
/// `InvalidBuffer` if `gray.len() != width * height`.
pub fn threshold_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<BitMatrix, DecodeError> {
    check_buffer(gray, width, height, 1)?;
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let is_ink = gray[idx] <= threshold;
            binary.set(x, y, is_ink);
        }
    }

    Ok(binary)
}

/// Binarize a grayscale image the way the decoder expects
///
/// Black-on-white input becomes bar foreground; one 3x3 opening then strips
/// specks smaller than the structuring element.
pub fn binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &DecodeParams,
) -> Result<BitMatrix, DecodeError> {
    let binary = threshold_binarize(gray, width, height, params.threshold)?;
    if params.morph_open {
        Ok(open_3x3(&binary))
    } else {
        Ok(binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 127, 128]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 127).unwrap();

        // Pixels <= 127 are ink (true)
        assert!(binary.get(0, 0)); // 100
        assert!(!binary.get(1, 0)); // 150
        assert!(binary.get(0, 1)); // 127
        assert!(!binary.get(1, 1)); // 128
    }

    #[test]
    fn test_binarize_drops_isolated_pixel() {
        let width = 12;
        let height = 12;
        let mut gray = vec![255u8; width * height];
        // 5x5 black block plus one lone black pixel
        for y in 2..7 {
            for x in 2..7 {
                gray[y * width + x] = 0;
            }
        }
        gray[10 * width + 10] = 0;

        let binary = binarize(&gray, width, height, &DecodeParams::default()).unwrap();
        assert_eq!(binary.count_ones(), 25);
        assert!(binary.get(2, 2));
        assert!(binary.get(6, 6));
        assert!(!binary.get(10, 10));

        let raw = binarize(
            &gray,
            width,
            height,
            &DecodeParams {
                morph_open: false,
                ..DecodeParams::default()
            },
        )
        .unwrap();
        assert_eq!(raw.count_ones(), 26);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let err = threshold_binarize(&[0u8; 5], 3, 2, 127).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBuffer {
                expected: 6,
                actual: 5
            }
        );
        assert!(binarize(&[0u8; 7], 3, 2, &DecodeParams::default()).is_err());
        assert_eq!(threshold_binarize(&[], 0, 0, 127).unwrap().count_ones(), 0);
    }
}
