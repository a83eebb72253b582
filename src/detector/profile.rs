//! Column-density profile and 1-D peak finding
//!
//! The fallback path treats the binary raster as a horizontal signal: the
//! number of ink pixels per column, smoothed with a Gaussian, has one local
//! maximum per bar when the bars are cleanly separated.

use crate::models::BitMatrix;
use rayon::prelude::*;

/// Ink pixels per column, left to right
pub fn column_density(matrix: &BitMatrix) -> Vec<f64> {
    (0..matrix.width())
        .into_par_iter()
        .map(|x| matrix.column_count(x) as f64)
        .collect()
}

/// Gaussian smoothing with kernel radius `floor(4 * sigma + 0.5)`.
///
/// Samples past either end are mirrored about the edge (`d c b a | a b c d`).
/// A non-positive sigma returns the input unchanged.
pub fn gaussian_smooth(signal: &[f64], sigma: f64) -> Vec<f64> {
    if signal.is_empty() || sigma <= 0.0 {
        return signal.to_vec();
    }

    let radius = (4.0 * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-0.5 * (i * i) as f64 / (sigma * sigma)).exp())
        .collect();
    let norm: f64 = weights.iter().sum();
    let weights: Vec<f64> = weights.into_iter().map(|w| w / norm).collect();

    let n = signal.len() as isize;
    (0..n)
        .map(|i| {
            weights
                .iter()
                .enumerate()
                .map(|(k, w)| w * signal[reflect(i + k as isize - radius, n)])
                .sum()
        })
        .collect()
}

/// Symmetric reflection of index `i` into `0..n`
fn reflect(i: isize, n: isize) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    if m < n {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Local maxima of `signal`, at least `distance` samples apart.
///
/// A flat top counts as one peak at its middle sample (rounded down) when
/// both sides are lower. The first and last samples are never peaks. When
/// two peaks are closer than `distance`, the higher one wins; among equal
/// heights the right-most is kept. Result is sorted ascending.
pub fn find_peaks(signal: &[f64], distance: usize) -> Vec<usize> {
    let peaks = local_maxima(signal);
    select_by_distance(&peaks, signal, distance.max(1))
}

fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if signal.len() < 3 {
        return peaks;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

fn select_by_distance(peaks: &[usize], signal: &[f64], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    let mut keep = vec![true; peaks.len()];
    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    by_height.sort_by(|&a, &b| signal[peaks[a]].total_cmp(&signal[peaks[b]]));

    for &j in by_height.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, kept)| kept.then_some(p))
        .collect()
}
