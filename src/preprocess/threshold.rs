//! Automatic global thresholding.

use crate::image::{BinaryImage, ImageView};

/// Builds a 256-bin intensity histogram.
pub fn histogram(image: ImageView<'_, u8>) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for row in image.rows() {
        for &value in row {
            hist[value as usize] += 1;
        }
    }
    hist
}

/// Returns true when the image holds at most two distinct intensities.
pub fn is_bilevel(image: ImageView<'_, u8>) -> bool {
    histogram(image).iter().filter(|&&count| count > 0).count() <= 2
}

/// Picks the threshold that maximizes between-class variance (Otsu).
///
/// Pixels `<= t` form the lower class. Returns `None` for a single-intensity
/// image, which has no split. On ties the lowest threshold wins.
pub fn otsu_threshold(image: ImageView<'_, u8>) -> Option<u8> {
    let hist = histogram(image);
    let total: u64 = hist.iter().sum();
    let weighted_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut best: Option<u8> = None;
    let mut best_var = 0.0f64;
    let mut w0 = 0u64;
    let mut sum0 = 0.0f64;
    for (t, &count) in hist.iter().enumerate() {
        w0 += count;
        sum0 += t as f64 * count as f64;
        let w1 = total - w0;
        if w0 == 0 || w1 == 0 {
            continue;
        }
        let m0 = sum0 / w0 as f64;
        let m1 = (weighted_total - sum0) / w1 as f64;
        let between = w0 as f64 * w1 as f64 * (m0 - m1) * (m0 - m1);
        if between > best_var {
            best_var = between;
            best = Some(t as u8);
        }
    }
    best
}

/// Marks pixels at or below `threshold` as foreground, so dark ridges on a
/// light background become the mask.
pub fn binarize_inverted(image: ImageView<'_, u8>, threshold: u8) -> BinaryImage {
    let width = image.width();
    let height = image.height();
    let mut data = Vec::with_capacity(width * height);
    for row in image.rows() {
        data.extend(row.iter().map(|&value| value <= threshold));
    }
    BinaryImage::from_raw(data, width, height)
}
