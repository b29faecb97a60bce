//! Fixed-radius smoothing.

use crate::image::{reflect_101, ImageView, OwnedImage};

const TAPS: [u32; 3] = [1, 2, 1];

/// Smooths with a separable 3x3 Gaussian (`[1 2 1] / 4` per axis).
///
/// Borders are mirrored without repeating the edge sample; the result is
/// rounded to the nearest integer.
pub fn gaussian_blur_3x3(image: ImageView<'_, u8>) -> OwnedImage {
    let width = image.width();
    let height = image.height();

    let mut horizontal = vec![0u32; width * height];
    for (y, row) in image.rows().enumerate() {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, tap) in TAPS.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - 1, width);
                acc += tap * u32::from(row[sx]);
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, tap) in TAPS.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - 1, height);
                acc += tap * horizontal[sy * width + x];
            }
            out.push(((acc + 8) / 16) as u8);
        }
    }

    OwnedImage::from_raw(out, width, height)
}

#[cfg(test)]
mod tests {
    use super::gaussian_blur_3x3;
    use crate::image::ImageView;

    #[test]
    fn flat_image_is_unchanged() {
        let data = vec![77u8; 20];
        let view = ImageView::from_slice(&data, 5, 4).unwrap();
        let out = gaussian_blur_3x3(view);
        assert!(out.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn impulse_spreads_with_binomial_weights() {
        let mut data = vec![0u8; 25];
        data[12] = 160;
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        let out = gaussian_blur_3x3(view);
        assert_eq!(out.data()[12], 40);
        assert_eq!(out.data()[11], 20);
        assert_eq!(out.data()[6], 10);
        assert_eq!(out.data()[0], 0);
    }
}
