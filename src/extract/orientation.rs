//! Local ridge direction from Sobel gradient sums.

use crate::image::{reflect_101, BinaryImage};
use crate::util::math::{atan2_deg, wrap_deg};

/// Pixel window around a candidate, clipped to the skeleton bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
}

impl Window {
    /// Square window of half-size `radius` centered on `(x, y)`.
    pub fn around(skeleton: &BinaryImage, x: usize, y: usize, radius: usize) -> Self {
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius).min(skeleton.width() - 1);
        let y1 = (y + radius).min(skeleton.height() - 1);
        Self {
            x0,
            y0,
            width: x1 + 1 - x0,
            height: y1 + 1 - y0,
        }
    }

    fn sample(&self, skeleton: &BinaryImage, wx: isize, wy: isize) -> i32 {
        let sx = self.x0 + reflect_101(wx, self.width);
        let sy = self.y0 + reflect_101(wy, self.height);
        i32::from(skeleton.get(sx, sy).unwrap_or(false))
    }
}

/// Direction estimate for one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowOrientation {
    /// `atan2(sum_gy, sum_gx)` in degrees, folded into (-180, 180].
    pub angle_deg: f32,
    /// Foreground pixels inside the window.
    pub foreground: usize,
}

/// Estimates the ridge direction at `(x, y)`.
///
/// The window is treated as its own image (mirrored at its edges), Sobel
/// responses are summed over it and the angle of the summed gradient is
/// returned. An all-background window has no direction and yields `None`.
pub fn estimate(
    skeleton: &BinaryImage,
    x: usize,
    y: usize,
    radius: usize,
) -> Option<WindowOrientation> {
    let window = Window::around(skeleton, x, y, radius);

    let mut foreground = 0usize;
    let mut sum_gx = 0i64;
    let mut sum_gy = 0i64;
    for wy in 0..window.height as isize {
        for wx in 0..window.width as isize {
            let at = |dx: isize, dy: isize| window.sample(skeleton, wx + dx, wy + dy);
            foreground += at(0, 0) as usize;
            let gx = (at(1, -1) + 2 * at(1, 0) + at(1, 1)) - (at(-1, -1) + 2 * at(-1, 0) + at(-1, 1));
            let gy = (at(-1, 1) + 2 * at(0, 1) + at(1, 1)) - (at(-1, -1) + 2 * at(0, -1) + at(1, -1));
            sum_gx += i64::from(gx);
            sum_gy += i64::from(gy);
        }
    }

    if foreground == 0 {
        return None;
    }
    Some(WindowOrientation {
        angle_deg: wrap_deg(atan2_deg(sum_gy as f32, sum_gx as f32)),
        foreground,
    })
}

#[cfg(test)]
mod tests {
    use super::{estimate, Window};
    use crate::image::BinaryImage;

    #[test]
    fn window_is_clipped_at_the_border() {
        let mask = BinaryImage::new(10, 8).unwrap();
        let w = Window::around(&mask, 1, 6, 3);
        assert_eq!(w, Window { x0: 0, y0: 3, width: 5, height: 5 });
    }

    #[test]
    fn empty_window_has_no_direction() {
        let mask = BinaryImage::new(12, 12).unwrap();
        assert!(estimate(&mask, 6, 6, 3).is_none());
    }

    #[test]
    fn ridge_ending_points_back_along_the_ridge() {
        let mut mask = BinaryImage::new(9, 9).unwrap();
        for x in 0..=4 {
            mask.set(x, 4, true);
        }
        let est = estimate(&mask, 4, 4, 3).unwrap();
        assert_eq!(est.foreground, 4);
        assert!((est.angle_deg - 180.0).abs() < 1e-4, "angle {}", est.angle_deg);
    }
}
