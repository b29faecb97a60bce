//! Foreground masks produced by binarization and thinning.

use crate::image::required_len;
use crate::util::RidgeMatchResult;

/// Owned binary raster; `true` marks ridge (foreground) pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    data: Vec<bool>,
    width: usize,
    height: usize,
}

impl BinaryImage {
    /// Creates an all-background mask.
    pub fn new(width: usize, height: usize) -> RidgeMatchResult<Self> {
        let len = required_len(width, height, width)?;
        Ok(Self {
            data: vec![false; len],
            width,
            height,
        })
    }

    pub(crate) fn from_raw(data: Vec<bool>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns the pixel at signed coordinates; outside the mask is background.
    pub fn get_or_background(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize).unwrap_or(false)
    }

    /// Sets the pixel at `(x, y)`; out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Counts foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&px| px).count()
    }

    /// Returns the row-major mask.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }
}
