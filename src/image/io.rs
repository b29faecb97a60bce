//! Loading fingerprint images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{RidgeMatchError, RidgeMatchResult};
use std::path::Path;

/// Borrows a grayscale image buffer as a view.
pub fn view_from_gray_image(img: &image::GrayImage) -> RidgeMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts any decoded image to an owned 8-bit grayscale raster.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> RidgeMatchResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Loads an image from disk (BMP, PNG, JPEG) as grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> RidgeMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| RidgeMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
