//! Minutiae extraction from grayscale ridge images.
//!
//! The pipeline is: smooth and binarize (ridges become foreground), thin to a
//! one-pixel skeleton, classify every interior skeleton pixel by its crossing
//! number, estimate a direction for each candidate, drop candidates near the
//! border, and finally deduplicate in raster order.

mod crossing;
mod dedup;
mod orientation;

pub use crossing::{classify, crossing_number};
pub use dedup::dedup_min_separation;
pub use orientation::{estimate as estimate_orientation, Window, WindowOrientation};

use crate::image::{BinaryImage, ImageView};
use crate::minutia::{Minutia, MinutiaKind, MinutiaeSet};
use crate::preprocess::{skeletonize, Smoothing};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{RidgeMatchError, RidgeMatchResult};

/// Configuration for minutiae extraction.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    /// Smoothing applied before thresholding.
    pub smoothing: Smoothing,
    /// Candidates must satisfy `margin < x < width - margin` (same for y).
    pub border_margin: usize,
    /// Minimum Euclidean distance in pixels between kept minutiae (exclusive).
    pub min_separation: f32,
    /// Half-size of the square window used for orientation estimation.
    pub orientation_radius: usize,
    /// A bifurcation window must contain more foreground pixels than this.
    pub bifurcation_min_pixels: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::Auto,
            border_margin: 3,
            min_separation: 4.0,
            orientation_radius: 3,
            bifurcation_min_pixels: 2,
        }
    }
}

impl ExtractConfig {
    /// Checks that the configuration is usable.
    pub fn validate(&self) -> RidgeMatchResult<()> {
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(RidgeMatchError::InvalidConfig {
                reason: "min_separation must be finite and non-negative",
            });
        }
        if self.orientation_radius == 0 {
            return Err(RidgeMatchError::InvalidConfig {
                reason: "orientation_radius must be at least 1",
            });
        }
        Ok(())
    }
}

/// Extracts minutiae with the default configuration.
pub fn extract(image: ImageView<'_, u8>) -> RidgeMatchResult<MinutiaeSet> {
    Extractor::default().extract(image)
}

/// Reusable minutiae extractor.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    cfg: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor, validating the configuration.
    pub fn new(cfg: ExtractConfig) -> RidgeMatchResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }

    /// Extracts the minutiae of one image.
    ///
    /// An image without ridges yields an empty set. The result is a pure
    /// function of the pixel values and the configuration.
    pub fn extract(&self, image: ImageView<'_, u8>) -> RidgeMatchResult<MinutiaeSet> {
        self.extract_with_skeleton(image).map(|(set, _)| set)
    }

    /// Extracts minutiae and also returns the thinned ridge skeleton.
    pub fn extract_with_skeleton(
        &self,
        image: ImageView<'_, u8>,
    ) -> RidgeMatchResult<(MinutiaeSet, BinaryImage)> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RidgeMatchError::InvalidInput {
                reason: "image has zero area",
            });
        }
        let _span = trace_span!("extract", width = image.width(), height = image.height()).entered();

        let skeleton = skeletonize(image, self.cfg.smoothing);
        let candidates = self.candidates(&skeleton);
        let kept = dedup_min_separation(&candidates, self.cfg.min_separation);

        trace_event!(
            "minutiae_extracted",
            skeleton_pixels = skeleton.count(),
            candidates = candidates.len(),
            kept = kept.len()
        );
        Ok((MinutiaeSet::new(kept), skeleton))
    }

    /// Classifies skeleton pixels in raster order, returning border-filtered
    /// candidates with a defined orientation.
    fn candidates(&self, skeleton: &BinaryImage) -> Vec<Minutia> {
        let width = skeleton.width();
        let height = skeleton.height();
        let mut out = Vec::new();
        let mut undirected = 0usize;
        if width < 3 || height < 3 {
            return out;
        }

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                if skeleton.get(x, y) != Some(true) {
                    continue;
                }
                let Some(kind) = classify(crossing_number(skeleton, x, y)) else {
                    continue;
                };
                if !self.inside_margin(x, y, width, height) {
                    continue;
                }
                let Some(est) = estimate_orientation(skeleton, x, y, self.cfg.orientation_radius)
                else {
                    undirected += 1;
                    continue;
                };
                match kind {
                    MinutiaKind::Ending => out.push(Minutia::ending(x, y, est.angle_deg)),
                    MinutiaKind::Bifurcation => {
                        if est.foreground > self.cfg.bifurcation_min_pixels {
                            out.push(Minutia::bifurcation_from_primary(x, y, est.angle_deg));
                        } else {
                            undirected += 1;
                        }
                    }
                }
            }
        }

        trace_debug!("orientation_rejected", count = undirected);
        out
    }

    fn inside_margin(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        let m = self.cfg.border_margin;
        x > m && y > m && x + m < width && y + m < height
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractConfig, Extractor};
    use crate::image::ImageView;
    use crate::util::RidgeMatchError;

    #[test]
    fn rejects_invalid_config() {
        let err = Extractor::new(ExtractConfig {
            min_separation: -1.0,
            ..ExtractConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, RidgeMatchError::InvalidConfig { .. }));
    }

    #[test]
    fn tiny_images_produce_nothing() {
        let data = [0u8, 255, 0, 255];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let set = Extractor::default().extract(view).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn margin_is_exclusive() {
        let ex = Extractor::default();
        assert!(ex.inside_margin(4, 4, 9, 9));
        assert!(ex.inside_margin(5, 5, 9, 9));
        assert!(!ex.inside_margin(3, 4, 9, 9));
        assert!(!ex.inside_margin(6, 4, 9, 9));
    }
}
