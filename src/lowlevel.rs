//! Building blocks behind `extract` and `Matcher`.
//!
//! Exposed for inspection and custom pipelines (for example, rendering the
//! skeleton or scoring precomputed polar point lists). Most users only need
//! the top-level `extract`, `score`, `Matcher` and `Gallery`.

pub use crate::extract::{
    classify, crossing_number, dedup_min_separation, estimate_orientation, Window,
    WindowOrientation,
};
pub use crate::gallery::TopK;
pub use crate::matcher::{
    centroid, count_greedy, count_optimal, rank_by_centroid, to_polar, PolarPoint, Tolerance,
};
pub use crate::preprocess::{
    binarize_inverted, gaussian_blur_3x3, histogram, is_bilevel, otsu_threshold, ridge_mask,
    skeletonize, thin,
};
