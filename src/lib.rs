//! ridgematch extracts fingerprint minutiae and matches minutiae sets.
//!
//! Two components run in sequence: the [`Extractor`] turns a grayscale ridge
//! image into a [`MinutiaeSet`] (ridge endings and bifurcations with position
//! and orientation), and the [`Matcher`] scores two sets in [0, 1] with a
//! rotation- and translation-invariant point-correspondence search. A
//! [`Gallery`] holds enrolled sets for one-to-many identification, optionally
//! scored in parallel via the `rayon` feature.
//!
//! ```
//! use ridgematch::{extract, score, ImageView};
//!
//! let mut pixels = vec![255u8; 9 * 9];
//! for x in 0..=4 {
//!     pixels[4 * 9 + x] = 0;
//! }
//! let image = ImageView::from_slice(&pixels, 9, 9)?;
//! let minutiae = extract(image)?;
//! assert_eq!(minutiae.len(), 1);
//! assert_eq!(score(&minutiae, &minutiae, 15.0, 30.0), 0.0);
//! # Ok::<(), ridgematch::RidgeMatchError>(())
//! ```

pub mod extract;
pub mod gallery;
pub mod image;
pub mod lowlevel;
pub mod matcher;
pub mod minutia;
pub mod preprocess;
mod trace;
pub mod util;

pub use extract::{extract, ExtractConfig, Extractor};
pub use gallery::{
    rank_of, Gallery, Hit, RankTally, SearchOutcome, DEFAULT_SEARCH_THRESHOLD,
};
#[cfg(feature = "image-io")]
pub use image::io;
pub use image::{BinaryImage, ImageView, OwnedImage};
pub use matcher::{score, Comparison, MatchConfig, Matcher, Strategy};
pub use minutia::{Minutia, MinutiaKind, MinutiaeSet, Orientation, MIN_RELIABLE_MINUTIAE};
pub use preprocess::Smoothing;
pub use util::{RidgeMatchError, RidgeMatchResult};
