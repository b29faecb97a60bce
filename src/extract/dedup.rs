//! Spatial deduplication of minutia candidates.

use crate::minutia::Minutia;
use crate::util::math::pixel_dist;

/// Keeps candidates farther than `min_separation` (Euclidean, in pixels) from
/// every previously kept candidate.
///
/// Candidates are visited in the given order, so raster-ordered input gives a
/// deterministic result.
pub fn dedup_min_separation(candidates: &[Minutia], min_separation: f32) -> Vec<Minutia> {
    let mut kept: Vec<Minutia> = Vec::with_capacity(candidates.len());
    'outer: for candidate in candidates.iter().copied() {
        for prior in kept.iter() {
            let dist = pixel_dist(candidate.x(), candidate.y(), prior.x(), prior.y());
            if dist <= min_separation {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }
    kept
}
