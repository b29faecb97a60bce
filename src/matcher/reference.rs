//! Reference-point selection by distance to the set centroid.

use crate::minutia::Minutia;

/// Mean position of a non-empty set.
pub fn centroid(minutiae: &[Minutia]) -> Option<(f32, f32)> {
    if minutiae.is_empty() {
        return None;
    }
    let n = minutiae.len() as f64;
    let (sx, sy) = minutiae.iter().fold((0.0f64, 0.0f64), |(sx, sy), m| {
        (sx + m.x() as f64, sy + m.y() as f64)
    });
    Some(((sx / n) as f32, (sy / n) as f32))
}

/// Indices ordered by ascending distance to the centroid.
///
/// The sort is stable, so equidistant minutiae keep their input order.
pub fn rank_by_centroid(minutiae: &[Minutia]) -> Vec<usize> {
    let Some((cx, cy)) = centroid(minutiae) else {
        return Vec::new();
    };
    let dist: Vec<f32> = minutiae
        .iter()
        .map(|m| {
            let dx = m.x() as f32 - cx;
            let dy = m.y() as f32 - cy;
            (dx * dx + dy * dy).sqrt()
        })
        .collect();
    let mut order: Vec<usize> = (0..minutiae.len()).collect();
    order.sort_by(|&a, &b| dist[a].total_cmp(&dist[b]));
    order
}

#[cfg(test)]
mod tests {
    use super::{centroid, rank_by_centroid};
    use crate::minutia::Minutia;

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert!(centroid(&[]).is_none());
        assert!(rank_by_centroid(&[]).is_empty());
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let set = [
            Minutia::ending(0, 10, 0.0),
            Minutia::ending(20, 10, 0.0),
            Minutia::ending(10, 10, 0.0),
            Minutia::ending(10, 0, 0.0),
            Minutia::ending(10, 20, 0.0),
        ];
        assert_eq!(centroid(&set), Some((10.0, 10.0)));
        assert_eq!(rank_by_centroid(&set), vec![2, 0, 1, 3, 4]);
    }
}
