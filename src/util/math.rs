//! Angle and distance helpers shared by extraction and matching.

/// Folds an angle in degrees into the range (-180, 180].
pub(crate) fn wrap_deg(angle_deg: f32) -> f32 {
    let mut wrapped = angle_deg % 360.0;
    if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Maps an angle in degrees into [0, 360).
pub(crate) fn mod_360(angle_deg: f32) -> f32 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest circular distance between two angles, in [0, 180].
pub(crate) fn angle_dist_deg(a: f32, b: f32) -> f32 {
    let diff = mod_360(a - b);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// `atan2(y, x)` expressed in degrees.
pub(crate) fn atan2_deg(y: f32, x: f32) -> f32 {
    y.atan2(x).to_degrees()
}

/// Euclidean distance between two pixel positions.
pub(crate) fn pixel_dist(ax: usize, ay: usize, bx: usize, by: usize) -> f32 {
    let dx = ax as f32 - bx as f32;
    let dy = ay as f32 - by as f32;
    (dx * dx + dy * dy).sqrt()
}
