//! Polar re-expression of a minutiae set around one reference minutia.

use crate::minutia::{Minutia, MinutiaKind};
use crate::util::math::{atan2_deg, mod_360};

/// A minutia seen from a reference minutia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Distance to the reference in pixels.
    pub radius: f32,
    /// `atan2(dy, dx)` from the reference, in degrees.
    pub bearing_deg: f32,
    /// Primary orientation minus the reference orientation, in [0, 360).
    pub rel_orientation_deg: f32,
    pub kind: MinutiaKind,
}

/// Re-expresses every minutia except `reference` relative to it.
///
/// Input order is preserved. Returns an empty list when `reference` is out of
/// range.
pub fn to_polar(minutiae: &[Minutia], reference: usize) -> Vec<PolarPoint> {
    let Some(origin) = minutiae.get(reference) else {
        return Vec::new();
    };
    let ref_x = origin.x() as f32;
    let ref_y = origin.y() as f32;
    let ref_theta = origin.primary_angle();

    minutiae
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != reference)
        .map(|(_, m)| {
            let dx = m.x() as f32 - ref_x;
            let dy = m.y() as f32 - ref_y;
            PolarPoint {
                radius: (dx * dx + dy * dy).sqrt(),
                bearing_deg: atan2_deg(dy, dx),
                rel_orientation_deg: mod_360(m.primary_angle() - ref_theta),
                kind: m.kind(),
            }
        })
        .collect()
}
