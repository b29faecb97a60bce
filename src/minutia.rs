//! Minutiae: ridge endings and bifurcations.

use crate::util::math::wrap_deg;
use crate::util::{RidgeMatchError, RidgeMatchResult};

/// Sets with fewer minutiae than this are considered unreliable by callers.
pub const MIN_RELIABLE_MINUTIAE: usize = 5;

/// Topological class of a minutia.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinutiaKind {
    /// A ridge that stops.
    Ending,
    /// A ridge that splits into two.
    Bifurcation,
}

/// Ridge direction(s) in degrees, folded into (-180, 180].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    /// Direction of a ridge ending.
    Single(f32),
    /// Directions of the three branches meeting at a bifurcation.
    Triple([f32; 3]),
}

impl Orientation {
    /// The angle used for matching: the single angle, or the first branch.
    pub fn primary(&self) -> f32 {
        match *self {
            Orientation::Single(angle) => angle,
            Orientation::Triple([first, _, _]) => first,
        }
    }

    /// The kind implied by the orientation arity.
    pub fn kind(&self) -> MinutiaKind {
        match self {
            Orientation::Single(_) => MinutiaKind::Ending,
            Orientation::Triple(_) => MinutiaKind::Bifurcation,
        }
    }

    /// All stored angles.
    pub fn angles(&self) -> &[f32] {
        match self {
            Orientation::Single(angle) => std::slice::from_ref(angle),
            Orientation::Triple(angles) => angles,
        }
    }
}

/// A single feature point at integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minutia {
    x: usize,
    y: usize,
    orientation: Orientation,
}

impl Minutia {
    /// Creates a ridge ending.
    pub fn ending(x: usize, y: usize, angle_deg: f32) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Single(wrap_deg(angle_deg)),
        }
    }

    /// Creates a bifurcation from its three branch directions.
    pub fn bifurcation(x: usize, y: usize, angles_deg: [f32; 3]) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Triple(angles_deg.map(wrap_deg)),
        }
    }

    /// Creates a bifurcation from one estimated direction, spreading the
    /// branches 120 degrees apart.
    pub fn bifurcation_from_primary(x: usize, y: usize, angle_deg: f32) -> Self {
        Self::bifurcation(x, y, [angle_deg, angle_deg + 120.0, angle_deg - 120.0])
    }

    /// Creates a minutia from loosely typed data, as read back from a store.
    ///
    /// Fails with `InvalidInput` when the angle count does not match the kind
    /// (one for endings, three for bifurcations) or an angle is not finite.
    pub fn new(x: usize, y: usize, kind: MinutiaKind, angles_deg: &[f32]) -> RidgeMatchResult<Self> {
        if angles_deg.iter().any(|angle| !angle.is_finite()) {
            return Err(RidgeMatchError::InvalidInput {
                reason: "minutia angle is not finite",
            });
        }
        match (kind, angles_deg) {
            (MinutiaKind::Ending, &[angle]) => Ok(Self::ending(x, y, angle)),
            (MinutiaKind::Bifurcation, &[a, b, c]) => Ok(Self::bifurcation(x, y, [a, b, c])),
            (MinutiaKind::Ending, _) => Err(RidgeMatchError::InvalidInput {
                reason: "ending requires exactly one angle",
            }),
            (MinutiaKind::Bifurcation, _) => Err(RidgeMatchError::InvalidInput {
                reason: "bifurcation requires exactly three angles",
            }),
        }
    }

    /// Column of the minutia.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row of the minutia.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Ending or bifurcation, as implied by the orientation.
    pub fn kind(&self) -> MinutiaKind {
        self.orientation.kind()
    }

    /// Ridge direction(s) in degrees.
    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Shorthand for `orientation().primary()`.
    pub fn primary_angle(&self) -> f32 {
        self.orientation.primary()
    }
}

/// Ordered minutiae extracted from one image.
///
/// Order carries no meaning but is kept stable so that matching breaks ties
/// the same way on every run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinutiaeSet {
    minutiae: Vec<Minutia>,
}

impl MinutiaeSet {
    /// Wraps minutiae in the given order.
    pub fn new(minutiae: Vec<Minutia>) -> Self {
        Self { minutiae }
    }

    /// Creates a set with no minutiae.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of minutiae.
    pub fn len(&self) -> usize {
        self.minutiae.len()
    }

    /// Returns true when the set holds no minutiae.
    pub fn is_empty(&self) -> bool {
        self.minutiae.is_empty()
    }

    /// Returns the minutia at `index`.
    pub fn get(&self, index: usize) -> Option<&Minutia> {
        self.minutiae.get(index)
    }

    /// Iterates in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Minutia> {
        self.minutiae.iter()
    }

    /// Returns the minutiae as a slice.
    pub fn as_slice(&self) -> &[Minutia] {
        &self.minutiae
    }

    /// Consumes the set, returning the minutiae.
    pub fn into_vec(self) -> Vec<Minutia> {
        self.minutiae
    }

    /// True when the set holds at least [`MIN_RELIABLE_MINUTIAE`] points.
    pub fn is_reliable(&self) -> bool {
        self.len() >= MIN_RELIABLE_MINUTIAE
    }
}

impl FromIterator<Minutia> for MinutiaeSet {
    fn from_iter<I: IntoIterator<Item = Minutia>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MinutiaeSet {
    type Item = &'a Minutia;
    type IntoIter = std::slice::Iter<'a, Minutia>;

    fn into_iter(self) -> Self::IntoIter {
        self.minutiae.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Minutia, MinutiaKind, MinutiaeSet, Orientation};
    use crate::util::RidgeMatchError;

    #[test]
    fn bifurcation_branches_are_folded() {
        let m = Minutia::bifurcation_from_primary(10, 12, 100.0);
        match m.orientation() {
            Orientation::Triple([a, b, c]) => {
                assert!((a - 100.0).abs() < 1e-4);
                assert!((b + 140.0).abs() < 1e-4);
                assert!((c + 20.0).abs() < 1e-4);
            }
            Orientation::Single(_) => panic!("expected three branches"),
        }
        assert_eq!(m.kind(), MinutiaKind::Bifurcation);
        assert!((m.primary_angle() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn checked_constructor_enforces_arity() {
        let err = Minutia::new(1, 1, MinutiaKind::Ending, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            RidgeMatchError::InvalidInput {
                reason: "ending requires exactly one angle",
            }
        );
        assert!(Minutia::new(1, 1, MinutiaKind::Bifurcation, &[1.0]).is_err());
        assert!(Minutia::new(1, 1, MinutiaKind::Ending, &[f32::NAN]).is_err());

        let m = Minutia::new(3, 4, MinutiaKind::Ending, &[270.0]).unwrap();
        assert_eq!(m.orientation(), &Orientation::Single(-90.0));
        assert_eq!(m.orientation().angles().len(), 1);
    }

    #[test]
    fn reliability_threshold() {
        let four: MinutiaeSet = (0..4).map(|i| Minutia::ending(i * 10, 0, 0.0)).collect();
        assert!(!four.is_reliable());
        let five: MinutiaeSet = (0..5).map(|i| Minutia::ending(i * 10, 0, 0.0)).collect();
        assert!(five.is_reliable());
        assert!(MinutiaeSet::empty().is_empty());
    }
}
