//! Rotation- and translation-invariant minutiae matching.
//!
//! Both sets are ranked by distance to their own centroid and the closest few
//! minutiae become candidate reference points. For every pair of references the
//! two sets are re-expressed in polar form around their reference, and the
//! geometrically consistent point pairs are counted. The best count `m` over all
//! reference pairs gives the score `min(1, m^2 / (|query| * |template|))`.

mod correspond;
mod polar;
mod reference;

pub use correspond::{count_greedy, count_optimal, Tolerance};
pub use polar::{to_polar, PolarPoint};
pub use reference::{centroid, rank_by_centroid};

use crate::minutia::MinutiaeSet;
use crate::util::{RidgeMatchError, RidgeMatchResult};

/// How point pairs are formed for one reference pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// First compatible unused template point wins (fast, order dependent).
    #[default]
    Greedy,
    /// Maximum bipartite matching (slower, never fewer pairs than greedy).
    Optimal,
}

/// Matching parameters.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Maximum radius difference in pixels for a point pair.
    pub distance_tolerance: f32,
    /// Maximum bearing / relative orientation difference in degrees.
    pub angle_tolerance: f32,
    /// Reference candidates taken from each set (closest to centroid first).
    pub reference_points: usize,
    /// Pairing strategy.
    pub strategy: Strategy,
    /// Score gallery templates in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl MatchConfig {
    /// Tolerances for one-to-one verification (15 px, 30 degrees).
    pub fn verification() -> Self {
        Self {
            distance_tolerance: 15.0,
            angle_tolerance: 30.0,
            reference_points: 3,
            strategy: Strategy::Greedy,
            parallel: false,
        }
    }

    /// Tighter radius tolerance for one-to-many gallery search (10 px, 30 degrees).
    pub fn gallery() -> Self {
        Self {
            distance_tolerance: 10.0,
            ..Self::verification()
        }
    }

    /// Checks that tolerances are finite and non-negative.
    pub fn validate(&self) -> RidgeMatchResult<()> {
        if !self.distance_tolerance.is_finite() || self.distance_tolerance < 0.0 {
            return Err(RidgeMatchError::InvalidConfig {
                reason: "distance_tolerance must be finite and non-negative",
            });
        }
        if !self.angle_tolerance.is_finite() || self.angle_tolerance < 0.0 {
            return Err(RidgeMatchError::InvalidConfig {
                reason: "angle_tolerance must be finite and non-negative",
            });
        }
        if self.reference_points == 0 {
            return Err(RidgeMatchError::InvalidConfig {
                reason: "reference_points must be at least 1",
            });
        }
        Ok(())
    }

    pub(crate) fn tolerance(&self) -> Tolerance {
        Tolerance {
            distance: self.distance_tolerance,
            angle: self.angle_tolerance,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::verification()
    }
}

/// Outcome of comparing two sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    /// Similarity in [0, 1].
    pub score: f32,
    /// Point pairs found for the best reference pair.
    pub matched: usize,
    /// Index into the query set of the winning reference, if any pairs exist.
    pub query_reference: Option<usize>,
    /// Index into the template set of the winning reference.
    pub template_reference: Option<usize>,
}

impl Comparison {
    const NONE: Comparison = Comparison {
        score: 0.0,
        matched: 0,
        query_reference: None,
        template_reference: None,
    };
}

/// Scores two sets with the greedy strategy and three reference points.
///
/// Returns `0.0` if either set is empty.
pub fn score(
    query: &MinutiaeSet,
    template: &MinutiaeSet,
    distance_tolerance: f32,
    angle_tolerance: f32,
) -> f32 {
    let cfg = MatchConfig {
        distance_tolerance,
        angle_tolerance,
        ..MatchConfig::verification()
    };
    compare_with(query, template, &cfg).score
}

/// Stateless matcher bound to a configuration.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher, validating the configuration.
    pub fn new(cfg: MatchConfig) -> RidgeMatchResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Similarity in [0, 1]; `0.0` if either set is empty.
    pub fn score(&self, query: &MinutiaeSet, template: &MinutiaeSet) -> f32 {
        self.compare(query, template).score
    }

    /// Full comparison including the winning reference pair.
    pub fn compare(&self, query: &MinutiaeSet, template: &MinutiaeSet) -> Comparison {
        compare_with(query, template, &self.cfg)
    }
}

fn compare_with(query: &MinutiaeSet, template: &MinutiaeSet, cfg: &MatchConfig) -> Comparison {
    if query.is_empty() || template.is_empty() {
        return Comparison::NONE;
    }
    let q = query.as_slice();
    let t = template.as_slice();
    let tol = cfg.tolerance();

    let q_refs: Vec<usize> = rank_by_centroid(q)
        .into_iter()
        .take(cfg.reference_points)
        .collect();
    let t_refs: Vec<usize> = rank_by_centroid(t)
        .into_iter()
        .take(cfg.reference_points)
        .collect();
    let t_polars: Vec<Vec<PolarPoint>> = t_refs.iter().map(|&r| to_polar(t, r)).collect();

    let mut best = Comparison::NONE;
    for &q_ref in &q_refs {
        let q_polar = to_polar(q, q_ref);
        for (&t_ref, t_polar) in t_refs.iter().zip(&t_polars) {
            let matched = match cfg.strategy {
                Strategy::Greedy => count_greedy(&q_polar, t_polar, tol),
                Strategy::Optimal => count_optimal(&q_polar, t_polar, tol),
            };
            if matched > best.matched {
                best.matched = matched;
                best.query_reference = Some(q_ref);
                best.template_reference = Some(t_ref);
            }
        }
    }

    let m = best.matched as f64;
    let denom = q.len() as f64 * t.len() as f64;
    best.score = ((m * m) / denom).min(1.0) as f32;
    best
}
