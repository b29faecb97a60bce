//! Point-correspondence counting between two polar point lists.

use crate::matcher::polar::PolarPoint;
use crate::util::math::angle_dist_deg;

/// Tolerances for treating two polar points as the same minutia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Maximum radius difference in pixels.
    pub distance: f32,
    /// Maximum bearing and relative-orientation difference in degrees.
    pub angle: f32,
}

impl Tolerance {
    /// True when `a` and `b` agree in radius, bearing, relative orientation
    /// and kind. Angles are compared along the shorter arc.
    pub fn accepts(&self, a: &PolarPoint, b: &PolarPoint) -> bool {
        a.kind == b.kind
            && (a.radius - b.radius).abs() <= self.distance
            && angle_dist_deg(a.bearing_deg, b.bearing_deg) <= self.angle
            && angle_dist_deg(a.rel_orientation_deg, b.rel_orientation_deg) <= self.angle
    }
}

/// Pairs each query point with the first unused compatible template point.
///
/// Query points are visited in order and each template point is consumed at
/// most once. Fast, but not guaranteed to find the largest pairing.
pub fn count_greedy(query: &[PolarPoint], template: &[PolarPoint], tol: Tolerance) -> usize {
    let mut used = vec![false; template.len()];
    let mut matched = 0usize;
    for q in query {
        let hit = template
            .iter()
            .enumerate()
            .find(|&(idx, t)| !used[idx] && tol.accepts(q, t));
        if let Some((idx, _)) = hit {
            used[idx] = true;
            matched += 1;
        }
    }
    matched
}

/// Size of a maximum one-to-one pairing under the same compatibility rule.
///
/// Uses augmenting paths (Kuhn's algorithm), O(|q| * edges). Visiting order is
/// fixed, so the result is deterministic.
pub fn count_optimal(query: &[PolarPoint], template: &[PolarPoint], tol: Tolerance) -> usize {
    let edges: Vec<Vec<usize>> = query
        .iter()
        .map(|q| {
            template
                .iter()
                .enumerate()
                .filter(|(_, t)| tol.accepts(q, t))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let mut owner: Vec<Option<usize>> = vec![None; template.len()];
    let mut matched = 0usize;
    let mut visited = vec![false; template.len()];
    for q in 0..query.len() {
        visited.iter_mut().for_each(|v| *v = false);
        if augment(q, &edges, &mut owner, &mut visited) {
            matched += 1;
        }
    }
    matched
}

fn augment(
    q: usize,
    edges: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &t in &edges[q] {
        if visited[t] {
            continue;
        }
        visited[t] = true;
        let free = match owner[t] {
            None => true,
            Some(other) => augment(other, edges, owner, visited),
        };
        if free {
            owner[t] = Some(q);
            return true;
        }
    }
    false
}
