//! Enrolled templates and one-to-many identification.
//!
//! A gallery search scores the query against every template independently and
//! merges the scores into a ranked list. The scan is linear in the gallery
//! size; with the `rayon` feature and `MatchConfig::parallel` set, templates
//! are scored on the rayon pool and merged with the same deterministic sort,
//! so both paths return identical rankings.

mod eval;
mod topk;

pub use eval::RankTally;
pub use topk::{Hit, TopK};

use crate::matcher::Matcher;
use crate::minutia::MinutiaeSet;
use crate::trace::{trace_event, trace_span};
use topk::sort_hits_desc;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Confidence threshold used by gallery search when the caller has no
/// calibrated value.
pub const DEFAULT_SEARCH_THRESHOLD: f32 = 0.3;

/// Enrolled minutiae sets keyed by identity, in enrollment order.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    entries: Vec<(String, MinutiaeSet)>,
}

impl Gallery {
    /// Creates an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrolls a template, replacing (in place) any template with the same id.
    ///
    /// Returns the previous template for that id.
    pub fn enroll(&mut self, id: impl Into<String>, template: MinutiaeSet) -> Option<MinutiaeSet> {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, template)),
            None => {
                self.entries.push((id, template));
                None
            }
        }
    }

    /// Removes a template, returning it if it was enrolled.
    pub fn remove(&mut self, id: &str) -> Option<MinutiaeSet> {
        let pos = self.entries.iter().position(|(existing, _)| existing == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Returns the template enrolled under `id`.
    pub fn get(&self, id: &str) -> Option<&MinutiaeSet> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, set)| set)
    }

    /// Number of enrolled templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is enrolled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, template)` in enrollment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MinutiaeSet)> + '_ {
        self.entries.iter().map(|(id, set)| (id.as_str(), set))
    }
}

impl FromIterator<(String, MinutiaeSet)> for Gallery {
    fn from_iter<I: IntoIterator<Item = (String, MinutiaeSet)>>(iter: I) -> Self {
        let mut gallery = Gallery::new();
        for (id, set) in iter {
            gallery.enroll(id, set);
        }
        gallery
    }
}

/// Result of a thresholded gallery search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Best hit at or above the threshold.
    pub best: Option<Hit>,
    /// Highest score seen, whether or not it passed the threshold.
    pub max_score: f32,
}

impl SearchOutcome {
    /// Applies the search threshold to an already ranked hit list (best first).
    ///
    /// The best hit must score at least `threshold` and above zero.
    pub fn from_ranked(ranked: &[Hit], threshold: f32) -> Self {
        let max_score = ranked.first().map_or(0.0, |hit| hit.score);
        let best = ranked
            .first()
            .filter(|hit| hit.score >= threshold && hit.score > 0.0)
            .cloned();
        SearchOutcome { best, max_score }
    }
}

impl Matcher {
    /// Scores the query against every template, best first.
    ///
    /// Equal scores keep enrollment order. An empty query scores zero against
    /// every template.
    pub fn identify(&self, query: &MinutiaeSet, gallery: &Gallery) -> Vec<Hit> {
        let _span = trace_span!(
            "identify",
            gallery = gallery.len(),
            parallel = self.config().parallel
        )
        .entered();
        let mut hits = self.score_all(query, gallery);
        sort_hits_desc(&mut hits);
        if let Some(top) = hits.first() {
            trace_event!("identify_best", index = top.index, score = top.score);
        }
        hits
    }

    /// Like [`Matcher::identify`] but keeps only the best `k` hits.
    pub fn identify_topk(&self, query: &MinutiaeSet, gallery: &Gallery, k: usize) -> Vec<Hit> {
        let mut topk = TopK::new(k);
        for hit in self.score_all(query, gallery) {
            topk.push(hit);
        }
        topk.into_sorted_desc()
    }

    /// Returns the best hit scoring at least `threshold`, plus the highest
    /// score observed.
    pub fn search(&self, query: &MinutiaeSet, gallery: &Gallery, threshold: f32) -> SearchOutcome {
        SearchOutcome::from_ranked(&self.identify(query, gallery), threshold)
    }

    fn score_all(&self, query: &MinutiaeSet, gallery: &Gallery) -> Vec<Hit> {
        let score_one = |(index, (id, template)): (usize, &(String, MinutiaeSet))| {
            let cmp = self.compare(query, template);
            Hit {
                id: id.clone(),
                index,
                score: cmp.score,
                matched: cmp.matched,
            }
        };

        #[cfg(feature = "rayon")]
        if self.config().parallel {
            return gallery
                .entries
                .par_iter()
                .enumerate()
                .map(score_one)
                .collect();
        }

        gallery.entries.iter().enumerate().map(score_one).collect()
    }
}

/// 1-based position of `id` in a ranked hit list.
pub fn rank_of(hits: &[Hit], id: &str) -> Option<usize> {
    hits.iter().position(|hit| hit.id == id).map(|pos| pos + 1)
}

#[cfg(test)]
mod tests {
    use super::{rank_of, Gallery};
    use crate::matcher::Matcher;
    use crate::minutia::{Minutia, MinutiaeSet};

    fn line(n: usize, step: usize) -> MinutiaeSet {
        (0..n)
            .map(|i| Minutia::ending(20 + i * step, 40 + (i * i) % 7, (i * 25) as f32))
            .collect()
    }

    #[test]
    fn enroll_replaces_in_place() {
        let mut gallery = Gallery::new();
        assert!(gallery.enroll("a", line(3, 10)).is_none());
        assert!(gallery.enroll("b", line(4, 10)).is_none());
        let previous = gallery.enroll("a", line(5, 10)).unwrap();
        assert_eq!(previous.len(), 3);
        let ids: Vec<&str> = gallery.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(gallery.get("a").unwrap().len(), 5);
        assert_eq!(gallery.remove("b").unwrap().len(), 4);
        assert!(gallery.remove("b").is_none());
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn empty_query_finds_nothing() {
        let gallery: Gallery = vec![("a".to_string(), line(6, 12))].into_iter().collect();
        let matcher = Matcher::default();
        let outcome = matcher.search(&MinutiaeSet::empty(), &gallery, 0.0);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.max_score, 0.0);
        let hits = matcher.identify(&MinutiaeSet::empty(), &gallery);
        assert_eq!(hits.len(), 1);
        assert_eq!(rank_of(&hits, "a"), Some(1));
        assert_eq!(rank_of(&hits, "zzz"), None);
    }
}
