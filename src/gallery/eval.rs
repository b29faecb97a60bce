//! Rank-k identification accuracy over a batch of probes.

use crate::gallery::topk::Hit;
use crate::gallery::rank_of;

/// Running tally of identification results for a probe set.
///
/// Each kept probe contributes its ranked hit list; the probe counts as
/// correct at rank `k` when its true identity appears among the first `k`
/// hits. Scores against the true identity are collected as genuine, all
/// others as impostor.
#[derive(Clone, Debug)]
pub struct RankTally {
    ranks: Vec<usize>,
    correct: Vec<usize>,
    total: usize,
    skipped: usize,
    genuine: ScoreMean,
    impostor: ScoreMean,
}

#[derive(Clone, Copy, Debug, Default)]
struct ScoreMean {
    sum: f64,
    count: usize,
}

impl ScoreMean {
    fn push(&mut self, score: f32) {
        self.sum += f64::from(score);
        self.count += 1;
    }

    fn mean(&self) -> Option<f32> {
        (self.count > 0).then(|| (self.sum / self.count as f64) as f32)
    }
}

impl RankTally {
    /// Creates a tally reporting accuracy at each of `ranks`.
    pub fn new(ranks: &[usize]) -> Self {
        Self {
            ranks: ranks.to_vec(),
            correct: vec![0; ranks.len()],
            total: 0,
            skipped: 0,
            genuine: ScoreMean::default(),
            impostor: ScoreMean::default(),
        }
    }

    /// Records one probe with its ranked hits (best first).
    ///
    /// A probe whose identity is not enrolled still counts toward the total.
    pub fn record(&mut self, hits: &[Hit], true_id: &str) {
        self.total += 1;
        if let Some(rank) = rank_of(hits, true_id) {
            for (k, correct) in self.ranks.iter().zip(self.correct.iter_mut()) {
                if rank <= *k {
                    *correct += 1;
                }
            }
        }
        for hit in hits {
            if hit.id == true_id {
                self.genuine.push(hit.score);
            } else {
                self.impostor.push(hit.score);
            }
        }
    }

    /// Records a probe that was left out (unreadable or unreliable).
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Probes recorded with [`RankTally::record`].
    pub fn total(&self) -> usize {
        self.total
    }

    /// Probes recorded with [`RankTally::skip`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// `(k, fraction correct)` for every requested rank; `0.0` when no probe
    /// was recorded.
    pub fn accuracy(&self) -> Vec<(usize, f32)> {
        self.ranks
            .iter()
            .zip(&self.correct)
            .map(|(&k, &correct)| {
                let acc = if self.total == 0 {
                    0.0
                } else {
                    correct as f32 / self.total as f32
                };
                (k, acc)
            })
            .collect()
    }

    /// Mean score against the true identity, if any was seen.
    pub fn mean_genuine(&self) -> Option<f32> {
        self.genuine.mean()
    }

    /// Mean score against every other identity, if any was seen.
    pub fn mean_impostor(&self) -> Option<f32> {
        self.impostor.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::RankTally;
    use crate::gallery::Hit;

    fn ranked(ids: &[(&str, f32)]) -> Vec<Hit> {
        ids.iter()
            .enumerate()
            .map(|(index, &(id, score))| Hit {
                id: id.to_string(),
                index,
                score,
                matched: 0,
            })
            .collect()
    }

    #[test]
    fn counts_hits_within_each_rank() {
        let mut tally = RankTally::new(&[1, 2, 3]);
        tally.record(&ranked(&[("a", 0.9), ("b", 0.2), ("c", 0.1)]), "a");
        tally.record(&ranked(&[("a", 0.5), ("b", 0.4), ("c", 0.1)]), "b");
        tally.record(&ranked(&[("a", 0.5), ("b", 0.4), ("c", 0.3)]), "c");
        tally.record(&ranked(&[("a", 0.5), ("b", 0.4), ("c", 0.3)]), "zzz");
        tally.skip();

        assert_eq!(tally.total(), 4);
        assert_eq!(tally.skipped(), 1);
        assert_eq!(tally.accuracy(), vec![(1, 0.25), (2, 0.5), (3, 0.75)]);
    }

    #[test]
    fn genuine_and_impostor_means() {
        let mut tally = RankTally::new(&[1]);
        tally.record(&ranked(&[("a", 0.75), ("b", 0.25)]), "a");
        tally.record(&ranked(&[("a", 0.25), ("b", 0.25)]), "b");
        assert_eq!(tally.mean_genuine(), Some(0.5));
        assert_eq!(tally.mean_impostor(), Some(0.25));
    }

    #[test]
    fn empty_tally_reports_zero_accuracy() {
        let tally = RankTally::new(&[1, 5]);
        assert_eq!(tally.accuracy(), vec![(1, 0.0), (5, 0.0)]);
        assert_eq!(tally.mean_genuine(), None);
        assert_eq!(tally.mean_impostor(), None);
    }
}
