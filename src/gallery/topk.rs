//! Ranked hit ordering and bounded top-k collection.

use std::cmp::Ordering;

/// One scored gallery entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Enrolled identity.
    pub id: String,
    /// Position of the template in enrollment order.
    pub index: usize,
    /// Similarity in [0, 1].
    pub score: f32,
    /// Point pairs behind the score.
    pub matched: usize,
}

fn hit_cmp_desc(a: &Hit, b: &Hit) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Sorts hits by descending score; equal scores keep enrollment order.
pub(crate) fn sort_hits_desc(hits: &mut [Hit]) {
    hits.sort_by(hit_cmp_desc);
}

/// Keeps the best `k` hits with O(k) insertion.
pub struct TopK {
    k: usize,
    items: Vec<Hit>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a hit, evicting the current worst if at capacity.
    pub fn push(&mut self, hit: Hit) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(hit);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if hit_cmp_desc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }
        if hit_cmp_desc(&hit, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = hit;
        }
    }

    /// Returns the retained hits, best first.
    pub fn into_sorted_desc(mut self) -> Vec<Hit> {
        sort_hits_desc(&mut self.items);
        self.items
    }
}
