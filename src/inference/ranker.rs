//! Top-k selection over class probabilities.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A class selected by the ranker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedClass {
    /// Index into the model's class list.
    pub class_index: usize,
    pub probability: f64,
}

/// Picks the `k` most probable classes.
///
/// Ordering is by descending probability; bit-equal probabilities are ordered
/// by ascending class index. The tie-break is part of the comparator, so the
/// result does not depend on sort stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    k: usize,
}

impl Ranker {
    pub fn new(k: usize) -> Self {
        Ranker { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Return `min(k, probs.len())` classes, best first.
    pub fn top_k(&self, probs: &[f64]) -> Vec<RankedClass> {
        let mut ranked: Vec<RankedClass> = probs
            .iter()
            .enumerate()
            .map(|(class_index, &probability)| RankedClass {
                class_index,
                probability,
            })
            .collect();

        ranked.sort_unstable_by(Self::compare);
        ranked.truncate(self.k);
        ranked
    }

    fn compare(a: &RankedClass, b: &RankedClass) -> Ordering {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| a.class_index.cmp(&b.class_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(ranked: &[RankedClass]) -> Vec<usize> {
        ranked.iter().map(|r| r.class_index).collect()
    }

    #[test]
    fn test_descending_order() {
        let ranked = Ranker::new(3).top_k(&[0.1, 0.5, 0.15, 0.25]);
        assert_eq!(indices(&ranked), vec![1, 3, 2]);
        assert_eq!(ranked[0].probability, 0.5);
    }

    #[test]
    fn test_length_is_min_of_k_and_classes() {
        assert_eq!(Ranker::new(3).top_k(&[0.7, 0.3]).len(), 2);
        assert_eq!(Ranker::new(1).top_k(&[0.2, 0.3, 0.5]).len(), 1);
        assert!(Ranker::new(3).top_k(&[]).is_empty());
    }

    #[test]
    fn test_ties_broken_by_lower_index() {
        let ranked = Ranker::new(4).top_k(&[0.2, 0.3, 0.2, 0.3]);
        assert_eq!(indices(&ranked), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_uniform_distribution_keeps_class_order() {
        let probs = vec![0.125; 8];
        let ranked = Ranker::new(3).top_k(&probs);
        assert_eq!(indices(&ranked), vec![0, 1, 2]);
    }

    #[test]
    fn test_tie_break_on_many_equal_values() {
        // Enough equal keys to reach the pattern-defeating path of the sort.
        let mut probs = vec![0.001; 200];
        probs[150] = 0.5;
        let ranked = Ranker::new(5).top_k(&probs);
        assert_eq!(indices(&ranked), vec![150, 0, 1, 2, 3]);
    }
}
