use crate::partition::Partition;
use std::collections::HashMap;
use std::hash::Hash;

/// How many past sessions each pair of participants has shared a group.
///
/// Pairs are stored with the smaller id first, so `weight(a, b)` and
/// `weight(b, a)` always agree. Pairs never grouped together weigh 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairWeights<P: Eq + Hash> {
    counts: HashMap<(P, P), u32>,
}

impl<P: Clone + Eq + Hash + Ord> Default for PairWeights<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_key<P: Clone + Ord>(a: &P, b: &P) -> (P, P) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl<P: Clone + Eq + Hash + Ord> PairWeights<P> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Counts co-occurrences over every group of every past partition.
    pub fn build<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a Partition<P>>,
        P: 'a,
    {
        let mut weights = Self::new();
        let mut sessions = 0usize;
        for partition in history {
            for group in partition.groups() {
                weights.record_group(group);
            }
            sessions += 1;
        }
        tracing::debug!(sessions, pairs = weights.len(), "built pairing history");
        weights
    }

    /// Adds one co-occurrence for every unordered pair in `group`.
    pub fn record_group(&mut self, group: &[P]) {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a == b {
                    continue;
                }
                *self.counts.entry(pair_key(a, b)).or_insert(0) += 1;
            }
        }
    }

    /// Sets the weight of a single pair. Mostly useful for building fixtures.
    pub fn set(&mut self, a: &P, b: &P, count: u32) {
        if a == b {
            return;
        }
        let key = pair_key(a, b);
        if count == 0 {
            self.counts.remove(&key);
        } else {
            self.counts.insert(key, count);
        }
    }

    pub fn weight(&self, a: &P, b: &P) -> u32 {
        if a == b {
            return 0;
        }
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Number of pairs with a non-zero weight.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every pair with a non-zero weight, smaller id first, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &P, u32)> {
        self.counts.iter().map(|((a, b), &count)| (a, b, count))
    }

    /// Dense symmetric matrix over `ids`, in the order given. The diagonal is 0.
    pub fn matrix(&self, ids: &[P]) -> Vec<Vec<u32>> {
        ids.iter()
            .map(|a| ids.iter().map(|b| self.weight(a, b)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<Partition<u32>> {
        vec![
            Partition::new(vec![vec![1, 2, 3], vec![4, 5, 6]]),
            Partition::new(vec![vec![1, 2, 4], vec![3, 5, 6]]),
            Partition::new(vec![vec![7]]),
        ]
    }

    #[test]
    fn counts_pairs_in_both_directions() {
        let weights = PairWeights::build(&history());
        assert_eq!(weights.weight(&1, &2), 2);
        assert_eq!(weights.weight(&2, &1), 2);
        assert_eq!(weights.weight(&5, &6), 2);
        assert_eq!(weights.weight(&1, &3), 1);
        assert_eq!(weights.weight(&1, &5), 0);
        assert_eq!(weights.weight(&7, &7), 0);
    }

    #[test]
    fn singletons_add_no_pairs() {
        let weights = PairWeights::build(&[Partition::new(vec![vec![1], vec![2]])]);
        assert!(weights.is_empty());
    }

    #[test]
    fn rebuilding_gives_the_same_weights() {
        let sessions = history();
        assert_eq!(PairWeights::build(&sessions), PairWeights::build(&sessions));
    }

    #[test]
    fn matrix_is_symmetric() {
        let weights = PairWeights::build(&history());
        let ids = [1, 2, 3, 4];
        let matrix = weights.matrix(&ids);
        for i in 0..ids.len() {
            assert_eq!(matrix[i][i], 0);
            for j in 0..ids.len() {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        assert_eq!(matrix[0][1], 2);
    }

    #[test]
    fn set_overrides_and_clears() {
        let mut weights = PairWeights::new();
        weights.set(&"b", &"a", 3);
        assert_eq!(weights.weight(&"a", &"b"), 3);
        weights.set(&"a", &"b", 0);
        assert!(weights.is_empty());
    }
}
