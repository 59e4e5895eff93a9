use crate::history::PairWeights;
use crate::partition::Partition;
use std::hash::Hash;

/// Total repeat-pairing weight of a grouping. 0 means nobody meets a former groupmate.
pub type ConflictScore = u64;

/// Sum of the pair weights inside one group.
pub fn group_score<P: Clone + Eq + Hash + Ord>(
    group: &[P],
    weights: &PairWeights<P>,
) -> ConflictScore {
    let mut score = 0;
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            score += ConflictScore::from(weights.weight(a, b));
        }
    }
    score
}

pub fn total_score<P: Clone + Eq + Hash + Ord>(
    partition: &Partition<P>,
    weights: &PairWeights<P>,
) -> ConflictScore {
    partition
        .groups()
        .iter()
        .map(|group| group_score(group, weights))
        .sum()
}

/// Score of each group, in partition order.
pub fn group_scores<P: Clone + Eq + Hash + Ord>(
    partition: &Partition<P>,
    weights: &PairWeights<P>,
) -> Vec<ConflictScore> {
    partition
        .groups()
        .iter()
        .map(|group| group_score(group, weights))
        .collect()
}
