use crate::error::{Error, Result};
use crate::history::PairWeights;
use crate::partition::Partition;
use crate::scoring::{total_score, ConflictScore};
use crate::subgroups::{plan, GroupSizePlan};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::ops::ControlFlow;

/// Search budget used when the caller does not pick one.
pub const DEFAULT_ATTEMPTS: u32 = 1000;

/// Outcome of a search: the best grouping found and what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment<P> {
    pub partition: Partition<P>,
    pub score: ConflictScore,
    /// Candidates evaluated before the search stopped.
    pub attempts: u32,
}

/// Lazily draws random groupings that follow a size plan.
///
/// Each item reshuffles the ids in place, so every candidate is a uniform
/// permutation regardless of the previous one.
struct Candidates<'a, P: Eq + Hash, R: ?Sized> {
    ids: Vec<P>,
    sizes: &'a GroupSizePlan,
    weights: &'a PairWeights<P>,
    rng: &'a mut R,
    remaining: u32,
}

impl<'a, P, R> Iterator for Candidates<'a, P, R>
where
    P: Clone + Eq + Hash + Ord,
    R: Rng + ?Sized,
{
    type Item = (Partition<P>, ConflictScore);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.ids.shuffle(&mut *self.rng);
        let partition = Partition::from_sizes(self.ids.clone(), self.sizes);
        let score = total_score(&partition, self.weights);
        Some((partition, score))
    }
}

/// Keeps the first lowest-scoring candidate, stopping at the first zero.
///
/// Returns the winner along with how many candidates were consumed.
fn select_best<P, I>(candidates: I) -> (Option<(Partition<P>, ConflictScore)>, u32)
where
    I: Iterator<Item = (Partition<P>, ConflictScore)>,
{
    let mut evaluated = 0u32;
    let flow = candidates.enumerate().try_fold(
        None,
        |best: Option<(Partition<P>, ConflictScore)>, (attempt, candidate)| {
            evaluated += 1;
            let best = match best {
                Some(best) if best.1 <= candidate.1 => best,
                _ => {
                    tracing::trace!(attempt, score = candidate.1, "improved candidate");
                    candidate
                }
            };
            if best.1 == 0 {
                tracing::debug!(attempt, "zero-conflict grouping found, stopping early");
                ControlFlow::Break(best)
            } else {
                ControlFlow::Continue(Some(best))
            }
        },
    );
    let best = match flow {
        ControlFlow::Break(best) => Some(best),
        ControlFlow::Continue(best) => best,
    };
    (best, evaluated)
}

/// Searches up to `attempts` random groupings of `present` and returns the one
/// with the lowest conflict score.
///
/// Ties keep the earliest candidate. The search stops as soon as a grouping
/// with score 0 turns up. All randomness comes from `rng`, so a seeded
/// generator reproduces the same result.
pub fn assign<P, R>(
    present: &[P],
    weights: &PairWeights<P>,
    attempts: u32,
    rng: &mut R,
) -> Result<Assignment<P>>
where
    P: Clone + Eq + Hash + Ord,
    R: Rng + ?Sized,
{
    if attempts == 0 {
        return Err(Error::InvalidAttempts);
    }
    let sizes = plan(present.len()).ok_or(Error::Infeasible {
        count: present.len(),
    })?;
    tracing::debug!(
        present = present.len(),
        small = sizes.small_groups(),
        large = sizes.large_groups(),
        attempts,
        "searching for groups"
    );

    let candidates = Candidates {
        ids: present.to_vec(),
        sizes: &sizes,
        weights,
        rng,
        remaining: attempts,
    };
    let (best, evaluated) = select_best(candidates);
    let (partition, score) = best.ok_or_else(|| Error::InvariantViolation {
        detail: "search produced no candidate".to_string(),
    })?;
    partition.validate(present, &sizes)?;

    tracing::debug!(score, evaluated, "search finished");
    Ok(Assignment {
        partition,
        score,
        attempts: evaluated,
    })
}

/// Combines per-worker results in submission order.
///
/// A later result replaces the current one only with a strictly lower score,
/// so the earliest worker to reach the minimum wins. The merged attempt count
/// is the total across workers.
pub fn merge_assignments<P, I>(results: I) -> Option<Assignment<P>>
where
    I: IntoIterator<Item = Assignment<P>>,
{
    let mut total_attempts = 0u32;
    let best = results.into_iter().fold(None, |best: Option<Assignment<P>>, result| {
        total_attempts = total_attempts.saturating_add(result.attempts);
        match best {
            Some(best) if best.score <= result.score => Some(best),
            _ => Some(result),
        }
    });
    best.map(|best| Assignment {
        attempts: total_attempts,
        ..best
    })
}

/// One seed per worker, derived from `base` the same way on every run.
pub fn worker_seeds(base: u64, workers: usize) -> Vec<u64> {
    (0..workers as u64).map(|i| base.wrapping_add(i)).collect()
}

/// Runs one independent search per seed on the rayon pool and merges them.
///
/// Every worker owns a `StdRng` built from its seed and gets the full
/// `attempts` budget. The shared `weights` are only read.
pub fn assign_parallel<P>(
    present: &[P],
    weights: &PairWeights<P>,
    attempts: u32,
    seeds: &[u64],
) -> Result<Assignment<P>>
where
    P: Clone + Eq + Hash + Ord + Send + Sync,
{
    if seeds.is_empty() {
        return Err(Error::InvalidWorkers);
    }
    if attempts == 0 {
        return Err(Error::InvalidAttempts);
    }

    let results: Vec<Result<Assignment<P>>> = seeds
        .par_iter()
        .map(|&seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            assign(present, weights, attempts, &mut rng)
        })
        .collect();
    let results = results.into_iter().collect::<Result<Vec<_>>>()?;

    merge_assignments(results).ok_or_else(|| Error::InvariantViolation {
        detail: "no worker produced a result".to_string(),
    })
}
