use crate::assign::{assign, assign_parallel, worker_seeds, Assignment, DEFAULT_ATTEMPTS};
use crate::error::{Error, Result};
use crate::history::PairWeights;
use crate::naming::{check_group_names, default_group_names};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Caller-facing search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Random groupings tried per worker.
    pub attempts: u32,
    /// Fixed seed for reproducible runs; a fresh OS seed is drawn when unset.
    pub seed: Option<u64>,
    /// Independent searches run in parallel, each with its own generator.
    pub workers: usize,
    /// Labels handed out to groups in order, wrapping when they run out.
    pub group_names: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
            workers: 1,
            group_names: default_group_names(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            return Err(Error::InvalidAttempts);
        }
        if self.workers == 0 {
            return Err(Error::InvalidWorkers);
        }
        check_group_names(&self.group_names)?;
        Ok(())
    }

    /// Generator for a single-worker search.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Validates the settings, then runs a sequential or parallel search.
    pub fn search<P>(&self, present: &[P], weights: &PairWeights<P>) -> Result<Assignment<P>>
    where
        P: Clone + Eq + Hash + Ord + Send + Sync,
    {
        self.validate()?;
        let mut rng = self.rng();
        if self.workers == 1 {
            return assign(present, weights, self.attempts, &mut rng);
        }
        let base = self.seed.unwrap_or_else(|| rng.random());
        assign_parallel(
            present,
            weights,
            self.attempts,
            &worker_seeds(base, self.workers),
        )
    }
}
