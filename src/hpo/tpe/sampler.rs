//! TPE sampler core implementation

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::hpo::error::{HpoError, Result};
use crate::hpo::types::{Assignment, SearchSpace, Trial, TrialStatus};

use super::sampling::sample_domain_tpe;

/// Tree-structured Parzen Estimator sampler.
///
/// Proposes purely random assignments for the first `n_startup` completed
/// trials, then splits the history into good/bad quantiles and samples
/// each parameter by the l(x)/g(x) density ratio. The good/bad split is
/// computed once per proposal and shared by every parameter drawn, so the
/// joint proposal reflects correlations between hyperparameters instead of
/// treating each independently.
///
/// The RNG is owned and seeded: for a fixed seed, space, and trial
/// history, proposals are reproducible.
#[derive(Debug, Clone)]
pub struct TpeSampler {
    /// Search space
    space: SearchSpace,
    /// Quantile for splitting good/bad (default: 0.25)
    gamma: f64,
    /// Number of startup trials (random sampling)
    n_startup: usize,
    /// KDE bandwidth
    kde_bandwidth: f64,
    /// Seeded RNG
    rng: StdRng,
}

impl TpeSampler {
    /// Create a new sampler over `space`, seeded with `seed`
    pub fn new(space: SearchSpace, seed: u64) -> Self {
        Self {
            space,
            gamma: 0.25,
            n_startup: 10,
            kde_bandwidth: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set gamma (quantile for splitting)
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma.clamp(0.01, 0.99);
        self
    }

    /// Set number of startup trials
    pub fn with_startup(mut self, n: usize) -> Self {
        self.n_startup = n.max(1);
        self
    }

    /// The search space this sampler draws from
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Propose the next assignment to evaluate.
    pub fn suggest(&mut self, trials: &[Trial]) -> Result<Assignment> {
        if self.space.is_empty() {
            return Err(HpoError::EmptySpace);
        }
        let n_completed = trials
            .iter()
            .filter(|t| t.status == TrialStatus::Completed)
            .count();
        if n_completed < self.n_startup {
            Ok(self.space.sample_random(&mut self.rng))
        } else {
            Ok(self.tpe_sample(trials))
        }
    }

    /// Complete a partial assignment: keep the given values (validated
    /// against their domains), sample the rest randomly. Used for enqueued
    /// default assignments, which fix some parameters and leave the others
    /// to the space.
    pub fn complete(&mut self, partial: Assignment) -> Result<Assignment> {
        if self.space.is_empty() {
            return Err(HpoError::EmptySpace);
        }
        for (name, value) in &partial {
            let domain = self
                .space
                .get(name)
                .ok_or_else(|| HpoError::UnknownHyperparameter(name.clone()))?;
            if !domain.contains(value) {
                return Err(HpoError::InvalidValue(name.clone(), format!("{value:?}")));
            }
        }
        let mut assignment = partial;
        let Self { space, rng, .. } = self;
        for (name, domain) in space.iter() {
            if !assignment.contains_key(name) {
                assignment.insert(name.clone(), domain.sample(rng));
            }
        }
        Ok(assignment)
    }

    /// TPE-guided sampling (internal)
    fn tpe_sample(&mut self, trials: &[Trial]) -> Assignment {
        let completed: Vec<&Trial> = trials
            .iter()
            .filter(|t| t.status == TrialStatus::Completed)
            .collect();

        if completed.is_empty() {
            return self.space.sample_random(&mut self.rng);
        }

        // Split trials into good (l) and bad (g) by the gamma quantile.
        let n_good = ((completed.len() as f64) * self.gamma).ceil() as usize;
        let n_good = n_good.max(1).min(completed.len().saturating_sub(1).max(1));

        let mut sorted = completed;
        sorted.sort_by(|a, b| {
            a.loss
                .partial_cmp(&b.loss)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let (good_trials, bad_trials) = sorted.split_at(n_good.min(sorted.len()));

        // One split shared by every parameter drawn.
        let mut assignment = Assignment::new();
        let Self {
            space,
            rng,
            kde_bandwidth,
            ..
        } = self;
        for (name, domain) in space.iter() {
            let value =
                sample_domain_tpe(name, domain, good_trials, bad_trials, *kde_bandwidth, rng);
            assignment.insert(name.clone(), value);
        }
        assignment
    }
}
