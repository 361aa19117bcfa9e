//! Tuning configuration
//!
//! Two concerns live here: loading the YAML parameter file (search-space
//! descriptors plus optional default assignments) and the `TuneConfig`
//! struct carrying the run knobs. Seeds and budgets are explicit
//! configuration threaded through signatures, never global state.

mod error;
mod schema;

pub use error::{ConfigError, Result};
pub use schema::{load_params, ParamLiteral, SamplingSpec, TuneParams};

use serde::{Deserialize, Serialize};

/// What the study does when the objective fails for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialErrorPolicy {
    /// Mark the trial as failed (infinite loss) and continue the study.
    RecordFailure,
    /// Propagate the error and end the study.
    Abort,
}

/// Run configuration for one tuning study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneConfig {
    /// Seed for the sampler RNG.
    pub seed: u64,
    /// Total trial budget, enqueued defaults included.
    pub n_trials: usize,
    /// Purely-random startup trials before TPE modeling begins.
    pub n_startup: usize,
    /// Trial-failure policy.
    pub on_trial_error: TrialErrorPolicy,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_trials: 50,
            n_startup: 10,
            on_trial_error: TrialErrorPolicy::RecordFailure,
        }
    }
}

impl TuneConfig {
    /// Set the sampler seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the trial budget
    pub fn with_n_trials(mut self, n: usize) -> Self {
        self.n_trials = n;
        self
    }

    /// Set the number of random startup trials
    pub fn with_startup(mut self, n: usize) -> Self {
        self.n_startup = n;
        self
    }

    /// Set the trial-failure policy
    pub fn with_trial_error_policy(mut self, policy: TrialErrorPolicy) -> Self {
        self.on_trial_error = policy;
        self
    }
}
