//! Study: sequential trial execution and bookkeeping

use std::collections::VecDeque;
use std::fmt;

use crate::config::{TrialErrorPolicy, TuneConfig};

use super::error::{HpoError, Result};
use super::tpe::TpeSampler;
use super::types::{Assignment, SearchSpace, Trial, TrialStatus};

/// Accumulated record of all trials for one optimization run.
///
/// Single-threaded by construction: `optimize` evaluates one trial fully
/// (sample, fit, score, record) before starting the next, and the study is
/// mutated by nothing else.
#[derive(Debug, Clone)]
pub struct Study {
    sampler: TpeSampler,
    trials: Vec<Trial>,
    queue: VecDeque<Assignment>,
    on_trial_error: TrialErrorPolicy,
}

impl Study {
    /// Create a study minimizing over `space`, configured by `config`.
    pub fn new(space: SearchSpace, config: &TuneConfig) -> Self {
        Self {
            sampler: TpeSampler::new(space, config.seed).with_startup(config.n_startup),
            trials: Vec::new(),
            queue: VecDeque::new(),
            on_trial_error: config.on_trial_error,
        }
    }

    /// Enqueue an assignment to be evaluated before sampler proposals.
    ///
    /// Enqueued assignments are served in insertion order as the study's
    /// first trials, so known-good configurations are always tried
    /// regardless of sampler state. Partial assignments are allowed; the
    /// unspecified parameters are sampled randomly.
    pub fn enqueue(&mut self, assignment: Assignment) {
        self.queue.push_back(assignment);
    }

    /// Run `n_trials` strictly sequential trials of `objective`.
    ///
    /// An objective error is handled per the configured policy: recorded
    /// as a failed trial (infinite loss, study continues) or propagated,
    /// aborting the run.
    pub fn optimize<F, E>(&mut self, n_trials: usize, mut objective: F) -> Result<()>
    where
        F: FnMut(&Assignment) -> std::result::Result<f64, E>,
        E: fmt::Display,
    {
        for _ in 0..n_trials {
            let id = self.trials.len();
            let assignment = match self.queue.pop_front() {
                Some(partial) => self.sampler.complete(partial)?,
                None => self.sampler.suggest(&self.trials)?,
            };
            let mut trial = Trial::new(id, assignment);
            match objective(&trial.assignment) {
                Ok(loss) => {
                    trial.complete(loss);
                    tracing::debug!(trial = id, loss, "trial completed");
                    self.trials.push(trial);
                }
                Err(e) => match self.on_trial_error {
                    TrialErrorPolicy::RecordFailure => {
                        tracing::warn!(trial = id, error = %e, "trial failed; recording and continuing");
                        trial.fail();
                        self.trials.push(trial);
                    }
                    TrialErrorPolicy::Abort => {
                        return Err(HpoError::TrialFailed {
                            id,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
        Ok(())
    }

    /// All trials evaluated so far, in execution order
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// Best (lowest-loss) completed trial so far
    pub fn best_trial(&self) -> Option<&Trial> {
        self.trials
            .iter()
            .filter(|t| t.status == TrialStatus::Completed)
            .min_by(|a, b| {
                a.loss
                    .partial_cmp(&b.loss)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Assignment of the best completed trial
    pub fn best_assignment(&self) -> Option<&Assignment> {
        self.best_trial().map(|t| &t.assignment)
    }
}
