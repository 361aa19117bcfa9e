//! Trial bookkeeping

use serde::{Deserialize, Serialize};

use super::space::Assignment;

/// A single trial: one sampled assignment plus its evaluation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trial {
    /// Trial index within the study
    pub id: usize,
    /// Hyperparameter assignment evaluated by this trial
    pub assignment: Assignment,
    /// Scalar loss (lower is better); infinite until completed
    pub loss: f64,
    /// Trial status
    pub status: TrialStatus,
}

impl Trial {
    /// Create a pending trial
    pub fn new(id: usize, assignment: Assignment) -> Self {
        Self {
            id,
            assignment,
            loss: f64::INFINITY,
            status: TrialStatus::Pending,
        }
    }

    /// Mark trial as complete with its loss
    pub fn complete(&mut self, loss: f64) {
        self.loss = loss;
        self.status = TrialStatus::Completed;
    }

    /// Mark trial as failed; a failed trial keeps an infinite loss and is
    /// excluded from best-trial selection and sampler modeling.
    pub fn fail(&mut self) {
        self.loss = f64::INFINITY;
        self.status = TrialStatus::Failed;
    }
}

/// Trial status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    Pending,
    Completed,
    Failed,
}
