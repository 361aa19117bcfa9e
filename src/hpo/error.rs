//! HPO error types

use thiserror::Error;

/// HPO errors
#[derive(Debug, Error)]
pub enum HpoError {
    #[error("Empty search space")]
    EmptySpace,

    #[error("Unrecognized sampling type {sampling_type:?} for hyperparameter {param:?}")]
    UnknownSamplingType {
        param: String,
        sampling_type: String,
    },

    #[error("Invalid descriptor for hyperparameter {param:?}: {reason}")]
    InvalidDescriptor { param: String, reason: String },

    #[error("Hyperparameter not found: {0}")]
    ParamNotFound(String),

    #[error("Invalid value for hyperparameter {0}: {1}")]
    InvalidValue(String, String),

    #[error("Unknown hyperparameter in assignment: {0}")]
    UnknownHyperparameter(String),

    #[error("Trial {id} failed: {reason}")]
    TrialFailed { id: usize, reason: String },

    #[error("No completed trials")]
    NoTrials,
}

/// Result type for HPO operations
pub type Result<T> = std::result::Result<T, HpoError>;
