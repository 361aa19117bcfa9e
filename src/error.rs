//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::data::DataError;
use crate::hpo::HpoError;

/// Top-level error wrapping the per-module error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Hpo(#[from] HpoError),
}

/// Result type for crate-level operations.
pub type Result<T> = std::result::Result<T, Error>;
