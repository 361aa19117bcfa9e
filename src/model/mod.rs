//! Gradient-boosted regression objective
//!
//! A thin wrapper over the `gbdt` crate: hyperparameter assignments are
//! turned into a typed [`GbmParams`], categorical feature columns are
//! label-encoded, and a fit is scored by validation RMSE. This module
//! provides the per-trial objective the study minimizes.

mod encode;
mod gbm;
mod metrics;


pub use encode::Encoder;
pub use gbm::{evaluate, GbmParams, GbmRegressor};
pub use metrics::rmse;
