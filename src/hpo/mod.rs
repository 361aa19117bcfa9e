//! Hyperparameter optimization
//!
//! Seeded Bayesian search with a Tree-structured Parzen Estimator sampler.
//! A [`Study`] evaluates a fixed budget of trials strictly sequentially,
//! optionally seeded with enqueued default assignments, and exposes the
//! best (lowest-loss) assignment seen.
//!
//! # References
//!
//! \[1\] Bergstra et al. (2011) - Algorithms for Hyper-Parameter Optimization (TPE)

mod error;
mod study;
mod tpe;
mod types;

pub use error::{HpoError, Result};
pub use study::Study;
pub use tpe::TpeSampler;
pub use types::{Assignment, ParamDomain, ParamValue, SearchSpace, Trial, TrialStatus};
