//! Tree-structured Parzen Estimator (TPE) sampler
//!
//! Based on Bergstra et al. (2011) - Algorithms for Hyper-Parameter Optimization

mod sampler;
mod sampling;

pub use sampler::TpeSampler;
