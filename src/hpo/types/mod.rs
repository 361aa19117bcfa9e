//! Core HPO types

mod parameter;
mod space;
mod trial;

#[cfg(test)]
mod tests;

pub use parameter::{ParamDomain, ParamValue};
pub use space::{Assignment, SearchSpace};
pub use trial::{Trial, TrialStatus};
