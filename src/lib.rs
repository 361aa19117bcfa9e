//! Hyperparameter tuning helpers for tabular premium regression.
//!
//! `afinar` wires together the pieces of a gradient-boosting regression
//! workflow on an insurance premium table: loading a serialized table,
//! slicing it into named splits, and running a seeded TPE study over a
//! declarative search space.
//!
//! # Example
//!
//! ```ignore
//! use afinar::config::{load_params, TuneConfig};
//! use afinar::data::{read_ipc_logged, retrieve_split, Split};
//! use afinar::tune;
//!
//! let params = load_params("conf/tuning.yaml")?;
//! let frame = read_ipc_logged("data/premiums.arrow")?;
//! let (train_x, train_y) = retrieve_split(&frame, &[], Split::Train)?;
//! let (val_x, val_y) = retrieve_split(&frame, &[], Split::Val)?;
//!
//! let outcome = tune(
//!     &train_x, &train_y, &val_x, &val_y,
//!     &["Region".to_string()],
//!     &params.search_space,
//!     &params.default_assignments,
//!     &TuneConfig::default(),
//! )?;
//! println!("best loss: {}", outcome.best_loss);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod hpo;
pub mod model;
mod tuner;

pub use error::{Error, Result};
pub use tuner::{tune, TuneOutcome};
