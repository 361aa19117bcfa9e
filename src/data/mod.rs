//! Tabular data handling
//!
//! A small column-major [`Frame`] holds the premium table in memory;
//! [`read_ipc`] loads it from an Arrow IPC file and [`retrieve_split`]
//! slices it into the (X, y) pair for one named split. The frame is
//! read-only after load; every slicing operation deep-copies, so results
//! are independent of the source table.

mod error;
mod frame;
mod ipc;
mod split;

#[cfg(test)]
mod tests;

pub use error::{DataError, Result};
pub use frame::{Column, Frame};
pub use ipc::{read_ipc, read_ipc_logged};
pub use split::{retrieve_split, Split, TARGET_COLUMN};
