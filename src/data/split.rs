//! Named split retrieval

use serde::{Deserialize, Serialize};

use super::error::{DataError, Result};
use super::frame::Frame;

/// Name of the target column in the premium table.
pub const TARGET_COLUMN: &str = "PremTot";

/// The recognized dataset partitions.
///
/// Membership is a boolean indicator column per split; a row may belong to
/// zero, one, or several splits (nothing enforces exclusivity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Train,
    Val,
    Test,
    BigTrain,
}

impl Split {
    /// Name of the indicator column for this split
    pub fn indicator(self) -> &'static str {
        match self {
            Split::Train => "train_set",
            Split::Val => "val_set",
            Split::Test => "test_set",
            Split::BigTrain => "big_train_set",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.indicator())
    }
}

/// Extract the feature matrix and target vector for one split.
///
/// Rows are selected by indicator value (original table order preserved)
/// and deep-copied, so mutating the result never touches the source frame.
/// Every `features_to_drop` column and the target column are removed from
/// X; the target values become y. Any missing requested column is a hard
/// [`DataError::ColumnNotFound`] naming all missing columns.
///
/// Guarantee: X and y have identical row count and order, and the target
/// is never a column of X.
pub fn retrieve_split(
    frame: &Frame,
    features_to_drop: &[String],
    split: Split,
) -> Result<(Frame, Vec<f64>)> {
    let mut missing: Vec<String> = features_to_drop
        .iter()
        .filter(|name| !frame.has_column(name))
        .cloned()
        .collect();
    if !frame.has_column(TARGET_COLUMN) {
        missing.push(TARGET_COLUMN.to_string());
    }
    if !missing.is_empty() {
        return Err(DataError::ColumnNotFound { columns: missing });
    }

    let mask = frame.bool_column(split.indicator())?.to_vec();
    let filtered = frame.filter_rows(&mask);
    let y = filtered.float_column(TARGET_COLUMN)?.to_vec();

    let mut drops: Vec<&str> = features_to_drop.iter().map(String::as_str).collect();
    drops.push(TARGET_COLUMN);
    let x = filtered.drop_columns(&drops)?;

    Ok((x, y))
}
