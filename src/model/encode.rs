//! Feature encoding for the regression backend

use std::collections::BTreeMap;

use crate::data::{Column, DataError, Frame};

/// Label encoder for categorical feature columns.
///
/// Categories are learned from the training split in first-appearance
/// order; values unseen at transform time (e.g. a validation-only
/// category) map to a sentinel code one past the learned range. Numeric
/// and boolean columns pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    categories: BTreeMap<String, Vec<String>>,
}

impl Encoder {
    /// Learn category codes from `frame` for the named categorical features.
    pub fn fit(frame: &Frame, categorical_features: &[String]) -> Result<Self, DataError> {
        let mut categories = BTreeMap::new();
        for name in categorical_features {
            match frame.column(name) {
                Some(Column::Str(values)) => {
                    let mut seen: Vec<String> = Vec::new();
                    for value in values {
                        if !seen.contains(value) {
                            seen.push(value.clone());
                        }
                    }
                    categories.insert(name.clone(), seen);
                }
                // A categorical already stored numerically passes through.
                Some(Column::Float(_)) | Some(Column::Bool(_)) => {}
                None => return Err(DataError::ColumnNotFound {
                    columns: vec![name.clone()],
                }),
            }
        }
        Ok(Self { categories })
    }

    /// Encode `frame` into the row-major f32 matrix the backend consumes.
    ///
    /// Column order follows the frame's table order, so matrices produced
    /// from frames with identical schemas line up feature-for-feature.
    pub fn transform(&self, frame: &Frame) -> Result<Vec<Vec<f32>>, DataError> {
        let mut matrix: Vec<Vec<f32>> = vec![Vec::with_capacity(frame.width()); frame.height()];
        for (name, column) in frame.iter() {
            match column {
                Column::Float(values) => {
                    for (row, &value) in matrix.iter_mut().zip(values) {
                        row.push(value as f32);
                    }
                }
                Column::Bool(values) => {
                    for (row, &value) in matrix.iter_mut().zip(values) {
                        row.push(if value { 1.0 } else { 0.0 });
                    }
                }
                Column::Str(values) => {
                    let cats = self.categories.get(name).ok_or_else(|| {
                        DataError::TypeMismatch {
                            column: name.to_string(),
                            expected: "numeric or a declared categorical feature",
                        }
                    })?;
                    for (row, value) in matrix.iter_mut().zip(values) {
                        let code = cats
                            .iter()
                            .position(|c| c == value)
                            .unwrap_or(cats.len());
                        row.push(code as f32);
                    }
                }
            }
        }
        Ok(matrix)
    }

    /// Learned categories for one feature, in code order
    pub fn categories(&self, name: &str) -> Option<&[String]> {
        self.categories.get(name).map(Vec::as_slice)
    }
}
