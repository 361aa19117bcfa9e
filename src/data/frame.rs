//! Column-major table

use super::error::{DataError, Result};

/// A single typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the rows selected by `mask` into a new column.
    fn filter(&self, mask: &[bool]) -> Column {
        match self {
            Column::Float(v) => Column::Float(select(v, mask)),
            Column::Bool(v) => Column::Bool(select(v, mask)),
            Column::Str(v) => Column::Str(select(v, mask)),
        }
    }
}

fn select<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, &keep)| keep)
        .map(|(v, _)| v.clone())
        .collect()
}

/// An ordered collection of named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; its length must match the existing columns.
    pub fn push_column<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();
        let expected = self.height();
        if !self.columns.is_empty() && column.len() != expected {
            return Err(DataError::LengthMismatch {
                column: name,
                expected,
                actual: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Whether a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Columns in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Boolean column accessor; missing or mistyped columns are hard errors.
    pub fn bool_column(&self, name: &str) -> Result<&[bool]> {
        match self.column(name) {
            Some(Column::Bool(v)) => Ok(v),
            Some(_) => Err(DataError::TypeMismatch {
                column: name.to_string(),
                expected: "boolean",
            }),
            None => Err(DataError::column_not_found(name)),
        }
    }

    /// Float column accessor; missing or mistyped columns are hard errors.
    pub fn float_column(&self, name: &str) -> Result<&[f64]> {
        match self.column(name) {
            Some(Column::Float(v)) => Ok(v),
            Some(_) => Err(DataError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric",
            }),
            None => Err(DataError::column_not_found(name)),
        }
    }

    /// Copy the rows where `mask` is true, preserving table order.
    pub fn filter_rows(&self, mask: &[bool]) -> Frame {
        Frame {
            columns: self
                .columns
                .iter()
                .map(|(name, col)| (name.clone(), col.filter(mask)))
                .collect(),
        }
    }

    /// Copy the frame without the named columns.
    ///
    /// Every requested name must exist; the error lists all missing names
    /// at once rather than failing on the first.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Frame> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::ColumnNotFound { columns: missing });
        }
        Ok(Frame {
            columns: self
                .columns
                .iter()
                .filter(|(n, _)| !names.contains(&n.as_str()))
                .cloned()
                .collect(),
        })
    }
}
