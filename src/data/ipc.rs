//! Arrow IPC table loading

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::ipc::reader::FileReader;
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::path::Path;

use super::error::{DataError, Result};
use super::frame::{Column, Frame};

/// Read one table from an Arrow IPC file.
///
/// Exactly one record batch is the expected shape. If the file holds more,
/// the first batch is used and the rest are discarded — preserved from the
/// reference workflow — but `on_extra_tables` is invoked with the total
/// batch count so the discard is observable.
pub fn read_ipc<P, F>(path: P, mut on_extra_tables: F) -> Result<Frame>
where
    P: AsRef<Path>,
    F: FnMut(usize),
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DataError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let reader = FileReader::try_new(file, None)?;
    let mut batches: Vec<RecordBatch> = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    let first = match batches.first() {
        Some(batch) => batch,
        None => {
            return Err(DataError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };
    if batches.len() > 1 {
        on_extra_tables(batches.len());
    }

    frame_from_batch(first)
}

/// [`read_ipc`] with the extra-table diagnostic routed to `tracing::warn!`.
pub fn read_ipc_logged<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let shown = path.as_ref().display().to_string();
    read_ipc(&path, |count| {
        tracing::warn!(
            file = %shown,
            batches = count,
            "input file holds more than one table; using the first"
        );
    })
}

fn frame_from_batch(batch: &RecordBatch) -> Result<Frame> {
    let mut frame = Frame::new();
    for (field, array) in batch.schema().fields().iter().zip(batch.columns()) {
        let name = field.name();
        if array.null_count() > 0 {
            return Err(DataError::NullValues {
                column: name.clone(),
            });
        }
        let column = match field.data_type() {
            DataType::Float64 => Column::Float(downcast::<Float64Array>(name, array)?.values().to_vec()),
            DataType::Float32 => Column::Float(
                downcast::<Float32Array>(name, array)?
                    .values()
                    .iter()
                    .map(|&v| f64::from(v))
                    .collect(),
            ),
            DataType::Int64 => Column::Float(
                downcast::<Int64Array>(name, array)?
                    .values()
                    .iter()
                    .map(|&v| v as f64)
                    .collect(),
            ),
            DataType::Int32 => Column::Float(
                downcast::<Int32Array>(name, array)?
                    .values()
                    .iter()
                    .map(|&v| f64::from(v))
                    .collect(),
            ),
            DataType::Boolean => {
                let array = downcast::<BooleanArray>(name, array)?;
                Column::Bool((0..array.len()).map(|i| array.value(i)).collect())
            }
            DataType::Utf8 => {
                let array = downcast::<StringArray>(name, array)?;
                Column::Str((0..array.len()).map(|i| array.value(i).to_string()).collect())
            }
            DataType::LargeUtf8 => {
                let array = downcast::<LargeStringArray>(name, array)?;
                Column::Str((0..array.len()).map(|i| array.value(i).to_string()).collect())
            }
            other => {
                return Err(DataError::UnsupportedColumnType {
                    column: name.clone(),
                    datatype: other.to_string(),
                })
            }
        };
        frame.push_column(name.clone(), column)?;
    }
    Ok(frame)
}

fn downcast<'a, T: 'static>(name: &str, array: &'a ArrayRef) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DataError::TypeMismatch {
            column: name.to_string(),
            expected: "the declared arrow type",
        })
}
