//! Tests for frame construction, split retrieval, and IPC loading

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::ipc::writer::FileWriter;
    use arrow::record_batch::RecordBatch;
    use proptest::prelude::*;

    use crate::data::{
        read_ipc, read_ipc_logged, retrieve_split, Column, DataError, Frame, Split, TARGET_COLUMN,
    };

    /// Six-row premium table with overlapping split membership.
    fn sample_frame() -> Frame {
        let mut frame = Frame::new();
        frame
            .push_column("Exposure", Column::Float(vec![0.5, 1.0, 0.7, 0.2, 0.9, 1.0]))
            .unwrap();
        frame
            .push_column("VehAge", Column::Float(vec![3.0, 10.0, 1.0, 7.0, 2.0, 5.0]))
            .unwrap();
        frame
            .push_column(
                "Region",
                Column::Str(
                    ["R1", "R2", "R1", "R3", "R2", "R1"]
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                ),
            )
            .unwrap();
        frame
            .push_column(
                TARGET_COLUMN,
                Column::Float(vec![120.0, 340.0, 95.0, 210.0, 180.0, 260.0]),
            )
            .unwrap();
        frame
            .push_column(
                "train_set",
                Column::Bool(vec![true, true, false, true, false, false]),
            )
            .unwrap();
        frame
            .push_column(
                "val_set",
                Column::Bool(vec![false, false, true, false, true, false]),
            )
            .unwrap();
        frame
            .push_column(
                "test_set",
                Column::Bool(vec![false, false, false, false, false, true]),
            )
            .unwrap();
        // big_train_set overlaps train and val; membership is not exclusive.
        frame
            .push_column(
                "big_train_set",
                Column::Bool(vec![true, true, true, true, true, false]),
            )
            .unwrap();
        frame
    }

    #[test]
    fn test_push_column_length_mismatch() {
        let mut frame = Frame::new();
        frame
            .push_column("a", Column::Float(vec![1.0, 2.0]))
            .unwrap();
        let result = frame.push_column("b", Column::Float(vec![1.0]));
        assert!(matches!(result, Err(DataError::LengthMismatch { .. })));
    }

    #[test]
    fn test_retrieve_split_row_count_and_order() {
        let frame = sample_frame();
        let (x, y) = retrieve_split(&frame, &[], Split::Train).unwrap();
        assert_eq!(x.height(), 3);
        assert_eq!(y.len(), 3);
        // Original table order restricted to the subset.
        assert_eq!(y, vec![120.0, 340.0, 210.0]);
        assert_eq!(x.float_column("Exposure").unwrap(), &[0.5, 1.0, 0.2][..]);
    }

    #[test]
    fn test_retrieve_split_target_never_in_x() {
        let frame = sample_frame();
        for split in [Split::Train, Split::Val, Split::Test, Split::BigTrain] {
            let (x, _) = retrieve_split(&frame, &[], split).unwrap();
            assert!(!x.has_column(TARGET_COLUMN));
        }
    }

    #[test]
    fn test_retrieve_split_drops_requested_features() {
        let frame = sample_frame();
        let drops = vec!["Exposure".to_string(), "Region".to_string()];
        let (x, y) = retrieve_split(&frame, &drops, Split::Val).unwrap();
        assert!(!x.has_column("Exposure"));
        assert!(!x.has_column("Region"));
        assert!(x.has_column("VehAge"));
        assert_eq!(y, vec![95.0, 180.0]);
    }

    #[test]
    fn test_retrieve_split_missing_drop_column_is_hard_failure() {
        let frame = sample_frame();
        let drops = vec!["NoSuchFeature".to_string()];
        let result = retrieve_split(&frame, &drops, Split::Train);
        match result {
            Err(DataError::ColumnNotFound { columns }) => {
                assert_eq!(columns, vec!["NoSuchFeature".to_string()]);
            }
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_retrieve_split_reports_all_missing_columns() {
        let frame = sample_frame();
        let drops = vec!["Gone".to_string(), "AlsoGone".to_string()];
        let result = retrieve_split(&frame, &drops, Split::Train);
        match result {
            Err(DataError::ColumnNotFound { columns }) => {
                assert_eq!(columns.len(), 2);
                assert!(columns.contains(&"Gone".to_string()));
                assert!(columns.contains(&"AlsoGone".to_string()));
            }
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_retrieve_split_missing_target() {
        let mut frame = Frame::new();
        frame
            .push_column("a", Column::Float(vec![1.0]))
            .unwrap();
        frame
            .push_column("train_set", Column::Bool(vec![true]))
            .unwrap();
        let result = retrieve_split(&frame, &[], Split::Train);
        match result {
            Err(DataError::ColumnNotFound { columns }) => {
                assert_eq!(columns, vec![TARGET_COLUMN.to_string()]);
            }
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_retrieve_split_result_is_independent_copy() {
        let frame = sample_frame();
        let before = frame.clone();
        let (x, mut y) = retrieve_split(&frame, &[], Split::Train).unwrap();
        y[0] = f64::NAN;
        drop(x);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_big_train_overlaps_other_splits() {
        let frame = sample_frame();
        let (x_big, _) = retrieve_split(&frame, &[], Split::BigTrain).unwrap();
        let (x_train, _) = retrieve_split(&frame, &[], Split::Train).unwrap();
        assert!(x_big.height() > x_train.height());
    }

    proptest! {
        /// Property: for any subset of droppable features, the target and
        /// every dropped feature are absent from X while X/y row counts
        /// stay equal to the indicator count.
        #[test]
        fn prop_drop_subsets(drop_exposure in any::<bool>(),
                             drop_vehage in any::<bool>(),
                             drop_region in any::<bool>()) {
            let frame = sample_frame();
            let mut drops = Vec::new();
            if drop_exposure { drops.push("Exposure".to_string()); }
            if drop_vehage { drops.push("VehAge".to_string()); }
            if drop_region { drops.push("Region".to_string()); }

            let (x, y) = retrieve_split(&frame, &drops, Split::Train).unwrap();
            let expected_rows = frame
                .bool_column("train_set")
                .unwrap()
                .iter()
                .filter(|&&b| b)
                .count();

            prop_assert_eq!(x.height(), expected_rows);
            prop_assert_eq!(y.len(), expected_rows);
            prop_assert!(!x.has_column(TARGET_COLUMN));
            for name in &drops {
                prop_assert!(!x.has_column(name));
            }
        }
    }

    fn premium_batch(schema: Arc<Schema>, targets: Vec<f64>) -> RecordBatch {
        let n = targets.len();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from((0..n).map(|i| i as f64).collect::<Vec<_>>())),
            Arc::new(StringArray::from(vec!["R1"; n])),
            Arc::new(Float64Array::from(targets)),
            Arc::new(BooleanArray::from(vec![true; n])),
        ];
        RecordBatch::try_new(schema, columns).unwrap()
    }

    fn premium_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("VehAge", DataType::Float64, false),
            Field::new("Region", DataType::Utf8, false),
            Field::new(TARGET_COLUMN, DataType::Float64, false),
            Field::new("train_set", DataType::Boolean, false),
        ]))
    }

    #[test]
    fn test_read_ipc_single_batch() {
        let schema = premium_schema();
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut writer = FileWriter::try_new(file.reopen().unwrap(), &schema).unwrap();
            writer
                .write(&premium_batch(schema.clone(), vec![10.0, 20.0, 30.0]))
                .unwrap();
            writer.finish().unwrap();
        }

        let mut extra_calls = 0;
        let frame = read_ipc(file.path(), |_| extra_calls += 1).unwrap();
        assert_eq!(extra_calls, 0);
        assert_eq!(frame.height(), 3);
        assert_eq!(
            frame.float_column(TARGET_COLUMN).unwrap(),
            &[10.0, 20.0, 30.0][..]
        );
        assert_eq!(frame.bool_column("train_set").unwrap(), &[true; 3][..]);
        assert_eq!(
            frame.column("Region"),
            Some(&Column::Str(vec!["R1".into(), "R1".into(), "R1".into()]))
        );
    }

    #[test]
    fn test_read_ipc_multiple_batches_first_wins() {
        let schema = premium_schema();
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut writer = FileWriter::try_new(file.reopen().unwrap(), &schema).unwrap();
            writer
                .write(&premium_batch(schema.clone(), vec![1.0, 2.0]))
                .unwrap();
            writer
                .write(&premium_batch(schema.clone(), vec![3.0, 4.0, 5.0]))
                .unwrap();
            writer.finish().unwrap();
        }

        let mut reported = None;
        let frame = read_ipc(file.path(), |count| reported = Some(count)).unwrap();
        // First batch used, discard observable through the diagnostic.
        assert_eq!(reported, Some(2));
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.float_column(TARGET_COLUMN).unwrap(), &[1.0, 2.0][..]);
    }

    #[test]
    fn test_read_ipc_logged_loads_and_warns() {
        let schema = premium_schema();
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut writer = FileWriter::try_new(file.reopen().unwrap(), &schema).unwrap();
            writer
                .write(&premium_batch(schema.clone(), vec![1.0, 2.0]))
                .unwrap();
            writer
                .write(&premium_batch(schema.clone(), vec![3.0]))
                .unwrap();
            writer.finish().unwrap();
        }

        // Same result as the callback variant; the extra batch only logs.
        let frame = read_ipc_logged(file.path()).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.float_column(TARGET_COLUMN).unwrap(), &[1.0, 2.0][..]);
    }

    #[test]
    fn test_read_ipc_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_ipc(dir.path().join("absent.arrow"), |_| {});
        assert!(matches!(result, Err(DataError::NotFound { .. })));
    }

    #[test]
    fn test_read_ipc_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        file.write_all(b"this is not an arrow file").unwrap();
        let result = read_ipc(file.path(), |_| {});
        assert!(matches!(result, Err(DataError::Parse(_))));
    }
}
