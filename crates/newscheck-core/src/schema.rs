//! Arrow schema definitions for the inference request/response tables.
//!
//! The gateway speaks Arrow: a request is a table with a `text` column, a
//! response repeats the request columns and appends `prediction` (raw class
//! index) and `probability` (2-element distribution). Interactive callers
//! submit a single-row request and read exactly the first response row.

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

pub const TEXT_COL: &str = "text";
pub const PREDICTION_COL: &str = "prediction";
pub const PROBABILITY_COL: &str = "probability";

/// Number of classes in the probability distribution.
pub const NUM_CLASSES: i32 = 2;

/// Schema of an inference request: one `text` column.
pub fn request_schema() -> Schema {
    Schema::new(vec![Field::new(TEXT_COL, DataType::Utf8, false)])
}

/// Columns the gateway appends to a request to form a response.
pub fn response_fields() -> Vec<Field> {
    vec![
        Field::new(PREDICTION_COL, DataType::Float64, false),
        Field::new(
            PROBABILITY_COL,
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                NUM_CLASSES,
            ),
            false,
        ),
    ]
}

/// Schema of an inference response over a plain single-column request.
pub fn response_schema() -> Schema {
    let mut fields: Vec<Field> = request_schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.extend(response_fields());
    Schema::new(fields)
}

/// Build a single-row request table for one submitted document.
pub fn request_batch(text: &str) -> Result<RecordBatch, ArrowError> {
    RecordBatch::try_new(
        Arc::new(request_schema()),
        vec![Arc::new(StringArray::from(vec![text]))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn request_schema_has_text_column() {
        let schema = request_schema();
        assert_eq!(schema.fields().len(), 1);
        assert!(schema.field_with_name(TEXT_COL).is_ok());
    }

    #[test]
    fn response_schema_has_expected_fields() {
        let schema = response_schema();
        assert_eq!(schema.fields().len(), 3);
        assert!(schema.field_with_name(PREDICTION_COL).is_ok());
        assert!(schema.field_with_name(PROBABILITY_COL).is_ok());
    }

    #[test]
    fn request_batch_is_single_row() {
        let batch = request_batch("The president signed a bill today.").unwrap();
        assert_eq!(batch.num_rows(), 1);

        let col = batch.column_by_name(TEXT_COL).unwrap();
        let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(arr.value(0), "The president signed a bill today.");
    }

    #[test]
    fn request_batch_accepts_empty_text() {
        // Validation happens before the gateway; the table itself does not
        // reject empty strings.
        let batch = request_batch("").unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert!(!batch.column(0).is_null(0));
    }
}
