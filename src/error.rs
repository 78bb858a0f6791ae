use thiserror::Error;

use crate::models::NumericField;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("row {row}: {field} is not numeric (got {value:?})")]
    MalformedRecord {
        row: usize,
        field: NumericField,
        value: String,
    },

    #[error("row {row}: expected {expected} fields, got {got}")]
    ShortRecord {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("no records loaded; {operation} needs at least one")]
    EmptyDataset { operation: &'static str },

    #[error("correlation between {x} and {y} is undefined: zero variance")]
    UndefinedCorrelation { x: NumericField, y: NumericField },
}
