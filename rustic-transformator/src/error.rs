use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures of the wide-to-long transformation. Any of them aborts the run
/// before anything is loaded.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Column `{0}` not found in DataFrame")]
    MissingColumn(String),

    #[error("Column `{0}` would appear twice in the transformed DataFrame")]
    DuplicateColumn(String),

    #[error("No value columns were given to unpivot")]
    NoValueColumns,

    #[error("`{value}` in column `{column}` is not a month abbreviation (Jan..Dec)")]
    InvalidMonth { column: String, value: String },

    #[error("Cannot derive a year from file name `{0}`: its stem must end with four digits")]
    InvalidYear(String),

    #[error("Column `{column}` must hold text, found {dtype}")]
    UnexpectedType { column: String, dtype: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
