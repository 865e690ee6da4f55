use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Source file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to open workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet `{sheet}` not found in {} (available: {available})", path.display())]
    SheetNotFound {
        sheet: String,
        path: PathBuf,
        available: String,
    },

    #[error("Sheet `{0}` has no header row")]
    MissingHeader(String),

    #[error("Failed to build DataFrame from sheet: {0}")]
    Polars(#[from] PolarsError),
}
