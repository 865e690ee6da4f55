use deadpool_postgres::{CreatePoolError, PoolError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while writing the transformed DataFrame to the target database.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Database credential `{0}` is missing or empty")]
    MissingCredential(&'static str),

    #[error("Database credential `{name}` is invalid: `{value}`")]
    InvalidCredential { name: &'static str, value: String },

    #[error("Failed to create connection pool: {0}")]
    Pool(#[from] CreatePoolError),

    #[error("Failed to connect to database: {0}")]
    Connection(#[from] PoolError),

    #[error("Failed to write table `{table}`: {source}")]
    Write {
        table: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed to read DataFrame column for loading: {0}")]
    Polars(#[from] PolarsError),
}

impl LoadError {
    /// True when the database could not be reached or the credentials are
    /// unusable, as opposed to a failure while writing.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            LoadError::MissingCredential(_)
                | LoadError::InvalidCredential { .. }
                | LoadError::Pool(_)
                | LoadError::Connection(_)
        )
    }
}
