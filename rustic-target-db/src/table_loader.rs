use async_trait::async_trait;
use polars::prelude::DataFrame;

use crate::error::LoadError;

/// Destination of the transformed DataFrame.
#[async_trait]
pub trait TableLoader: Send + Sync {
    /// Replaces `table_name` with the contents of `df`: whatever the table
    /// held before is gone afterwards. Returns the number of rows written.
    async fn replace_table(&self, df: &DataFrame, table_name: &str) -> Result<u64, LoadError>;
}
