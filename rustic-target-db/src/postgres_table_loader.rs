use std::time::Instant;

use async_trait::async_trait;
use colored::Colorize;
use deadpool_postgres::{Pool, Runtime, tokio_postgres::NoTls};
use polars::prelude::DataFrame;
use rustic_duration::beautify_duration;
use tokio_postgres::types::ToSql;
use tracing::{debug, info};

use crate::db_credentials::DbCredentials;
use crate::error::LoadError;
use crate::prepare_db_config;
use crate::sql_column::{
    SqlColumn, create_table_sql, drop_table_sql, insert_sql, rows_per_insert,
};
use crate::table_loader::TableLoader;

/// Writes DataFrames to Postgres.
///
/// The drop, create and inserts share one transaction, so a failed load
/// leaves the previous table in place.
pub struct PostgresTableLoader {
    pool: Pool,
    database_name: String,
}

impl PostgresTableLoader {
    /// Builds the connection pool. No connection is opened until the first
    /// load.
    pub fn new(credentials: &DbCredentials) -> Result<Self, LoadError> {
        let pool = prepare_db_config(credentials).create_pool(Some(Runtime::Tokio1), NoTls)?;

        Ok(Self {
            pool,
            database_name: credentials.database_name.clone(),
        })
    }

    pub fn close_connection_pool(&self) {
        self.pool.close();
    }
}

#[async_trait]
impl TableLoader for PostgresTableLoader {
    async fn replace_table(&self, df: &DataFrame, table_name: &str) -> Result<u64, LoadError> {
        let load_start = Instant::now();
        let write_error = |source| LoadError::Write {
            table: table_name.to_string(),
            source,
        };

        let columns = df
            .get_columns()
            .iter()
            .map(SqlColumn::from_column)
            .collect::<Result<Vec<_>, _>>()?;

        info!("{}", "Connecting to target Postgres DB".bold().green());
        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await.map_err(write_error)?;

        let ddl = format!(
            "{}; {}",
            drop_table_sql(table_name),
            create_table_sql(table_name, &columns)
        );
        debug!("Recreating table: {ddl}");
        transaction.batch_execute(&ddl).await.map_err(write_error)?;

        let height = df.height();
        let batch_size = rows_per_insert(columns.len());
        let mut inserted = 0;
        let mut batch_start = 0;

        while batch_start < height {
            let batch_end = (batch_start + batch_size).min(height);
            let statement = insert_sql(table_name, &columns, batch_end - batch_start);
            let params: Vec<&(dyn ToSql + Sync)> = (batch_start..batch_end)
                .flat_map(|row| columns.iter().map(move |column| column.param(row)))
                .collect();

            inserted += transaction
                .execute(statement.as_str(), &params)
                .await
                .map_err(write_error)?;
            debug!("Inserted rows {batch_start}..{batch_end} into {table_name}");

            batch_start = batch_end;
        }

        transaction.commit().await.map_err(write_error)?;

        info!(
            "{} Time taken: {}",
            "Data loaded successfully!".bold().green(),
            beautify_duration(load_start.elapsed())
        );
        info!(
            "{inserted} rows are loaded into {} table in {} database",
            table_name.bold(),
            self.database_name.bold()
        );

        Ok(inserted)
    }
}
