use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustic_etl_config::DEFAULT_CONFIG_PATH;
use rustic_etl_config::config_structs::etl_config::EtlConfig;
use rustic_target_db::db_credentials::DbCredentials;
use rustic_target_db::postgres_table_loader::PostgresTableLoader;
use rustic_transformator::clock::SystemClock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::pipeline::EtlPipeline;

mod execution_payload;
mod pipeline;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// ETL configuration file (TOML, or JSON when the name ends in `.json`)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Credentials may live in a `.env` file. A missing file is fine, a malformed
/// one is an error.
fn load_env_file(loaded: dotenvy::Result<PathBuf>) -> Result<Option<PathBuf>> {
    match loaded {
        Ok(env_file) => Ok(Some(env_file)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(error).context("Could not read .env file"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = EtlConfig::load_from(&cli.config)
        .with_context(|| format!("Could not load configuration from {}", cli.config.display()))?;

    if let Some(env_file) = load_env_file(dotenvy::dotenv())? {
        info!("Loaded environment from {}", env_file.display());
    }
    let credentials = DbCredentials::from_env().context("Database credentials are incomplete")?;
    info!(
        "Will load into {}:{}/{}",
        credentials.host, credentials.port, credentials.database_name
    );

    let loader = PostgresTableLoader::new(&credentials)?;

    let result = EtlPipeline::builder()
        .config(&config)
        .loader(&loader)
        .clock(&SystemClock)
        .build()
        .run()
        .await;

    info!("{}", "Closing connection pool".bold().green());
    loader.close_connection_pool();

    let report = result?;
    info!(
        "{}: {} rows extracted, {} rows loaded into {}",
        "ETL finished".bold().green(),
        report.rows_extracted,
        report.rows_loaded,
        report.table_name
    );

    Ok(())
}
