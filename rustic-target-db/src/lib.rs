pub mod db_credentials;
pub mod error;
pub mod postgres_table_loader;
pub mod sql_column;
pub mod table_loader;

use deadpool_postgres::{Config, ManagerConfig, PoolConfig, RecyclingMethod};
use std::{env, time::Duration};

use crate::db_credentials::DbCredentials;

const RUSTIC_MELTER_APP_NAME: &str = "rustic_melter";

/// A load uses a single connection.
const MAX_POOL_SIZE: usize = 1;

pub fn prepare_db_config(credentials: &DbCredentials) -> Config {
    let mut cfg = Config::new();
    cfg.user = Some(credentials.user.clone());
    cfg.password = Some(credentials.password.clone());
    cfg.host = Some(credentials.host.clone());
    cfg.port = Some(credentials.port);
    cfg.dbname = Some(credentials.database_name.clone());
    cfg.application_name = Some(RUSTIC_MELTER_APP_NAME.to_string());
    cfg.connect_timeout = Some(connect_timeout());
    cfg.keepalives = Some(keep_alives());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(MAX_POOL_SIZE));
    cfg
}

fn connect_timeout() -> Duration {
    env::var("DB_CONNECT_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(30))
}

fn keep_alives() -> bool {
    env::var("DB_KEEP_ALIVES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(false)
}
