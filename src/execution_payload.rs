use std::path::PathBuf;

use rustic_etl_config::config_structs::etl_config::EtlConfig;

/// Values derived once from the configuration at the start of a run.
pub struct ExecutionPayload {
    source_path: PathBuf,
    table_name: String,
}

impl ExecutionPayload {
    pub fn new(config: &EtlConfig) -> Self {
        Self {
            source_path: config.source_path(),
            table_name: config.table_name(),
        }
    }

    pub fn source_path(&self) -> &PathBuf {
        &self.source_path
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}
