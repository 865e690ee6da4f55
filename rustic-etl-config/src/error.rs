use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating the ETL configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Error parsing JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
