use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config_structs::etl_config::EtlConfig;
use crate::error::ConfigError;

impl EtlConfig {
    /// Load the configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    /// The loaded configuration is validated before it is returned.
    ///
    /// # Arguments
    ///
    /// * `conf_file_path` - Path of the configuration file.
    pub fn load_from(conf_file_path: impl AsRef<Path>) -> Result<EtlConfig, ConfigError> {
        let conf_file_path = conf_file_path.as_ref();

        debug!("Configuration file path: {:?}", conf_file_path.as_os_str());

        let conf = fs::read_to_string(conf_file_path).map_err(|source| ConfigError::Read {
            path: conf_file_path.to_path_buf(),
            source,
        })?;

        let is_json = conf_file_path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&conf)
        } else {
            Self::from_toml_str(&conf)
        }
    }

    pub fn from_toml_str(conf: &str) -> Result<EtlConfig, ConfigError> {
        let config: EtlConfig = toml::from_str(conf)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(conf: &str) -> Result<EtlConfig, ConfigError> {
        let config: EtlConfig = serde_json::from_str(conf)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that can be checked without looking at the data.
    ///
    /// Column existence is only known once the sheet is read, so it is left
    /// to the transform step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("data_directory", &self.data_directory),
            ("data_file", &self.data_file),
            ("data_sheet", &self.data_sheet),
            ("transform_column", &self.transform_column),
            ("transform_value", &self.transform_value),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("`{key}` must not be empty")));
        }

        if self.transform_columns.is_empty() {
            return Err(ConfigError::Invalid(
                "`transform_columns` must list at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.transform_columns {
            if column.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "`transform_columns` contains an empty column name".to_string(),
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "`transform_columns` lists `{column}` more than once"
                )));
            }
        }

        if self.transform_column == self.transform_value {
            return Err(ConfigError::Invalid(format!(
                "`transform_column` and `transform_value` are both `{}`",
                self.transform_column
            )));
        }

        Ok(())
    }

    /// Full path of the source spreadsheet.
    pub fn source_path(&self) -> PathBuf {
        Path::new(&self.data_directory).join(&self.data_file)
    }

    /// File name up to its first `.`, e.g. `Budget-2022` for `Budget-2022.xlsx`.
    pub fn file_stem(&self) -> &str {
        self.data_file
            .split_once('.')
            .map_or(self.data_file.as_str(), |(stem, _)| stem)
    }

    /// Destination table: the file stem with hyphens turned into
    /// underscores, lowercased.
    pub fn table_name(&self) -> String {
        self.file_stem().replace('-', "_").to_lowercase()
    }
}
