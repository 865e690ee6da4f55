pub mod config_structs;
pub mod error;

mod etl_config_impl;

#[cfg(test)]
mod tests;

/// Where the configuration is looked up when no path is given,
/// relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configuration_data/etl.toml";
