use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;

use crate::config_structs::etl_config::EtlConfig;
use crate::error::ConfigError;

const TOML_CONFIG: &str = r#"
    data_directory = "data"
    data_file = "Budget-2022.xlsx"
    data_sheet = "Budget"
    transform_columns = ["Jan", "Feb", "Mar"]
    transform_column = "Month"
    transform_value = "Budget"
"#;

fn budget_config() -> EtlConfig {
    EtlConfig {
        data_directory: "data".to_string(),
        data_file: "Budget-2022.xlsx".to_string(),
        data_sheet: "Budget".to_string(),
        transform_columns: vec!["Jan".to_string(), "Feb".to_string(), "Mar".to_string()],
        transform_column: "Month".to_string(),
        transform_value: "Budget".to_string(),
    }
}

#[test]
fn test_deserialize_toml_config() {
    let config = EtlConfig::from_toml_str(TOML_CONFIG).unwrap();

    assert_eq!(config, budget_config());
}

#[test]
fn test_deserialize_json_config() {
    let config = r#"{
        "data_directory": "data",
        "data_file": "Budget-2022.xlsx",
        "data_sheet": "Budget",
        "transform_columns": ["Jan", "Feb", "Mar"],
        "transform_column": "Month",
        "transform_value": "Budget"
    }"#;

    let config = EtlConfig::from_json_str(config).unwrap();

    assert_eq!(config, budget_config());
}

#[test]
fn test_missing_key_is_rejected() {
    let config = r#"
        data_directory = "data"
        data_file = "Budget-2022.xlsx"
        transform_columns = ["Jan"]
        transform_column = "Month"
        transform_value = "Budget"
    "#;

    let error = EtlConfig::from_toml_str(config).unwrap_err();

    assert!(matches!(error, ConfigError::Toml(_)));
    assert!(error.to_string().contains("data_sheet"));
}

#[test]
fn test_empty_transform_columns_are_rejected() {
    let config = EtlConfig {
        transform_columns: vec![],
        ..budget_config()
    };

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_duplicate_transform_columns_are_rejected() {
    let config = EtlConfig {
        transform_columns: vec!["Jan".to_string(), "Jan".to_string()],
        ..budget_config()
    };

    let error = config.validate().unwrap_err();

    assert!(error.to_string().contains("`Jan` more than once"));
}

#[test]
fn test_same_category_and_value_column_is_rejected() {
    let config = EtlConfig {
        transform_value: "Month".to_string(),
        ..budget_config()
    };

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_blank_sheet_is_rejected() {
    let config = EtlConfig {
        data_sheet: "  ".to_string(),
        ..budget_config()
    };

    let error = config.validate().unwrap_err();

    assert!(error.to_string().contains("data_sheet"));
}

#[test]
fn test_table_name_derivation() {
    let config = budget_config();

    assert_eq!(config.file_stem(), "Budget-2022");
    assert_eq!(config.table_name(), "budget_2022");
    assert_eq!(config.source_path(), Path::new("data").join("Budget-2022.xlsx"));
}

#[test]
fn test_table_name_stops_at_first_dot() {
    let config = EtlConfig {
        data_file: "Sales-Plan-2021.final.xlsx".to_string(),
        ..budget_config()
    };

    assert_eq!(config.table_name(), "sales_plan_2021");
}

#[test]
fn test_load_from_picks_format_by_extension() {
    let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    toml_file.write_all(TOML_CONFIG.as_bytes()).unwrap();

    let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    json_file
        .write_all(serde_json::to_string(&budget_config()).unwrap().as_bytes())
        .unwrap();

    assert_eq!(EtlConfig::load_from(toml_file.path()).unwrap(), budget_config());
    assert_eq!(EtlConfig::load_from(json_file.path()).unwrap(), budget_config());
}

#[test]
fn test_load_from_missing_file() {
    let error = EtlConfig::load_from("does/not/exist.toml").unwrap_err();

    assert!(matches!(error, ConfigError::Read { .. }));
}
