use serde::{Deserialize, Serialize};

/// Settings for one ETL run. Every key is required.
#[cfg_attr(test, derive(PartialEq))]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EtlConfig {
    /// Folder holding the source spreadsheet.
    pub data_directory: String,
    /// Spreadsheet file name including its extension, e.g. `Budget-2022.xlsx`.
    /// The stem must end with a four digit year.
    pub data_file: String,
    /// Sheet to read from the spreadsheet.
    pub data_sheet: String,
    /// Month columns that get folded into rows.
    pub transform_columns: Vec<String>,
    /// Name of the column holding the folded month.
    pub transform_column: String,
    /// Name of the column holding the folded value.
    pub transform_value: String,
}
