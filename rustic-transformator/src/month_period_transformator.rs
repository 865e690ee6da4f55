use polars::prelude::*;

use crate::error::TransformError;
use crate::transformator::Transformator;
use crate::transformator_output::TransformatorOutput;
use crate::transformator_type::TransformatorType;

/// English month abbreviations, matched case-sensitively.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number (1..=12) of an abbreviation such as `Mar`.
pub fn month_number(abbreviation: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|month| *month == abbreviation)
        .map(|idx| idx as u32 + 1)
}

/// Year encoded in the last four characters of the file stem,
/// e.g. `Budget-2021.xlsx` is 2021.
pub fn year_from_file_name(file_name: &str) -> Result<u16, TransformError> {
    let stem = file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem);
    let token = stem.get(stem.len().saturating_sub(4)..).unwrap_or_default();

    if token.len() != 4 || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(TransformError::InvalidYear(file_name.to_string()));
    }

    token
        .parse()
        .map_err(|_| TransformError::InvalidYear(file_name.to_string()))
}

/// Rewrites month abbreviations into `YYYY-MM` periods of a fixed year.
pub struct MonthPeriodTransformator {
    column_name: String,
    year: u16,
}

impl MonthPeriodTransformator {
    pub fn new(column_name: impl Into<String>, year: u16) -> Self {
        Self {
            column_name: column_name.into(),
            year,
        }
    }

    /// Takes the year from the source file name.
    pub fn for_file(column_name: impl Into<String>, file_name: &str) -> Result<Self, TransformError> {
        Ok(Self::new(column_name, year_from_file_name(file_name)?))
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    fn period(&self, month: Option<&str>) -> Result<String, TransformError> {
        month
            .and_then(month_number)
            .map(|number| format!("{:04}-{number:02}", self.year))
            .ok_or_else(|| TransformError::InvalidMonth {
                column: self.column_name.clone(),
                value: month.unwrap_or("null").to_string(),
            })
    }
}

impl Transformator for MonthPeriodTransformator {
    fn transform(&self, input: &DataFrame) -> Result<Vec<TransformatorOutput>, TransformError> {
        let column = input
            .column(&self.column_name)
            .map_err(|_| TransformError::MissingColumn(self.column_name.clone()))?;

        if column.dtype() != &DataType::String {
            return Err(TransformError::UnexpectedType {
                column: self.column_name.clone(),
                dtype: column.dtype().to_string(),
            });
        }

        let periods = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|month| self.period(month))
            .collect::<Result<Vec<String>, TransformError>>()?;

        Ok(vec![TransformatorOutput {
            column_name: self.column_name.clone(),
            series: Series::new(self.column_name.as_str().into(), periods),
        }])
    }

    fn transformator_type(&self) -> TransformatorType {
        TransformatorType::ReplaceColumn {
            column_name: self.column_name.clone(),
        }
    }
}
