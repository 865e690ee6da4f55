use std::time::Instant;

use bon::Builder;
use colored::Colorize;
use polars::prelude::*;
use rustic_duration::beautify_duration;
use tracing::info;

use crate::clock::Clock;
use crate::error::TransformError;
use crate::load_timestamp_transformator::{LoadTimestampTransformator, MODIFIED_DATE_COLUMN};
use crate::month_period_transformator::MonthPeriodTransformator;
use crate::transformator::{Transformator, apply_transformators};
use crate::unpivot::Unpivot;

/// Turns a wide monthly budget sheet into one row per entity and month.
///
/// The month columns are folded into `transform_column` / `transform_value`,
/// month abbreviations become `YYYY-MM` periods using the year at the end of
/// `source_file_name`, and every row is stamped with the same load time.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use rustic_transformator::clock::SystemClock;
/// use rustic_transformator::wide_to_long_transformation::WideToLongTransformation;
///
/// let df = DataFrame::new(vec![
///     Series::new("Region".into(), &["North"]).into(),
///     Series::new("Jan".into(), &[100i64]).into(),
///     Series::new("Feb".into(), &[200i64]).into(),
/// ])
/// .unwrap();
///
/// let transformation = WideToLongTransformation::builder()
///     .transform_columns(vec!["Jan".to_string(), "Feb".to_string()])
///     .transform_column("Month")
///     .transform_value("Budget")
///     .source_file_name("Budget-2022.xlsx")
///     .build();
///
/// let long = transformation.run(&df, &SystemClock).unwrap();
/// assert_eq!(long.shape(), (2, 4));
/// ```
#[derive(Builder, Debug, Clone)]
pub struct WideToLongTransformation {
    transform_columns: Vec<String>,
    #[builder(into)]
    transform_column: String,
    #[builder(into)]
    transform_value: String,
    #[builder(into)]
    source_file_name: String,
    #[builder(into, default = MODIFIED_DATE_COLUMN.to_string())]
    timestamp_column: String,
}

impl WideToLongTransformation {
    pub fn run(&self, input: &DataFrame, clock: &dyn Clock) -> Result<DataFrame, TransformError> {
        let start = Instant::now();

        let month_period =
            MonthPeriodTransformator::for_file(&self.transform_column, &self.source_file_name)?;

        let long = Unpivot::builder()
            .on(self.transform_columns.clone())
            .variable_name(&self.transform_column)
            .value_name(&self.transform_value)
            .build()
            .apply(input)?;

        let transformators: Vec<Box<dyn Transformator>> = vec![
            Box::new(month_period),
            Box::new(LoadTimestampTransformator::new(
                &self.timestamp_column,
                clock.now(),
            )),
        ];
        let df = apply_transformators(long, &transformators)?;

        info!(
            "{} file data is successfully transformed ({} rows). Time taken: {}",
            self.source_file_name.bold().green(),
            df.height(),
            beautify_duration(start.elapsed())
        );
        info!(
            "Columns {:?} successfully transformed to '{}'",
            self.transform_columns,
            self.transform_column.bold().blue()
        );

        Ok(df)
    }
}
