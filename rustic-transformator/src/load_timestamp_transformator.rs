use chrono::NaiveDateTime;
use polars::prelude::*;

use crate::error::TransformError;
use crate::transformator::Transformator;
use crate::transformator_output::TransformatorOutput;
use crate::transformator_type::TransformatorType;

/// Name of the load timestamp column written to the target table.
pub const MODIFIED_DATE_COLUMN: &str = "ModifiedDate";

/// Appends a `Datetime[μs]` column holding the same instant on every row.
pub struct LoadTimestampTransformator {
    column_name: String,
    stamped_at: NaiveDateTime,
}

impl LoadTimestampTransformator {
    pub fn new(column_name: impl Into<String>, stamped_at: NaiveDateTime) -> Self {
        Self {
            column_name: column_name.into(),
            stamped_at,
        }
    }
}

impl Transformator for LoadTimestampTransformator {
    fn transform(&self, input: &DataFrame) -> Result<Vec<TransformatorOutput>, TransformError> {
        let micros = self.stamped_at.and_utc().timestamp_micros();
        let series = Series::new(self.column_name.as_str().into(), vec![micros; input.height()])
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

        Ok(vec![TransformatorOutput {
            column_name: self.column_name.clone(),
            series,
        }])
    }

    fn transformator_type(&self) -> TransformatorType {
        TransformatorType::AppendColumn {
            column_name: self.column_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_row_gets_the_same_stamp() {
        let stamped_at = NaiveDate::from_ymd_opt(2022, 3, 14)
            .unwrap()
            .and_hms_micro_opt(9, 26, 53, 589_793)
            .unwrap();
        let df = DataFrame::new(vec![Series::new("a".into(), &[1i64, 2, 3]).into()]).unwrap();

        let transformed = LoadTimestampTransformator::new(MODIFIED_DATE_COLUMN, stamped_at)
            .transform(&df)
            .unwrap();

        let series = &transformed[0].series;
        assert_eq!(
            series.dtype(),
            &DataType::Datetime(TimeUnit::Microseconds, None)
        );
        assert_eq!(
            series
                .cast(&DataType::Int64)
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .collect::<Vec<_>>(),
            vec![Some(stamped_at.and_utc().timestamp_micros()); 3]
        );
    }
}
