use std::time::Instant;

use polars::prelude::*;
use rustic_duration::beautify_duration;
use tracing::debug;

use crate::error::TransformError;
use crate::transformator_output::TransformatorOutput;
use crate::transformator_type::TransformatorType;

/// A column level transformation over a DataFrame.
pub trait Transformator: Send + Sync {
    /// Computes the columns to write back into the input DataFrame.
    fn transform(&self, input: &DataFrame) -> Result<Vec<TransformatorOutput>, TransformError>;

    /// Returns the type of transformation.
    fn transformator_type(&self) -> TransformatorType;
}

/// Applies the transformators in order, each one seeing the output of the
/// previous one.
pub fn apply_transformators(
    mut df: DataFrame,
    transformators: &[Box<dyn Transformator>],
) -> Result<DataFrame, TransformError> {
    for transformator in transformators {
        let has_column = |column_name: &str| df.get_column_index(column_name).is_some();

        match transformator.transformator_type() {
            TransformatorType::ReplaceColumn { column_name } if !has_column(&column_name) => {
                return Err(TransformError::MissingColumn(column_name));
            }
            TransformatorType::AppendColumn { column_name } if has_column(&column_name) => {
                return Err(TransformError::DuplicateColumn(column_name));
            }
            _ => {}
        }

        for transformator_output in transformator.transform(&df)? {
            let start = Instant::now();
            let column_name = transformator_output.column_name.clone();

            df.with_column(transformator_output.into_series())?;

            debug!(
                "Column {column_name} written! Time taken: {}",
                beautify_duration(start.elapsed())
            );
        }
    }

    Ok(df)
}
