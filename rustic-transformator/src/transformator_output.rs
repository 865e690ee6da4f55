use bon::Builder;
use polars::prelude::*;

#[derive(Builder)]
pub struct TransformatorOutput {
    #[builder(into)]
    pub column_name: String,
    pub series: Series,
}

impl TransformatorOutput {
    /// The series renamed to the target column.
    pub fn into_series(self) -> Series {
        self.series.with_name(self.column_name.into())
    }
}
