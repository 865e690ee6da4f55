use std::iter;

use bon::Builder;
use polars::prelude::*;

use crate::error::TransformError;

/// Wide to long reshape (melt).
///
/// Every column listed in `on` is folded into two columns: `variable_name`
/// holds the original column name and `value_name` the cell. The remaining
/// columns are index columns and keep their input order.
///
/// Output rows are grouped by value column, in the order of `on`, and keep
/// the input row order inside each group.
///
/// Built column by column instead of through polars' `unpivot` so the folded
/// value column gets the dtype chosen by `value_dtype` (shared dtype, mixed
/// numbers as `Float64`, anything else `String`) rather than polars' supertype.
#[derive(Builder, Debug, Clone)]
pub struct Unpivot {
    on: Vec<String>,
    #[builder(into)]
    variable_name: String,
    #[builder(into)]
    value_name: String,
}

impl Unpivot {
    /// Columns of `df` that are kept as they are.
    pub fn index_columns(&self, df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .filter(|name| !self.on.iter().any(|on| on.as_str() == name.as_str()))
            .map(|name| name.to_string())
            .collect()
    }

    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame, TransformError> {
        if self.on.is_empty() {
            return Err(TransformError::NoValueColumns);
        }
        if let Some(missing) = self
            .on
            .iter()
            .find(|name| df.get_column_index(name.as_str()).is_none())
        {
            return Err(TransformError::MissingColumn(missing.clone()));
        }

        let index_columns = self.index_columns(df);
        if self.variable_name == self.value_name {
            return Err(TransformError::DuplicateColumn(self.value_name.clone()));
        }
        if let Some(clash) = [&self.variable_name, &self.value_name]
            .into_iter()
            .find(|name| index_columns.contains(*name))
        {
            return Err(TransformError::DuplicateColumn(clash.clone()));
        }

        let height = df.height();
        let mut columns: Vec<Column> = Vec::with_capacity(index_columns.len() + 2);

        for name in &index_columns {
            let series = df.column(name)?.as_materialized_series();
            let mut repeated = series.clone();
            for _ in 1..self.on.len() {
                repeated.append(series)?;
            }
            columns.push(repeated.into());
        }

        let variables: Vec<&str> = self
            .on
            .iter()
            .flat_map(|name| iter::repeat_n(name.as_str(), height))
            .collect();
        columns.push(Series::new(self.variable_name.as_str().into(), variables).into());

        let value_dtype = self.value_dtype(df)?;
        let mut values = Series::new_empty(self.value_name.as_str().into(), &value_dtype);
        for name in &self.on {
            let series = df.column(name)?.as_materialized_series().cast(&value_dtype)?;
            values.append(&series)?;
        }
        columns.push(values.into());

        Ok(DataFrame::new(columns)?)
    }

    /// One dtype for all folded cells: shared dtypes are kept, mixed
    /// integer/float columns become `Float64`, anything else `String`.
    fn value_dtype(&self, df: &DataFrame) -> Result<DataType, TransformError> {
        let dtypes = self
            .on
            .iter()
            .map(|name| -> Result<DataType, TransformError> {
                Ok(df.column(name)?.dtype().clone())
            })
            .collect::<Result<Vec<DataType>, TransformError>>()?;

        let first = &dtypes[0];
        let dtype = if dtypes.iter().all(|dtype| dtype == first) {
            first.clone()
        } else if dtypes
            .iter()
            .all(|dtype| dtype.is_integer() || dtype.is_float())
        {
            DataType::Float64
        } else {
            DataType::String
        };

        Ok(dtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn budget_df() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Jan".into(), &[100i64, 110]).into(),
            Series::new("Region".into(), &["North", "South"]).into(),
            Series::new("Feb".into(), &[200i64, 210]).into(),
            Series::new("Owner".into(), &["ann", "bob"]).into(),
        ])
        .unwrap()
    }

    fn month_unpivot(on: &[&str]) -> Unpivot {
        Unpivot::builder()
            .on(on.iter().map(|name| name.to_string()).collect())
            .variable_name("Month")
            .value_name("Budget")
            .build()
    }

    fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|value| value.map(String::from))
            .collect()
    }

    #[test]
    fn test_unpivot_groups_rows_by_value_column() {
        let long = month_unpivot(&["Jan", "Feb"]).apply(&budget_df()).unwrap();

        let names: Vec<String> = long
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Region", "Owner", "Month", "Budget"]);
        assert_eq!(long.height(), 4);
        assert_eq!(
            strings(&long, "Region"),
            vec![
                Some("North".to_string()),
                Some("South".to_string()),
                Some("North".to_string()),
                Some("South".to_string())
            ]
        );
        assert_eq!(
            strings(&long, "Month"),
            vec![
                Some("Jan".to_string()),
                Some("Jan".to_string()),
                Some("Feb".to_string()),
                Some("Feb".to_string())
            ]
        );
        assert_eq!(long.column("Budget").unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            strings(&long, "Budget"),
            vec![
                Some("100".to_string()),
                Some("110".to_string()),
                Some("200".to_string()),
                Some("210".to_string())
            ]
        );
    }

    #[test]
    fn test_unpivot_follows_configured_order() {
        let long = month_unpivot(&["Feb", "Jan"]).apply(&budget_df()).unwrap();

        assert_eq!(strings(&long, "Month")[0], Some("Feb".to_string()));
        assert_eq!(strings(&long, "Month")[2], Some("Jan".to_string()));
    }

    #[test]
    fn test_mixed_numeric_values_become_float() {
        let df = DataFrame::new(vec![
            Series::new("Jan".into(), &[1i64]).into(),
            Series::new("Feb".into(), &[2.5f64]).into(),
        ])
        .unwrap();

        let long = month_unpivot(&["Jan", "Feb"]).apply(&df).unwrap();

        assert_eq!(long.column("Budget").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_mixed_text_values_become_string() {
        let df = DataFrame::new(vec![
            Series::new("Jan".into(), &[1i64]).into(),
            Series::new("Feb".into(), &["n/a"]).into(),
        ])
        .unwrap();

        let long = month_unpivot(&["Jan", "Feb"]).apply(&df).unwrap();

        assert_eq!(
            strings(&long, "Budget"),
            vec![Some("1".to_string()), Some("n/a".to_string())]
        );
    }

    #[test]
    fn test_missing_value_column() {
        let error = month_unpivot(&["Jan", "Mar"])
            .apply(&budget_df())
            .unwrap_err();

        assert!(matches!(error, TransformError::MissingColumn(column) if column == "Mar"));
    }

    #[test]
    fn test_new_column_clashing_with_index_column() {
        let unpivot = Unpivot::builder()
            .on(vec!["Jan".to_string(), "Feb".to_string()])
            .variable_name("Region")
            .value_name("Budget")
            .build();

        let error = unpivot.apply(&budget_df()).unwrap_err();

        assert!(matches!(error, TransformError::DuplicateColumn(column) if column == "Region"));
    }

    #[test]
    fn test_empty_input_keeps_schema() {
        let df = budget_df().head(Some(0));

        let long = month_unpivot(&["Jan", "Feb"]).apply(&df).unwrap();

        assert_eq!(long.shape(), (0, 4));
    }
}
