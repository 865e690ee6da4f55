use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use tokio_postgres::types::ToSql;

/// Postgres caps a statement at 65535 bind parameters.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Cells of one DataFrame column, converted to types tokio-postgres can bind.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValues {
    BigInt(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlColumn {
    pub name: String,
    pub values: SqlValues,
}

impl SqlColumn {
    /// Integers widen to `BIGINT`, floats to `DOUBLE PRECISION`, datetimes
    /// map to `TIMESTAMP` and every other dtype is written as text.
    pub fn from_column(column: &Column) -> PolarsResult<Self> {
        let series = column.as_materialized_series();

        let values = match series.dtype() {
            dtype if dtype.is_integer() => {
                SqlValues::BigInt(series.cast(&DataType::Int64)?.i64()?.into_iter().collect())
            }
            dtype if dtype.is_float() => {
                SqlValues::Double(series.cast(&DataType::Float64)?.f64()?.into_iter().collect())
            }
            DataType::Boolean => SqlValues::Boolean(series.bool()?.into_iter().collect()),
            DataType::Datetime(time_unit, _) => {
                let time_unit = *time_unit;
                SqlValues::Timestamp(
                    series
                        .cast(&DataType::Int64)?
                        .i64()?
                        .into_iter()
                        .map(|value| value.and_then(|value| naive_from_epoch(value, time_unit)))
                        .collect(),
                )
            }
            _ => SqlValues::Text(
                series
                    .cast(&DataType::String)?
                    .str()?
                    .into_iter()
                    .map(|value| value.map(String::from))
                    .collect(),
            ),
        };

        Ok(Self {
            name: column.name().to_string(),
            values,
        })
    }

    pub fn sql_type(&self) -> &'static str {
        match self.values {
            SqlValues::BigInt(_) => "BIGINT",
            SqlValues::Double(_) => "DOUBLE PRECISION",
            SqlValues::Boolean(_) => "BOOLEAN",
            SqlValues::Text(_) => "TEXT",
            SqlValues::Timestamp(_) => "TIMESTAMP",
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            SqlValues::BigInt(values) => values.len(),
            SqlValues::Double(values) => values.len(),
            SqlValues::Boolean(values) => values.len(),
            SqlValues::Text(values) => values.len(),
            SqlValues::Timestamp(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bind parameter for the cell at `row`.
    pub fn param(&self, row: usize) -> &(dyn ToSql + Sync) {
        match &self.values {
            SqlValues::BigInt(values) => &values[row],
            SqlValues::Double(values) => &values[row],
            SqlValues::Boolean(values) => &values[row],
            SqlValues::Text(values) => &values[row],
            SqlValues::Timestamp(values) => &values[row],
        }
    }
}

fn naive_from_epoch(value: i64, time_unit: TimeUnit) -> Option<NaiveDateTime> {
    let datetime = match time_unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    };
    datetime.map(|datetime| datetime.naive_utc())
}

/// Double-quotes an identifier so mixed-case names such as `ModifiedDate`
/// survive as written.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

pub fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_identifier(table_name))
}

pub fn create_table_sql(table_name: &str, columns: &[SqlColumn]) -> String {
    let column_definitions = columns
        .iter()
        .map(|column| format!("{} {}", quote_identifier(&column.name), column.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE {} ({column_definitions})",
        quote_identifier(table_name)
    )
}

/// Multi-row insert with numbered placeholders for `row_count` rows.
pub fn insert_sql(table_name: &str, columns: &[SqlColumn], row_count: usize) -> String {
    let column_list = columns
        .iter()
        .map(|column| quote_identifier(&column.name))
        .collect::<Vec<_>>()
        .join(", ");

    let width = columns.len();
    let rows = (0..row_count)
        .map(|row| {
            let placeholders = (1..=width)
                .map(|idx| format!("${}", row * width + idx))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({placeholders})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({column_list}) VALUES {rows}",
        quote_identifier(table_name)
    )
}

/// How many rows fit in one insert statement.
pub fn rows_per_insert(column_count: usize) -> usize {
    (MAX_BIND_PARAMETERS / column_count.max(1)).max(1)
}
