use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use colored::Colorize;
use polars::prelude::*;
use rustic_duration::beautify_duration;
use tracing::{debug, info};

use crate::error::ReadError;

/// Reads one sheet of a spreadsheet into a [`DataFrame`].
///
/// The first row of the sheet becomes the column names. Any format calamine
/// detects (xlsx, xlsm, xlsb, xls, ods) is accepted.
pub struct SheetExtractor {
    directory: PathBuf,
    file_name: String,
    sheet_name: String,
}

impl SheetExtractor {
    pub fn new(
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn extract(&self) -> Result<DataFrame, ReadError> {
        let path = self.source_path();
        if !path.is_file() {
            return Err(ReadError::FileNotFound(path));
        }

        let extract_start = Instant::now();
        let mut workbook = open_workbook_auto(&path).map_err(|source| ReadError::Workbook {
            path: path.clone(),
            source,
        })?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.contains(&self.sheet_name) {
            return Err(ReadError::SheetNotFound {
                sheet: self.sheet_name.clone(),
                path,
                available: sheet_names.join(", "),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(|source| ReadError::Workbook {
                path: path.clone(),
                source,
            })?;

        let (height, width) = range.get_size();
        debug!("Sheet {} size: {height} rows x {width} columns", self.sheet_name);

        let df = rows_to_dataframe(&self.sheet_name, range.rows())?;

        info!(
            "{} file data is successfully loaded to DataFrame from folder {} ({} rows). Time taken: {}",
            self.file_name.bold().green(),
            self.directory.display(),
            df.height(),
            beautify_duration(extract_start.elapsed()),
        );

        Ok(df)
    }
}

/// Builds a [`DataFrame`] from raw sheet rows, the first row being the header.
///
/// Fully blank rows after the header are skipped.
pub fn rows_to_dataframe<'a>(
    sheet_name: &str,
    rows: impl IntoIterator<Item = &'a [Data]>,
) -> Result<DataFrame, ReadError> {
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .filter(|header| !is_blank(header))
        .ok_or_else(|| ReadError::MissingHeader(sheet_name.to_string()))?;

    let column_names = column_names(header);
    let body: Vec<&[Data]> = rows.filter(|row| !is_blank(row)).collect();

    let columns = column_names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                .collect();
            build_column(name, &cells)
        })
        .collect::<PolarsResult<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(is_empty_cell)
}

fn is_empty_cell(cell: &Data) -> bool {
    matches!(cell, Data::Empty)
}

/// Header cells rendered as text. Blank cells become `Unnamed: {idx}` and
/// repeated names get a `.{n}` suffix so every column name is unique.
fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = match cell {
                Data::Empty => format!("Unnamed: {idx}"),
                other => other.to_string(),
            };

            match seen.get_mut(&name) {
                Some(count) => {
                    *count += 1;
                    let renamed = format!("{name}.{count}");
                    seen.insert(renamed.clone(), 0);
                    renamed
                }
                None => {
                    seen.insert(name.clone(), 0);
                    name
                }
            }
        })
        .collect()
}

/// Text written for date cells that end up in a text column.
const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, PartialEq)]
enum CellKind {
    Integer,
    Float,
    Boolean,
    Datetime,
    Text,
}

/// Whole numbers that fit an `i64` without saturating.
fn as_integer(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(value) => Some(*value),
        Data::Float(value)
            if value.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(value) =>
        {
            Some(*value as i64)
        }
        _ => None,
    }
}

/// Date cells, either Excel serial dates with a date format or ISO 8601
/// text as written by ods files. Durations are not dates.
fn as_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(value) if value.is_datetime() => value.as_datetime(),
        Data::DateTimeIso(value) => value.parse::<NaiveDateTime>().ok().or_else(|| {
            value
                .parse::<NaiveDate>()
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        }),
        _ => None,
    }
}

fn as_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            Some(value.clone())
        }
        Data::DateTime(value) if value.is_duration() => value
            .as_duration()
            .map(|duration| duration.to_string())
            .or_else(|| Some(cell.to_string())),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|datetime| datetime.format(ISO_DATETIME_FORMAT).to_string())
            .or_else(|| Some(cell.to_string())),
        other => Some(other.to_string()),
    }
}

fn infer_kind(cells: &[&Data]) -> CellKind {
    let filled: Vec<&Data> = cells
        .iter()
        .copied()
        .filter(|cell| !is_empty_cell(cell))
        .collect();

    if filled.is_empty() {
        return CellKind::Float;
    }

    if filled.iter().all(|cell| as_integer(cell).is_some()) {
        CellKind::Integer
    } else if filled
        .iter()
        .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)))
    {
        CellKind::Float
    } else if filled.iter().all(|cell| matches!(cell, Data::Bool(_))) {
        CellKind::Boolean
    } else if filled.iter().all(|cell| as_datetime(cell).is_some()) {
        CellKind::Datetime
    } else {
        CellKind::Text
    }
}

fn build_column(name: &str, cells: &[&Data]) -> PolarsResult<Column> {
    let series = match infer_kind(cells) {
        CellKind::Integer => {
            let values: Vec<Option<i64>> = cells.iter().map(|cell| as_integer(cell)).collect();
            Series::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(value) => Some(*value as f64),
                    Data::Float(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        CellKind::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        CellKind::Datetime => {
            let micros: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| as_datetime(cell).map(|datetime| datetime.and_utc().timestamp_micros()))
                .collect();
            Series::new(name.into(), micros)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| as_text(cell)).collect();
            Series::new(name.into(), values)
        }
    };

    Ok(series.into())
}
