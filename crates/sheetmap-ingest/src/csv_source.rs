use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use serde_json::Value;
use tracing::debug;

use sheetmap_model::{DataType, Record, SourceColumn};
use sheetmap_transform::parse_date;

/// Number of sample values captured per column.
const SAMPLE_LIMIT: usize = 5;

/// A parsed spreadsheet: column definitions plus the raw rows.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub file_name: String,
    pub columns: Vec<SourceColumn>,
    pub rows: Vec<Record>,
}

/// Read and parse a CSV file from disk.
pub fn read_csv_file(path: &Path) -> Result<CsvSource> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    read_csv(file, file_name)
}

/// Parse CSV content from any reader.
///
/// The first record is the header row. Rows with no value in any column are
/// dropped. Cell values stay strings; typing happens at export time, the
/// inferred column types only feed the matcher.
pub fn read_csv<R: Read>(reader: R, file_name: impl Into<String>) -> Result<CsvSource> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers().context("read csv headers")?.clone();
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for (index, raw) in headers.iter().enumerate() {
        let name = normalize_header(raw, index);
        if names.contains(&name) {
            bail!("duplicate column name: {name}");
        }
        names.push(name);
    }

    let mut cell_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.context("read csv row")?;
        let cells: Vec<String> = (0..names.len())
            .map(|i| record.get(i).unwrap_or("").trim().to_string())
            .collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        cell_rows.push(cells);
    }

    let columns: Vec<SourceColumn> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<&str> = cell_rows
                .iter()
                .map(|row| row[index].as_str())
                .filter(|v| !v.is_empty())
                .collect();
            SourceColumn {
                name: name.clone(),
                index,
                inferred_type: infer_type(&values),
                sample_values: values
                    .iter()
                    .take(SAMPLE_LIMIT)
                    .map(|v| Value::String((*v).to_string()))
                    .collect(),
            }
        })
        .collect();

    let rows: Vec<Record> = cell_rows
        .iter()
        .map(|cells| {
            names
                .iter()
                .enumerate()
                .map(|(index, name)| (name.clone(), Value::String(cells[index].clone())))
                .collect()
        })
        .collect();

    debug!(columns = columns.len(), rows = rows.len(), "csv parsed");
    Ok(CsvSource {
        file_name: file_name.into(),
        columns,
        rows,
    })
}

fn normalize_header(raw: &str, index: usize) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        format!("Column {}", index + 1)
    } else {
        trimmed.to_string()
    }
}

/// Infer a column type from its non-empty cells.
///
/// Precedence is number, then date, then boolean; anything mixed falls back
/// to string. An all-empty column is a string column.
fn infer_type(values: &[&str]) -> DataType {
    if values.is_empty() {
        return DataType::String;
    }
    if values
        .iter()
        .all(|v| v.parse::<f64>().is_ok_and(|n| n.is_finite()))
    {
        return DataType::Number;
    }
    if values.iter().all(|v| parse_date(v).is_some()) {
        return DataType::Date;
    }
    if values
        .iter()
        .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
    {
        return DataType::Boolean;
    }
    DataType::String
}
