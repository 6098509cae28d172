//! Serialization of exported records.
//!
//! Consumes `ExportResult::exported_data` together with the store's
//! canonical column order and writes CSV or JSON output files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use sheetmap_model::Record;

/// Write records as CSV, one column per `column_order` entry.
///
/// Cells missing from a record (or null) serialize as empty strings.
pub fn write_csv(path: &Path, records: &[Record], column_order: &[String]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    export_csv(file, records, column_order)
}

pub fn export_csv<W: Write>(writer: W, records: &[Record], column_order: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(column_order)
        .context("write csv header")?;
    for record in records {
        let row: Vec<String> = column_order
            .iter()
            .map(|name| cell_text(record.get(name)))
            .collect();
        writer.write_record(&row).context("write csv row")?;
    }
    writer.flush().context("flush csv output")?;
    Ok(())
}

/// Write records as pretty-printed JSON.
pub fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    export_json(file, records)
}

pub fn export_json<W: Write>(mut writer: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).context("write json output")?;
    writer.write_all(b"\n").context("write json output")?;
    Ok(())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(cells: &[(&str, Value)]) -> Record {
        cells
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn csv_follows_column_order() {
        let records = vec![record(&[
            ("mac_address", json!("00:11:22:33:44:55")),
            ("Location", json!("Hall B")),
            ("port_count", json!(24)),
        ])];
        let order = vec![
            "mac_address".to_string(),
            "port_count".to_string(),
            "Location".to_string(),
        ];

        let mut buffer = Vec::new();
        export_csv(&mut buffer, &records, &order).expect("export");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            "mac_address,port_count,Location\n00:11:22:33:44:55,24,Hall B\n"
        );
    }

    #[test]
    fn missing_and_null_cells_are_blank() {
        let records = vec![record(&[("a", json!(null))])];
        let order = vec!["a".to_string(), "b".to_string()];

        let mut buffer = Vec::new();
        export_csv(&mut buffer, &records, &order).expect("export");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "a,b\n,\n");
    }

    #[test]
    fn json_round_trips() {
        let records = vec![record(&[("managed", json!(true))])];
        let mut buffer = Vec::new();
        export_json(&mut buffer, &records).expect("export");
        let back: Vec<Record> = serde_json::from_slice(&buffer).expect("parse");
        assert_eq!(back, records);
    }
}
