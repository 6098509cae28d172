//! Row-by-row conversion of source records into target-shaped records.
//!
//! Each pass walks the rows once, in order. Failures are row-local: a row
//! with any error is excluded from the exported data but still counted, and
//! processing always runs to completion. The result is recomputed from
//! scratch on every call.

use serde_json::Value;
use tracing::debug;

use sheetmap_model::{Binding, ExportError, ExportResult, Record, Session, SourceColumn};

use crate::convert::{convert_value, is_missing};

/// Convert raw rows against the session's current bindings.
///
/// Returns the zero-valued [`ExportResult`] when no session is active.
pub fn process_rows(session: Option<&Session>, rows: &[Record]) -> ExportResult {
    let Some(session) = session else {
        return ExportResult::empty();
    };

    let mapped: Vec<&Binding> = session.bindings.iter().filter(|b| b.is_bound()).collect();
    let unmapped_required: Vec<&Binding> = session
        .bindings
        .iter()
        .filter(|b| !b.is_bound() && b.field.required)
        .collect();
    let passthrough: Vec<&SourceColumn> = session
        .columns
        .iter()
        .filter(|c| !session.is_column_mapped(&c.name))
        .collect();

    let mut exported_data = Vec::new();
    let mut errors: Vec<ExportError> = Vec::new();
    let mut records_processed = 0usize;

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let mut output = Record::new();
        let mut failed = false;

        // Mapped fields first, in schema order.
        for binding in &mapped {
            let Some(column) = binding.column.as_ref() else {
                continue;
            };
            let value = row.get(&column.name).cloned().unwrap_or(Value::Null);

            if binding.field.required && is_missing(&value) {
                errors.push(ExportError {
                    row: row_number,
                    field: binding.field.display_name.clone(),
                    error: "Required field is empty".to_string(),
                    value: value.clone(),
                });
                failed = true;
            }

            match convert_value(&value, binding.field.data_type) {
                Ok(converted) => {
                    output.insert(binding.field.name.clone(), converted);
                }
                Err(error) => {
                    errors.push(ExportError {
                        row: row_number,
                        field: binding.field.display_name.clone(),
                        error: format!("Data type conversion failed: {error}"),
                        value,
                    });
                    failed = true;
                }
            }
        }

        // Unmapped required fields fail the row and never reach the output.
        for binding in &unmapped_required {
            errors.push(ExportError {
                row: row_number,
                field: binding.field.display_name.clone(),
                error: "Required field is not mapped".to_string(),
                value: Value::Null,
            });
            failed = true;
        }

        // Unmapped source columns pass through under their original name.
        // On a name collision the mapped field wins.
        for column in &passthrough {
            let value = row.get(&column.name).cloned().unwrap_or(Value::Null);
            output.entry(column.name.clone()).or_insert(value);
        }

        if !failed {
            exported_data.push(output);
        }
        records_processed += 1;
    }

    let errors_found = errors.len();
    let success_rate = if records_processed == 0 {
        0.0
    } else {
        (records_processed as f64 - errors_found as f64) / records_processed as f64 * 100.0
    };
    debug!(records_processed, errors_found, "row processing complete");

    ExportResult {
        records_processed,
        errors_found,
        success_rate,
        exported_data,
        errors,
    }
}
