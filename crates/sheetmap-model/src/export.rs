use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::Record;

/// One per-row, per-field problem found while exporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportError {
    /// 1-based row number in the source data.
    pub row: usize,
    /// Display name of the affected target field.
    pub field: String,
    pub error: String,
    /// The offending raw value.
    pub value: Value,
}

/// Outcome of one full row-processing pass.
///
/// Recomputed from scratch on every pass; it carries no memory of prior
/// calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    pub records_processed: usize,
    pub errors_found: usize,
    /// Percentage of rows that survived, 0.0 for an empty input.
    pub success_rate: f64,
    pub exported_data: Vec<Record>,
    pub errors: Vec<ExportError>,
}

impl ExportResult {
    /// The zero-valued result returned when there is no active session.
    pub fn empty() -> Self {
        Self {
            records_processed: 0,
            errors_found: 0,
            success_rate: 0.0,
            exported_data: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors_found > 0
    }
}

impl Default for ExportResult {
    fn default() -> Self {
        Self::empty()
    }
}
