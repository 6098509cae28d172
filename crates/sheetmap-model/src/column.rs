use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::DataType;

/// One raw source row, keyed by source column name.
pub type Record = BTreeMap<String, Value>;

/// A column of the uploaded spreadsheet.
///
/// Immutable once the source is parsed. `sample_values` is display/inference
/// material only and is never consulted during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceColumn {
    /// Header name, unique within a session.
    pub name: String,
    /// Stable ordinal position in the source.
    pub index: usize,
    pub inferred_type: DataType,
    pub sample_values: Vec<Value>,
}
