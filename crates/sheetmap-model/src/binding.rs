use serde::{Deserialize, Serialize};

use crate::column::SourceColumn;
use crate::field::TargetField;

/// The association between one target field and at most one source column.
///
/// A session holds exactly one binding per schema field at all times; only
/// the column slot (and the suggestion bookkeeping) ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub field: TargetField,
    pub column: Option<SourceColumn>,
    pub is_suggested: bool,
    pub confidence: Option<f32>,
}

impl Binding {
    pub fn unbound(field: TargetField) -> Self {
        Self {
            field,
            column: None,
            is_suggested: false,
            confidence: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.column.is_some()
    }
}

/// A proposed, not-yet-applied binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub field: TargetField,
    pub column: SourceColumn,
    /// Match strength on a 0-100 scale.
    pub confidence: f32,
    /// Human-readable rationale, purely descriptive.
    pub reason: String,
}
