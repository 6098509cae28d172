use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::{Binding, Suggestion};
use crate::column::{Record, SourceColumn};
use crate::field::TargetSchema;

/// Lifecycle of a session. Advances monotonically as the user acts and
/// never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Uploaded,
    Mapped,
    Previewed,
    Exported,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Uploaded => "uploaded",
            SessionStatus::Mapped => "mapped",
            SessionStatus::Previewed => "previewed",
            SessionStatus::Exported => "exported",
        }
    }

    /// Move to `next` only if it is further along than the current status.
    pub fn advance_to(&mut self, next: SessionStatus) {
        if next > *self {
            *self = next;
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The full working state for one uploaded dataset.
///
/// Source columns and rows are supplied once at creation and treated as
/// immutable for the life of the session; bindings and suggestions are the
/// only mutable parts.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub file_name: String,
    pub columns: Vec<SourceColumn>,
    pub rows: Vec<Record>,
    pub schema: TargetSchema,
    pub bindings: Vec<Binding>,
    pub suggestions: Vec<Suggestion>,
    pub status: SessionStatus,
}

impl Session {
    /// Create a fresh session with one unbound binding per schema field.
    pub fn new(
        id: String,
        file_name: String,
        columns: Vec<SourceColumn>,
        rows: Vec<Record>,
        schema: TargetSchema,
    ) -> Self {
        let bindings = schema
            .fields()
            .iter()
            .cloned()
            .map(Binding::unbound)
            .collect();
        Self {
            id,
            file_name,
            columns,
            rows,
            schema,
            bindings,
            suggestions: Vec::new(),
            status: SessionStatus::Uploaded,
        }
    }

    pub fn binding(&self, field_name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.field.name == field_name)
    }

    pub fn binding_mut(&mut self, field_name: &str) -> Option<&mut Binding> {
        self.bindings
            .iter_mut()
            .find(|b| b.field.name == field_name)
    }

    /// True if a source column of this name is bound to any field.
    pub fn is_column_mapped(&self, column_name: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.column.as_ref().is_some_and(|c| c.name == column_name))
    }
}
