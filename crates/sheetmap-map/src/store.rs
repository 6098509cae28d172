//! Mapping session state management.
//!
//! The store owns the single active [`Session`] and is the only mutation
//! path for its bindings. Every operation degrades gracefully when no
//! session is active: mutations are ignored, queries return empty values,
//! and [`MappingStore::validate`] reports the condition as data.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use sheetmap_model::{Record, Session, SessionStatus, SourceColumn, Suggestion, TargetSchema};

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session-{n:04}")
}

/// Outcome of validating the current bindings against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Holds the session's field-to-column bindings.
///
/// One logical caller owns the store at a time; mutations on a session are
/// not atomic and must be serialized externally if ported to a concurrent
/// environment.
#[derive(Debug)]
pub struct MappingStore {
    schema: TargetSchema,
    session: Option<Session>,
}

impl MappingStore {
    pub fn new(schema: TargetSchema) -> Self {
        Self {
            schema,
            session: None,
        }
    }

    pub fn schema(&self) -> &TargetSchema {
        &self.schema
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Start a fresh session for an uploaded dataset, replacing any prior
    /// session. Every schema field starts unbound.
    pub fn create_session(
        &mut self,
        file_name: impl Into<String>,
        columns: Vec<SourceColumn>,
        rows: Vec<Record>,
    ) -> &Session {
        let file_name = file_name.into();
        let session = Session::new(
            next_session_id(),
            file_name,
            columns,
            rows,
            self.schema.clone(),
        );
        debug!(
            session_id = %session.id,
            columns = session.columns.len(),
            rows = session.rows.len(),
            "session created"
        );
        self.session.insert(session)
    }

    /// Bind a field to a column (or unbind it with `None`).
    ///
    /// Clears any suggestion bookkeeping on the binding and advances the
    /// session to `mapped`. Ignored when no session is active.
    pub fn set_binding(&mut self, field_name: &str, column: Option<SourceColumn>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(binding) = session.binding_mut(field_name) else {
            warn!(field = %field_name, "set_binding for unknown field ignored");
            return;
        };
        binding.column = column;
        binding.is_suggested = false;
        binding.confidence = None;
        session.status.advance_to(SessionStatus::Mapped);
    }

    /// Apply a suggestion: bind its field to its column, keeping the
    /// suggestion provenance and confidence, and drop it from the pending
    /// list.
    pub fn accept_suggestion(&mut self, suggestion: &Suggestion) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(binding) = session.binding_mut(&suggestion.field.name) else {
            warn!(field = %suggestion.field.name, "suggestion for unknown field ignored");
            return;
        };
        binding.column = Some(suggestion.column.clone());
        binding.is_suggested = true;
        binding.confidence = Some(suggestion.confidence);
        session.status.advance_to(SessionStatus::Mapped);
        session
            .suggestions
            .retain(|s| s.field.name != suggestion.field.name);
    }

    /// Drop a pending suggestion without touching the binding.
    pub fn reject_suggestion(&mut self, field_name: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.suggestions.retain(|s| s.field.name != field_name);
    }

    /// Replace the session's pending suggestion list.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.suggestions = suggestions;
    }

    pub fn clear_binding(&mut self, field_name: &str) {
        self.set_binding(field_name, None);
    }

    /// Unbind every field. The session itself stays active.
    pub fn clear_all_bindings(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for binding in &mut session.bindings {
            binding.column = None;
            binding.is_suggested = false;
            binding.confidence = None;
        }
    }

    /// Check that every required field has a bound column.
    pub fn validate(&self) -> MappingValidation {
        let Some(session) = self.session.as_ref() else {
            return MappingValidation {
                is_valid: false,
                errors: vec!["No active session".to_string()],
            };
        };
        let errors: Vec<String> = session
            .bindings
            .iter()
            .filter(|b| b.field.required && b.column.is_none())
            .map(|b| {
                format!(
                    "Required field \"{}\" is not mapped",
                    b.field.display_name
                )
            })
            .collect();
        MappingValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Canonical output column order: mapped target fields in schema order,
    /// followed by unmapped source columns in source order.
    pub fn column_order(&self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut order: Vec<String> = session
            .bindings
            .iter()
            .filter(|b| b.is_bound())
            .map(|b| b.field.name.clone())
            .collect();
        order.extend(
            session
                .columns
                .iter()
                .filter(|c| !session.is_column_mapped(&c.name))
                .map(|c| c.name.clone()),
        );
        order
    }

    /// Names of source columns bound to no field, in source order.
    pub fn unmapped_source_columns(&self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        session
            .columns
            .iter()
            .filter(|c| !session.is_column_mapped(&c.name))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Externally triggered transition: the user moved on to the preview.
    pub fn mark_previewed(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.status.advance_to(SessionStatus::Previewed);
        }
    }

    /// Externally triggered transition: an export pass ran.
    pub fn mark_exported(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.status.advance_to(SessionStatus::Exported);
        }
    }

    /// Drop the active session entirely.
    pub fn clear_session(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use sheetmap_model::{DataType, TargetField};

    use super::*;

    fn schema() -> TargetSchema {
        TargetSchema::new(vec![
            TargetField {
                name: "mac_address".to_string(),
                display_name: "MAC address".to_string(),
                data_type: DataType::String,
                required: true,
                description: None,
            },
            TargetField {
                name: "name".to_string(),
                display_name: "Configured asset name".to_string(),
                data_type: DataType::String,
                required: false,
                description: None,
            },
        ])
        .expect("schema")
    }

    fn column(name: &str, index: usize) -> SourceColumn {
        SourceColumn {
            name: name.to_string(),
            index,
            inferred_type: DataType::String,
            sample_values: Vec::new(),
        }
    }

    #[test]
    fn session_ids_are_unique() {
        let mut store = MappingStore::new(schema());
        let first = store
            .create_session("a.csv", vec![column("MAC", 0)], Vec::new())
            .id
            .clone();
        let second = store
            .create_session("b.csv", vec![column("MAC", 0)], Vec::new())
            .id
            .clone();
        assert_ne!(first, second);
    }

    #[test]
    fn mutations_without_session_are_ignored() {
        let mut store = MappingStore::new(schema());
        store.set_binding("mac_address", Some(column("MAC", 0)));
        store.clear_all_bindings();
        store.mark_previewed();
        assert!(store.session().is_none());
        assert!(store.column_order().is_empty());
        assert!(store.unmapped_source_columns().is_empty());
    }

    #[test]
    fn validate_without_session_reports_condition() {
        let store = MappingStore::new(schema());
        let validation = store.validate();
        assert!(!validation.is_valid);
        assert_eq!(validation.errors, vec!["No active session".to_string()]);
    }
}
