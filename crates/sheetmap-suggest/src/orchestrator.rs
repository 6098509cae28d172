//! Produces candidate mappings for a session.
//!
//! Two strategies behind one interface: local heuristic scoring, or
//! delegation to the remote matcher with a transparent fallback to local
//! scoring. Callers never observe a remote failure on the suggestion path.

use tracing::{debug, warn};

use sheetmap_map::suggest_all;
use sheetmap_model::{Session, Suggestion};

use crate::error::{Result, SuggestError};
use crate::remote::{FeedbackItem, MatcherClient, RemoteSuggestion, ValidatedMapping};

/// Where suggestions come from.
pub enum SuggestionStrategy {
    /// Score fields against columns with the local matcher.
    Local,
    /// Ask the remote matcher, keyed by the upload identifier from a prior
    /// `upload` call. Falls back to local scoring on any failure.
    Remote {
        client: MatcherClient,
        data_id: Option<String>,
    },
}

pub struct SuggestionOrchestrator {
    strategy: SuggestionStrategy,
}

impl SuggestionOrchestrator {
    pub fn local() -> Self {
        Self {
            strategy: SuggestionStrategy::Local,
        }
    }

    pub fn remote(client: MatcherClient, data_id: Option<String>) -> Self {
        Self {
            strategy: SuggestionStrategy::Remote { client, data_id },
        }
    }

    /// Candidate mappings for every schema field.
    ///
    /// The local strategy returns them in schema order; the remote strategy
    /// preserves the service's order. Either way the pending list is fully
    /// populated from exactly one source.
    pub fn suggest(&self, session: &Session) -> Vec<Suggestion> {
        match &self.strategy {
            SuggestionStrategy::Local => suggest_all(&session.schema, &session.columns),
            SuggestionStrategy::Remote { client, data_id } => {
                match remote_suggestions(client, data_id.as_deref(), session) {
                    Ok(suggestions) => suggestions,
                    Err(error) => {
                        warn!(%error, "remote matcher unavailable, falling back to local scoring");
                        suggest_all(&session.schema, &session.columns)
                    }
                }
            }
        }
    }

    /// Report accepted/rejected suggestions to the remote matcher.
    ///
    /// Best effort: failures are logged and never affect local state. A
    /// no-op for the local strategy or without an upload identifier.
    pub fn report_feedback(&self, items: &[FeedbackItem]) {
        let SuggestionStrategy::Remote {
            client,
            data_id: Some(data_id),
        } = &self.strategy
        else {
            return;
        };
        if items.is_empty() {
            return;
        }
        if let Err(error) = client.feedback(data_id, items) {
            warn!(%error, "failed to report suggestion feedback");
        }
    }

    /// Store the user's validated mapping with the remote matcher.
    ///
    /// Best effort, same rules as [`Self::report_feedback`].
    pub fn report_validated(&self, mappings: &[ValidatedMapping]) {
        let SuggestionStrategy::Remote {
            client,
            data_id: Some(data_id),
        } = &self.strategy
        else {
            return;
        };
        if mappings.is_empty() {
            return;
        }
        if let Err(error) = client.validate_mappings(data_id, mappings) {
            warn!(%error, "failed to store validated mappings");
        }
    }
}

fn remote_suggestions(
    client: &MatcherClient,
    data_id: Option<&str>,
    session: &Session,
) -> Result<Vec<Suggestion>> {
    let data_id = data_id.ok_or(SuggestError::MissingDataId)?;
    let remote = client.suggestions(data_id)?;
    Ok(join_suggestions(session, &remote))
}

/// Join remote suggestions back to session objects by name, discarding any
/// entry whose field or column no longer exists in the session.
fn join_suggestions(session: &Session, remote: &[RemoteSuggestion]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    for entry in remote {
        let Some(field) = session.schema.get(&entry.matched_schema_field) else {
            debug!(field = %entry.matched_schema_field, "discarding suggestion for unknown field");
            continue;
        };
        let Some(column) = session.columns.iter().find(|c| c.name == entry.column_name) else {
            debug!(column = %entry.column_name, "discarding suggestion for unknown column");
            continue;
        };
        suggestions.push(Suggestion {
            field: field.clone(),
            column: column.clone(),
            confidence: (entry.confidence_score.clamp(0.0, 1.0) * 100.0) as f32,
            reason: format!("Remote {} matcher", entry.matcher_type),
        });
    }
    suggestions
}
