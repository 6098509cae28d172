//! End-to-end pipeline stages behind the CLI commands.
//!
//! Each stage wires the library crates together: ingest the spreadsheet,
//! create the mapping session, gather suggestions (local or remote), apply
//! them, process the rows, and write the output file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use sheetmap_ingest::read_csv_file;
use sheetmap_map::MappingStore;
use sheetmap_model::{ExportResult, SourceColumn, Suggestion, TargetSchema};
use sheetmap_report::{write_csv, write_json};
use sheetmap_suggest::{
    FeedbackItem, MatcherClient, SuggestionOrchestrator, ValidatedMapping,
};
use sheetmap_transform::process_rows;

/// Output file format for the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Remote matcher settings, when a service URL was provided.
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub base_url: String,
    pub auth_token: Option<String>,
}

/// Inputs for the export pipeline.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub input: PathBuf,
    pub schema: PathBuf,
    /// Output file (derived from the input path when absent).
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    /// Minimum confidence (0-100) for auto-accepting a suggestion.
    pub min_confidence: f32,
    /// Process rows even when required fields are unmapped.
    pub force: bool,
    pub remote: Option<RemoteOptions>,
}

/// What the export pipeline produced.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Written output file; `None` when validation blocked the export.
    pub output_path: Option<PathBuf>,
    /// Processing result; `None` when validation blocked the export.
    pub result: Option<ExportResult>,
    /// Mapping validation errors that blocked the export.
    pub validation_errors: Vec<String>,
    /// Suggestions that were auto-accepted.
    pub accepted: Vec<Suggestion>,
    /// Source columns that ended up bound to no field.
    pub unmapped_columns: Vec<String>,
    pub has_errors: bool,
}

/// Suggestions for one spreadsheet, plus the parsed columns for display.
#[derive(Debug)]
pub struct SuggestReport {
    pub suggestions: Vec<Suggestion>,
    pub columns: Vec<SourceColumn>,
}

/// Ingest a spreadsheet and propose a mapping for every schema field.
pub fn suggest_mappings(
    input: &Path,
    schema_path: &Path,
    remote: Option<&RemoteOptions>,
) -> Result<SuggestReport> {
    let schema = load_schema(schema_path)?;
    let source = read_csv_file(input)?;
    let columns = source.columns.clone();

    let mut store = MappingStore::new(schema);
    store.create_session(source.file_name, source.columns, source.rows);

    let orchestrator = build_orchestrator(remote, input)?;
    let session = store.session().context("session was just created")?;
    let suggestions = orchestrator.suggest(session);
    info!(
        suggestions = suggestions.len(),
        columns = columns.len(),
        "suggestion pass complete"
    );

    Ok(SuggestReport {
        suggestions,
        columns,
    })
}

/// Run the full export pipeline for one spreadsheet.
///
/// Suggestions at or above `min_confidence` are accepted automatically;
/// everything else is rejected. Unless `force` is set, the export refuses
/// to process rows while required fields are unbound.
pub fn export_dataset(request: &ExportRequest) -> Result<ExportOutcome> {
    let schema = load_schema(&request.schema)?;
    let source = read_csv_file(&request.input)?;

    let mut store = MappingStore::new(schema);
    store.create_session(source.file_name, source.columns, source.rows);

    let orchestrator = build_orchestrator(request.remote.as_ref(), &request.input)?;
    let session = store.session().context("session was just created")?;
    let suggestions = orchestrator.suggest(session);
    store.set_suggestions(suggestions.clone());

    let mut accepted = Vec::new();
    let mut feedback = Vec::new();
    for suggestion in &suggestions {
        let take = suggestion.confidence >= request.min_confidence;
        if take {
            store.accept_suggestion(suggestion);
            accepted.push(suggestion.clone());
        } else {
            store.reject_suggestion(&suggestion.field.name);
        }
        feedback.push(FeedbackItem {
            column_name: suggestion.column.name.clone(),
            matched_schema_field: suggestion.field.name.clone(),
            is_correct: take,
            correct_field: None,
        });
    }
    orchestrator.report_feedback(&feedback);

    let validation = store.validate();
    if !validation.is_valid && !request.force {
        return Ok(ExportOutcome {
            output_path: None,
            result: None,
            validation_errors: validation.errors,
            accepted,
            unmapped_columns: store.unmapped_source_columns(),
            has_errors: true,
        });
    }

    let validated: Vec<ValidatedMapping> = accepted
        .iter()
        .map(|s| ValidatedMapping {
            column_name: s.column.name.clone(),
            mapped_field: s.field.name.clone(),
        })
        .collect();
    orchestrator.report_validated(&validated);

    store.mark_previewed();
    let rows = store
        .session()
        .map(|s| s.rows.clone())
        .unwrap_or_default();
    let result = process_rows(store.session(), &rows);
    store.mark_exported();

    let column_order = store.column_order();
    let output_path = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input, request.format));
    match request.format {
        ExportFormat::Csv => write_csv(&output_path, &result.exported_data, &column_order)?,
        ExportFormat::Json => write_json(&output_path, &result.exported_data)?,
    }
    info!(
        output = %output_path.display(),
        records = result.exported_data.len(),
        errors = result.errors_found,
        "export written"
    );

    let has_errors = result.has_errors();
    Ok(ExportOutcome {
        output_path: Some(output_path),
        result: Some(result),
        validation_errors: Vec::new(),
        accepted,
        unmapped_columns: store.unmapped_source_columns(),
        has_errors,
    })
}

/// Load the target schema configuration file.
pub fn load_schema(path: &Path) -> Result<TargetSchema> {
    TargetSchema::from_json_file(path).with_context(|| format!("load schema {}", path.display()))
}

/// Pick the suggestion source.
///
/// With a remote URL the spreadsheet is uploaded first to obtain the
/// identifier the suggestion endpoint is keyed by; an upload failure leaves
/// the identifier empty and the orchestrator falls back to local scoring.
pub fn build_orchestrator(
    remote: Option<&RemoteOptions>,
    input: &Path,
) -> Result<SuggestionOrchestrator> {
    let Some(options) = remote else {
        return Ok(SuggestionOrchestrator::local());
    };
    let mut client =
        MatcherClient::new(options.base_url.clone()).context("build remote matcher client")?;
    if let Some(token) = &options.auth_token {
        client = client.with_auth_token(token.clone());
    }
    let data_id = match client.upload(input) {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(%error, "upload to remote matcher failed");
            None
        }
    };
    Ok(SuggestionOrchestrator::remote(client, data_id))
}

fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    input.with_file_name(format!("{stem}_mapped.{}", format.extension()))
}
