//! Field-to-column matching.
//!
//! For a target field the matcher scans all source columns and proposes the
//! single best candidate above a confidence threshold, combining name
//! similarity with type compatibility.

use sheetmap_model::{SourceColumn, Suggestion, TargetField, TargetSchema};

use crate::score::similarity;

/// Weight of the name-similarity component.
const NAME_WEIGHT: f64 = 0.6;
/// Weight of the type-compatibility component.
const TYPE_WEIGHT: f64 = 0.4;
/// Minimum combined score for a column to be proposed.
const MIN_SCORE: f64 = 0.5;

/// Combined match score for one field/column pair, in `[0, 1]`.
///
/// Name similarity is taken against both the field key and its display
/// label, whichever matches the column header better.
pub fn match_score(field: &TargetField, column: &SourceColumn) -> f64 {
    let name_score = similarity(&field.name, &column.name)
        .max(similarity(&field.display_name, &column.name));
    let type_score = if field.data_type.accepts(column.inferred_type) {
        1.0
    } else {
        0.0
    };
    (NAME_WEIGHT * name_score + TYPE_WEIGHT * type_score).min(1.0)
}

/// Best candidate column for a field, or `None` when no column clears the
/// admission threshold.
///
/// The comparison is strict, so ties keep the first column in source order.
pub fn best_match(field: &TargetField, columns: &[SourceColumn]) -> Option<Suggestion> {
    let mut best: Option<(f64, &SourceColumn)> = None;
    for column in columns {
        let score = match_score(field, column);
        if score > MIN_SCORE && best.is_none_or(|(current, _)| score > current) {
            best = Some((score, column));
        }
    }
    best.map(|(score, column)| Suggestion {
        field: field.clone(),
        column: column.clone(),
        confidence: (score * 100.0) as f32,
        reason: match_reason(score).to_string(),
    })
}

/// Candidate mappings for every schema field, in schema order. Fields with
/// no admissible column are skipped.
pub fn suggest_all(schema: &TargetSchema, columns: &[SourceColumn]) -> Vec<Suggestion> {
    schema
        .fields()
        .iter()
        .filter_map(|field| best_match(field, columns))
        .collect()
}

fn match_reason(score: f64) -> &'static str {
    if score > 0.8 {
        "High similarity in column name and data type"
    } else if score > 0.6 {
        "Good match based on column name similarity"
    } else {
        "Moderate match based on data type compatibility"
    }
}
