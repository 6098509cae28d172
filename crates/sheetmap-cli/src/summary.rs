use std::collections::BTreeSet;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use sheetmap_cli::pipeline::{ExportOutcome, SuggestReport};
use sheetmap_model::{ExportError, TargetSchema};

/// Cap on individual error rows shown in the export summary.
const ERROR_DISPLAY_LIMIT: usize = 20;

pub fn print_fields(schema: &TargetSchema) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for field in schema.fields() {
        table.add_row(vec![
            Cell::new(&field.name).fg(Color::Blue),
            Cell::new(&field.display_name),
            Cell::new(field.data_type),
            required_cell(field.required),
            Cell::new(field.description.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
}

pub fn print_suggestions(report: &SuggestReport) {
    if report.suggestions.is_empty() {
        println!("No mapping suggestions cleared the confidence threshold.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Field"),
            header_cell("Column"),
            header_cell("Confidence"),
            header_cell("Reason"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for suggestion in &report.suggestions {
            table.add_row(vec![
                Cell::new(&suggestion.field.name).fg(Color::Blue),
                Cell::new(&suggestion.column.name),
                confidence_cell(suggestion.confidence),
                Cell::new(&suggestion.reason),
            ]);
        }
        println!("{table}");
    }

    let suggested: BTreeSet<&str> = report
        .suggestions
        .iter()
        .map(|s| s.column.name.as_str())
        .collect();
    let unsuggested: Vec<&str> = report
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| !suggested.contains(name))
        .collect();
    if !unsuggested.is_empty() {
        println!("Columns without a suggestion: {}", unsuggested.join(", "));
    }
}

pub fn print_export_summary(outcome: &ExportOutcome) {
    if !outcome.validation_errors.is_empty() {
        eprintln!("Mapping validation failed:");
        for error in &outcome.validation_errors {
            eprintln!("- {error}");
        }
        eprintln!("Re-run with --force to export anyway (affected rows will fail).");
        return;
    }

    let Some(result) = &outcome.result else {
        return;
    };

    println!("Accepted mappings: {}", outcome.accepted.len());
    if !outcome.unmapped_columns.is_empty() {
        println!(
            "Unmapped source columns (passed through): {}",
            outcome.unmapped_columns.join(", ")
        );
    }
    if let Some(path) = &outcome.output_path {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Exported"),
        header_cell("Errors"),
        header_cell("Success rate"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.records_processed),
        Cell::new(result.exported_data.len()),
        count_cell(result.errors_found, Color::Red),
        Cell::new(format!("{:.1}%", result.success_rate)),
    ]);
    println!("{table}");

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        print_error_table(&result.errors);
    }
}

fn print_error_table(errors: &[ExportError]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Error"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in errors.iter().take(ERROR_DISPLAY_LIMIT) {
        table.add_row(vec![
            Cell::new(error.row),
            Cell::new(&error.field),
            Cell::new(&error.error).fg(Color::Red),
            value_cell(&error.value),
        ]);
    }
    println!("{table}");
    if errors.len() > ERROR_DISPLAY_LIMIT {
        println!("... and {} more errors", errors.len() - ERROR_DISPLAY_LIMIT);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        dim_cell("no")
    }
}

fn confidence_cell(confidence: f32) -> Cell {
    let text = format!("{confidence:.0}%");
    if confidence >= 80.0 {
        Cell::new(text).fg(Color::Green)
    } else if confidence >= 60.0 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => dim_cell("null"),
        Value::String(s) if s.is_empty() => dim_cell("\"\""),
        Value::String(s) => Cell::new(s),
        other => Cell::new(other.to_string()),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
