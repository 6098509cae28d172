use anyhow::Result;

use sheetmap_cli::pipeline::{
    ExportFormat, ExportOutcome, ExportRequest, RemoteOptions, export_dataset, load_schema,
    suggest_mappings,
};

use crate::cli::{ExportArgs, ExportFormatArg, FieldsArgs, SuggestArgs};
use crate::summary::{print_export_summary, print_fields, print_suggestions};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    print_fields(&schema);
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let remote = remote_options(args.remote_url.as_deref(), args.auth_token.as_deref());
    let report = suggest_mappings(&args.input, &args.schema, remote.as_ref())?;
    print_suggestions(&report);
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<ExportOutcome> {
    let request = ExportRequest {
        input: args.input.clone(),
        schema: args.schema.clone(),
        output: args.output.clone(),
        format: match args.format {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        },
        min_confidence: args.min_confidence,
        force: args.force,
        remote: remote_options(args.remote_url.as_deref(), args.auth_token.as_deref()),
    };
    let outcome = export_dataset(&request)?;
    print_export_summary(&outcome);
    Ok(outcome)
}

fn remote_options(remote_url: Option<&str>, auth_token: Option<&str>) -> Option<RemoteOptions> {
    remote_url.map(|base_url| RemoteOptions {
        base_url: base_url.to_string(),
        auth_token: auth_token.map(str::to_string),
    })
}
