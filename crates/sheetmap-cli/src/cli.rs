//! CLI argument definitions for sheetmap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sheetmap",
    version,
    about = "Map spreadsheet columns onto a target schema",
    long_about = "Map columns of an arbitrary CSV spreadsheet onto a fixed target schema.\n\n\
                  Proposes column mappings with similarity-based scoring (optionally via a\n\
                  remote matcher service), then re-emits the rows reshaped to the schema\n\
                  while collecting per-row, per-field validation errors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the target schema fields.
    Fields(FieldsArgs),

    /// Propose column mappings for a spreadsheet.
    Suggest(SuggestArgs),

    /// Map, convert, and export a spreadsheet.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Path to the target schema JSON file.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: PathBuf,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Input CSV file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Path to the target schema JSON file.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: PathBuf,

    /// Base URL of a remote matcher service (local scoring when omitted).
    #[arg(long = "remote-url", value_name = "URL")]
    pub remote_url: Option<String>,

    /// Bearer token for the remote matcher service.
    #[arg(long = "auth-token", value_name = "TOKEN")]
    pub auth_token: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Input CSV file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Path to the target schema JSON file.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: PathBuf,

    /// Output file (default: <FILE>_mapped.<format> next to the input).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Minimum confidence (0-100) for auto-accepting suggestions.
    #[arg(long = "min-confidence", value_name = "PCT", default_value_t = 50.0)]
    pub min_confidence: f32,

    /// Process rows even when required fields are unmapped.
    ///
    /// Affected rows still fail with "Required field is not mapped" in the
    /// error report.
    #[arg(long = "force")]
    pub force: bool,

    /// Base URL of a remote matcher service (local scoring when omitted).
    #[arg(long = "remote-url", value_name = "URL")]
    pub remote_url: Option<String>,

    /// Bearer token for the remote matcher service.
    #[arg(long = "auth-token", value_name = "TOKEN")]
    pub auth_token: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
