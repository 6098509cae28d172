//! CSV ingestion.
//!
//! Produces the `(columns, rows)` pair consumed by session creation. The
//! only format constraints are unique column names and row keys matching
//! column names.

pub mod csv_source;

pub use csv_source::{CsvSource, read_csv, read_csv_file};
