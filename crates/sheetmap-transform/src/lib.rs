//! Row conversion and validation.

pub mod convert;
pub mod process;

pub use convert::{ConvertError, convert_value, is_missing, parse_date};
pub use process::process_rows;
