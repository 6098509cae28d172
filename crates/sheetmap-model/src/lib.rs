pub mod binding;
pub mod column;
pub mod error;
pub mod export;
pub mod field;
pub mod session;

pub use binding::{Binding, Suggestion};
pub use column::{Record, SourceColumn};
pub use error::{ModelError, Result};
pub use export::{ExportError, ExportResult};
pub use field::{DataType, TargetField, TargetSchema};
pub use session::{Session, SessionStatus};
