//! Fuzzy field-to-column matching and mapping session state.

pub mod matcher;
pub mod score;
pub mod store;

pub use matcher::{best_match, match_score, suggest_all};
pub use score::similarity;
pub use store::{MappingStore, MappingValidation};
