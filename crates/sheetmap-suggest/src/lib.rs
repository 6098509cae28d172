//! Suggestion orchestration: local scoring and the remote matcher client.

pub mod error;
pub mod orchestrator;
pub mod remote;

pub use error::{Result, SuggestError};
pub use orchestrator::{SuggestionOrchestrator, SuggestionStrategy};
pub use remote::{
    FeedbackItem, MatcherClient, RemoteSuggestion, StatusResponse, SuggestionsResponse,
    UploadResponse, ValidatedMapping,
};
