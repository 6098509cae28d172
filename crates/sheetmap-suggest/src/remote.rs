//! HTTP client for the remote schema-matching service.
//!
//! The service is keyed by an opaque upload identifier: a spreadsheet is
//! uploaded once and suggestions, feedback, and validated mappings all
//! reference the returned `data_id`.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response, multipart};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SuggestError};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub data_id: String,
}

/// One suggestion as returned by the remote matcher.
///
/// `confidence_score` is on the service's `[0, 1]` scale; the orchestrator
/// rescales it to 0-100 when joining back to session objects.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSuggestion {
    pub column_name: String,
    pub matched_schema_field: String,
    pub matcher_type: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsResponse {
    pub data_id: String,
    pub suggestions: Vec<RemoteSuggestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackItem {
    pub column_name: String,
    pub matched_schema_field: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_field: Option<String>,
}

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    feedback: &'a [FeedbackItem],
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidatedMapping {
    pub column_name: String,
    pub mapped_field: String,
}

#[derive(Debug, Serialize)]
struct ValidationRequest<'a> {
    validated_mappings: &'a [ValidatedMapping],
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Blocking client for the remote matcher API.
pub struct MatcherClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl MatcherClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Upload a spreadsheet and return its opaque identifier.
    pub fn upload(&self, file: &Path) -> Result<String> {
        let form = multipart::Form::new().file("file", file)?;
        let request = self.client.post(self.url("/data/upload")).multipart(form);
        let response = check(self.authorized(request).send()?)?;
        let payload: UploadResponse = decode(response)?;
        debug!(data_id = %payload.data_id, "upload accepted by remote matcher");
        Ok(payload.data_id)
    }

    /// Fetch suggestions for an uploaded spreadsheet.
    pub fn suggestions(&self, data_id: &str) -> Result<Vec<RemoteSuggestion>> {
        let request = self
            .client
            .get(self.url(&format!("/data/{data_id}/suggestions")))
            .header(ACCEPT, "application/json");
        let response = check(self.authorized(request).send()?)?;
        let payload: SuggestionsResponse = decode(response)?;
        Ok(payload.suggestions)
    }

    /// Report which suggestions the user accepted or rejected.
    pub fn feedback(&self, data_id: &str, items: &[FeedbackItem]) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/data/{data_id}/feedback")))
            .json(&FeedbackRequest { feedback: items });
        check(self.authorized(request).send()?)?;
        Ok(())
    }

    /// Store the user's validated column-to-field mapping.
    pub fn validate_mappings(&self, data_id: &str, mappings: &[ValidatedMapping]) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/data/{data_id}/validate")))
            .json(&ValidationRequest {
                validated_mappings: mappings,
            });
        check(self.authorized(request).send()?)?;
        Ok(())
    }

    /// Service health probe.
    pub fn health(&self) -> Result<StatusResponse> {
        let response = check(self.client.get(self.url("/health")).send()?)?;
        decode(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(SuggestError::Api { status, message })
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .map_err(|err| SuggestError::Payload(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = MatcherClient::new("http://localhost:3000/api/match-ai/v1/").expect("client");
        assert_eq!(
            client.url("/data/upload"),
            "http://localhost:3000/api/match-ai/v1/data/upload"
        );
    }

    #[test]
    fn feedback_request_serializes_expected_shape() {
        let items = vec![FeedbackItem {
            column_name: "MAC Address".to_string(),
            matched_schema_field: "mac_address".to_string(),
            is_correct: true,
            correct_field: None,
        }];
        let json = serde_json::to_string(&FeedbackRequest { feedback: &items }).expect("json");
        assert_eq!(
            json,
            r#"{"feedback":[{"column_name":"MAC Address","matched_schema_field":"mac_address","is_correct":true}]}"#
        );
    }
}
