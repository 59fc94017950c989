//! Transport seams for the two HTTP contracts, plus the reqwest-backed
//! implementations and the failure classification the controller renders.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use shared::domain::FieldId;
use shared::protocol::{FormSnapshot, GenerateResponse, ValidationReply};

/// Classified generation failure. The `Display` text is the exact
/// user-facing message for each class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Rate limit exceeded. Please wait before generating more keys.")]
    RateLimited,
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    /// The request never produced a usable response: connection failure,
    /// or a 2xx body that failed to parse (malformed responses fail
    /// closed). The detail string is logged, never shown.
    #[error("Network error. Please check your connection and try again.")]
    Network(String),
}

/// Best-effort per-field validation. Errors are swallowed by the caller.
#[async_trait]
pub trait ValidationTransport: Send + Sync {
    async fn validate(&self, field: FieldId, value: &str) -> Result<ValidationReply>;
}

/// Submits one captured form snapshot for generation.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate(&self, snapshot: &FormSnapshot) -> Result<GenerateResponse, GenerateError>;
}

#[derive(Serialize)]
struct ValidateFieldForm<'a> {
    field: &'a str,
    value: &'a str,
}

/// Form-encoded POST to `{base}/api/validate`.
pub struct HttpValidationTransport {
    http: Client,
    base_url: String,
}

impl HttpValidationTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ValidationTransport for HttpValidationTransport {
    async fn validate(&self, field: FieldId, value: &str) -> Result<ValidationReply> {
        let reply = self
            .http
            .post(format!("{}/api/validate", self.base_url))
            .form(&ValidateFieldForm {
                field: field.wire_name(),
                value,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<ValidationReply>()
            .await?;
        Ok(reply)
    }
}

/// JSON POST to `{base}/api/generate` with status classification.
pub struct HttpGenerationTransport {
    http: Client,
    base_url: String,
}

impl HttpGenerationTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GenerationTransport for HttpGenerationTransport {
    async fn generate(&self, snapshot: &FormSnapshot) -> Result<GenerateResponse, GenerateError> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(snapshot)
            .send()
            .await
            .map_err(|err| GenerateError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(GenerateError::RateLimited);
            }
            return Err(GenerateError::HttpStatus(status.as_u16()));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|err| GenerateError::Network(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classes_render_their_user_messages() {
        assert_eq!(
            GenerateError::RateLimited.to_string(),
            "Rate limit exceeded. Please wait before generating more keys."
        );
        assert_eq!(
            GenerateError::HttpStatus(503).to_string(),
            "HTTP error! status: 503"
        );
        assert_eq!(
            GenerateError::Network("connection refused".to_string()).to_string(),
            "Network error. Please check your connection and try again."
        );
    }
}
