//! Generative model capability.
//!
//! The proposer only needs "prompt in, text out". [`HttpModel`] speaks the
//! Workers AI REST shape (`{"prompt", "max_tokens"}` → `{"result": {"response"}}`)
//! and also accepts a bare `{"response"}` body from a proxy.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("MODEL/DISABLED: no generative model configured")]
    Disabled,
    #[error("MODEL/TIMEOUT: no response within {0:?}")]
    Timeout(Duration),
    #[error("MODEL/TRANSPORT: {0}")]
    Transport(String),
    #[error("MODEL/STATUS: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("MODEL/DECODE: {0}")]
    Decode(String),
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    /// One bounded attempt; callers never retry.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelError>;
}

/// Stand-in used when no model endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledModel;

#[async_trait]
impl GenerativeModel for DisabledModel {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ModelError> {
        Err(ModelError::Disabled)
    }
}

#[derive(Debug, Clone)]
pub struct HttpModelConfig {
    /// Full URL of the text-generation endpoint.
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Duration,
    /// Label for logs and proofs, e.g. "@cf/meta/llama-3.1-8b-instruct".
    pub model_name: String,
}

impl HttpModelConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: Duration::from_secs(20),
            model_name: "@cf/meta/llama-3.1-8b-instruct".to_string(),
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpModel {
    client: reqwest::Client,
    config: HttpModelConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

impl HttpModel {
    pub fn new(config: HttpModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GenerativeModel for HttpModel {
    fn name(&self) -> &str {
        &self.config.model_name
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelError> {
        let mut request = self
            .client
            .post(self.config.endpoint.as_str())
            .json(&GenerateRequest { prompt, max_tokens });
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout(self.config.timeout)
            } else {
                ModelError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        response_text(&body).ok_or_else(|| ModelError::Decode("no response text in body".to_string()))
    }
}

/// Generated text from either the REST envelope or a bare response body.
pub fn response_text(body: &Value) -> Option<String> {
    body.pointer("/result/response")
        .or_else(|| body.get("response"))
        .or_else(|| body.get("description"))
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_text_shapes() {
        assert_eq!(
            response_text(&json!({"result": {"response": "[1]"}, "success": true})).as_deref(),
            Some("[1]")
        );
        assert_eq!(response_text(&json!({"response": "hi"})).as_deref(), Some("hi"));
        assert_eq!(response_text(&json!({"result": {}})), None);
    }

    #[tokio::test]
    async fn test_disabled_model_always_fails() {
        let err = DisabledModel.generate("prompt", 10).await.unwrap_err();
        assert!(matches!(err, ModelError::Disabled));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let model = HttpModel::new(
            HttpModelConfig::new("http://127.0.0.1:9/generate").timeout(Duration::from_millis(500)),
        )
        .unwrap();
        let err = model.generate("prompt", 10).await.unwrap_err();
        assert!(matches!(err, ModelError::Transport(_) | ModelError::Timeout(_)));
    }
}
