use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Envelope, PromptRequest},
    services::providers::{RawResponse, Transport},
};

/// Longest server message kept from a plain-text error body
const MAX_SERVER_MESSAGE_CHARS: usize = 200;

/// Body keys checked, in order, for a server-supplied error message
const SERVER_MESSAGE_KEYS: &[&str] = &["detail", "error", "message"];

/// Fetches mood-based recommendations
///
/// One call is one backend exchange: no retry, and either a fully parsed
/// envelope or an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationClient: Send + Sync {
    async fn fetch(&self, prompt: &str) -> AppResult<Envelope>;

    /// Client name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Recommendation client backed by an injected [`Transport`]
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn Transport>,
}

impl BackendClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Turns a raw reply into an envelope or a typed error
    fn interpret(response: RawResponse) -> AppResult<Envelope> {
        if !response.is_success() {
            return Err(AppError::Server {
                status: response.status,
                message: server_message(&response.body),
            });
        }

        Envelope::from_slice(&response.body)
    }
}

#[async_trait::async_trait]
impl RecommendationClient for BackendClient {
    async fn fetch(&self, prompt: &str) -> AppResult<Envelope> {
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidInput("Prompt cannot be empty".to_string()));
        }

        let response = self.transport.send(&PromptRequest::new(prompt)).await?;
        let status = response.status;
        let envelope = Self::interpret(response)?;

        tracing::info!(
            status = status,
            results = envelope.len(),
            transport = self.transport.name(),
            "Recommendations fetched"
        );

        Ok(envelope)
    }

    fn name(&self) -> &'static str {
        "backend"
    }
}

/// Extracts a human-readable message from an error body
///
/// JSON objects are searched for a string under one of the known keys and a
/// bare JSON string is used as-is; non-JSON bodies are used as text.
fn server_message(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => SERVER_MESSAGE_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .and_then(clip_message),
        Ok(Value::String(text)) => clip_message(&text),
        _ => clip_message(&String::from_utf8_lossy(body)),
    }
}

fn clip_message(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(MAX_SERVER_MESSAGE_CHARS).collect())
    }
}
