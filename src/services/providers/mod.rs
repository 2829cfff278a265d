/// Transport abstraction for the recommendation backend
///
/// A transport performs exactly one request/response exchange and reports
/// only transport-level failures. Status interpretation and body parsing
/// belong to the client sitting on top of it.
use crate::{error::AppResult, models::PromptRequest};

pub mod http;

pub use http::HttpTransport;

/// Raw backend reply, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for recommendation transports
///
/// Failures to reach the backend or read its reply must be reported as
/// `AppError::Network`. Any status code, including errors, is a successful
/// exchange from the transport's point of view.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PromptRequest) -> AppResult<RawResponse>;

    /// Transport name for logging and debugging
    fn name(&self) -> &'static str;
}
