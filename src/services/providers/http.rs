/// HTTP transport for the recommendation backend
///
/// POSTs `{"prompt": ...}` as JSON to the configured endpoint and hands back
/// the status and body untouched.
use crate::{
    config::Config,
    error::AppResult,
    models::PromptRequest,
    services::providers::{RawResponse, Transport},
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct HttpTransport {
    http_client: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds a transport from configuration, applying the optional timeout
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            endpoint: config.recommendations_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PromptRequest) -> AppResult<RawResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(
            endpoint = %self.endpoint,
            status = status,
            bytes = body.len(),
            transport = self.name(),
            "Received backend response"
        );

        Ok(RawResponse::new(status, body.to_vec()))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
