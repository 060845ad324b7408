//! REST client for the compositing endpoint, using [`reqwest`].

use std::time::Duration;

use crate::config::CompositorConfig;
use crate::request::{decode_image, CompositeRequest, CompositeResponse};

/// HTTP client for one compositing endpoint.
#[derive(Debug, Clone)]
pub struct CompositorApi {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Errors from the compositing API layer.
#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Compositing API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// A 2xx response whose `processedImage` is absent or decodes to nothing.
    #[error("Compositing response did not include a processed image")]
    MissingResult,

    #[error("Processed image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Compositor configuration error: {0}")]
    Config(String),
}

impl CompositorApi {
    /// Create a client with the configured request timeout.
    pub fn new(config: &CompositorConfig) -> Result<Self, CompositorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &CompositorConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Send one composite request and return the decoded result bytes.
    pub async fn composite(&self, request: &CompositeRequest) -> Result<Vec<u8>, CompositorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: CompositeResponse = response.json().await?;
        let encoded = body.processed_image.ok_or(CompositorError::MissingResult)?;
        let bytes = decode_image(&encoded)?;
        if bytes.is_empty() {
            return Err(CompositorError::MissingResult);
        }
        Ok(bytes)
    }

    /// Return the response unchanged on success, or an
    /// [`CompositorError::ApiError`] carrying status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CompositorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CompositorError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
