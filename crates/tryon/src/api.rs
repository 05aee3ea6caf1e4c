//! REST client for the virtual try-on inference server.
//!
//! Wraps `POST /api/virtual-tryon` and `GET /health` using [`reqwest`].
//! The whole exchange (send, status check, body decode) runs under one
//! [`tokio::time::timeout`]; when it elapses the in-flight future is
//! dropped, which aborts the HTTP request.

use std::future::Future;
use std::time::Instant;

use crate::config::TryOnConfig;
use crate::error::TryOnError;
use crate::images;
use crate::messages::{HealthResponse, TryOnRequest, TryOnResponse};

/// HTTP client for a single try-on server.
#[derive(Debug, Clone)]
pub struct TryOnClient {
    client: reqwest::Client,
    config: TryOnConfig,
}

impl TryOnClient {
    /// Create a client with its own connection pool.
    ///
    /// Redirects are not followed, so an allowed image host cannot bounce a
    /// download to an address outside the allow-list.
    pub fn new(config: TryOnConfig) -> Result<Self, TryOnError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. The caller's
    /// redirect policy applies to image downloads.
    pub fn with_client(client: reqwest::Client, config: TryOnConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TryOnConfig {
        &self.config
    }

    /// Check whether the server reports itself healthy.
    pub async fn health_check(&self) -> Result<bool, TryOnError> {
        let exchange = async {
            let response = self
                .client
                .get(format!("{}/health", self.config.api_url))
                .send()
                .await?;
            Self::parse_response::<HealthResponse>(response).await
        };

        let health = self.with_timeout(exchange).await??;
        Ok(health.is_healthy())
    }

    /// Submit a try-on request and return the server's response.
    ///
    /// Non-2xx statuses become [`TryOnError::ApiError`]; an elapsed timeout
    /// becomes [`TryOnError::Timeout`].
    pub async fn try_generate(&self, request: &TryOnRequest) -> Result<TryOnResponse, TryOnError> {
        request.validate()?;

        let started = Instant::now();
        let exchange = async {
            let response = self
                .client
                .post(format!("{}/api/virtual-tryon", self.config.api_url))
                .json(request)
                .send()
                .await?;
            Self::parse_response::<TryOnResponse>(response).await
        };

        let parsed = self.with_timeout(exchange).await??;

        tracing::info!(
            success = parsed.success,
            mode = ?request.mode,
            garments = request.clothing_images.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Virtual try-on request completed",
        );
        Ok(parsed)
    }

    /// Submit a try-on request; never fails.
    ///
    /// Every error is folded into `{ success: false, error }`. When mock
    /// fallback is enabled and the server cannot be reached, a mock result
    /// echoing the user image is returned instead.
    pub async fn generate(&self, request: &TryOnRequest) -> TryOnResponse {
        match self.try_generate(request).await {
            Ok(response) => response,
            Err(e) if self.config.mock_fallback && e.is_unreachable() => {
                tracing::warn!(
                    error = %e,
                    api_url = %self.config.api_url,
                    "Try-on server unreachable, returning mock result",
                );
                Self::mock_response(request)
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(error = %e, "Virtual try-on timed out");
                } else {
                    tracing::error!(error = %e, "Virtual try-on failed");
                }
                TryOnResponse::failure(e.to_string())
            }
        }
    }

    /// Convert image URLs to base64 payloads, skipping unsupported,
    /// disallowed and oversized ones.
    pub async fn prepare_images(&self, urls: &[String]) -> Vec<String> {
        images::prepare_images(&self.client, urls, &self.config).await
    }

    /// Placeholder result used when the server is offline.
    pub fn mock_response(request: &TryOnRequest) -> TryOnResponse {
        TryOnResponse {
            success: true,
            result_image: Some(request.user_image.clone()),
            error: None,
            processing_time: Some(0.0),
        }
    }

    // ---- private helpers ----

    async fn with_timeout<F: Future>(&self, fut: F) -> Result<F::Output, TryOnError> {
        tokio::time::timeout(self.config.timeout, fut)
            .await
            .map_err(|_| TryOnError::Timeout {
                timeout_ms: self.config.timeout.as_millis(),
            })
    }

    /// Ensure the response has a success status code, or return an
    /// [`TryOnError::ApiError`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TryOnError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TryOnError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TryOnError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
