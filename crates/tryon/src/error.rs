/// Errors from the virtual try-on client.
#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request was aborted after the client-side timeout elapsed.
    #[error("Request timeout: virtual try-on took longer than {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u128,
    },

    /// The try-on server returned a non-2xx status code.
    #[error("Flask API error: {status} {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request was rejected before being sent.
    #[error("Invalid try-on request: {0}")]
    InvalidRequest(String),

    /// An image URL was refused or its download exceeded the size cap.
    #[error("Image rejected: {0}")]
    ImageRejected(String),

    /// Client configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TryOnError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TryOnError::Timeout { .. })
    }

    /// True when the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, TryOnError::Request(e) if e.is_connect())
    }
}
