//! Virtual try-on client library.
//!
//! Typed request/response messages, image preparation, and an HTTP client
//! for the external try-on inference server. Every request is bounded by a
//! single client-side timeout and failures are never retried.

pub mod api;
pub mod config;
pub mod error;
pub mod images;
pub mod messages;

pub use api::TryOnClient;
pub use config::TryOnConfig;
pub use error::TryOnError;
pub use messages::{TryOnMode, TryOnRequest, TryOnResponse};
