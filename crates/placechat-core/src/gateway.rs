//! Collaborator traits: the generative model gateway and the place-search
//! provider.
//!
//! Implementations live in `placechat-interaction`; the application layer
//! consumes them through `Arc<dyn …>` so sessions never share hidden client
//! state and tests can substitute mocks.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::business::BusinessRecord;
use crate::error::PlacechatError;

/// Default bound on a single model call. A call exceeding this is treated as
/// a failed turn and the fallback answers instead.
pub const MODEL_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Failures of the model gateway. All of these are recovered locally by the
/// intent resolver falling back to the rule engine; none reach the end user
/// as raw errors.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// No credential/configuration is available for the model.
    #[error("Model gateway is not configured: {0}")]
    Unavailable(String),

    /// The model did not respond within the bounded wait.
    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream call failed (transport error or non-success status).
    #[error("Model call failed (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

/// Wraps a single call to a generative text model.
///
/// One outbound network call per `generate`; no retries inside the gateway.
/// Retry policy belongs to the intent resolver, which falls back rather than
/// retrying and lets the next turn try the model again.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// The external place-search collaborator.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Runs a text search and returns matching businesses, best first.
    async fn search(&self, query: &str) -> Result<Vec<BusinessRecord>, PlacechatError>;
}
