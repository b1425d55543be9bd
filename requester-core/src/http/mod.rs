// requester-core/src/http/mod.rs
use crate::request::PreparedRequest;
use async_trait::async_trait;

/// Failure below the HTTP layer: timeout, DNS, refused or reset connection
#[derive(Debug, Clone, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What the transport got back. `status` is `None` when the response was not
/// an HTTP response the transport could read a status from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: Option<u16>,
    pub body: Vec<u8>,
}

/// Executes assembled requests - users can plug in their own transport
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<TransportResponse, TransportError>;
}

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::{ReqwestTransport, TransportConfig};
