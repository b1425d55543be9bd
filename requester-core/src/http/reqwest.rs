// requester-core/src/http/reqwest.rs
use super::{HttpTransport, TransportError, TransportResponse};
use crate::request::PreparedRequest;
use crate::types::Method;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeouts fixed for the life of a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Longest wait for the next chunk of data
    pub request_timeout: Duration,
    /// Longest a whole request may take
    pub resource_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            resource_timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(feature = "reqwest")]
pub struct ReqwestTransport {
    inner: reqwest::Client,
    config: TransportConfig,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .read_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Patch => reqwest::Method::PATCH,
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<TransportResponse, TransportError> {
        let mut req = self
            .inner
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(|e| {
            debug!(error = %e, "request failed before a response arrived");
            TransportError::new(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?
            .to_vec();

        Ok(TransportResponse {
            status: Some(status),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts_are_twenty_seconds() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.resource_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_methods_map_to_reqwest() {
        assert_eq!(to_reqwest_method(Method::Head), reqwest::Method::HEAD);
        assert_eq!(to_reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_transport_keeps_its_config() {
        let config = TransportConfig {
            request_timeout: Duration::from_secs(5),
            resource_timeout: Duration::from_secs(30),
        };
        let transport = ReqwestTransport::new(config).unwrap();
        assert_eq!(transport.config(), &config);
    }
}
