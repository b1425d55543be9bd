// requester-client/src/client.rs
use crate::config::Config;
use anyhow::Result;
use requester_core::{
    Completion, MainContext, Request, RequestError, Requester, ReqwestTransport, TransportConfig,
    Upload,
};
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

static SHARED: OnceLock<HttpRequester> = OnceLock::new();

/// Worker pool the transport calls run on. Shut down without blocking so a
/// requester can be dropped from inside async code.
struct Workers(Option<Runtime>);

impl Drop for Workers {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

/// A reqwest-backed requester with its own worker pool and completion thread.
/// Callers can use it from any thread, async or not.
pub struct HttpRequester {
    inner: Requester<ReqwestTransport>,
    _workers: Workers,
}

impl HttpRequester {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_transport_config(config.transport_config())
    }

    pub fn with_transport_config(transport_config: TransportConfig) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .thread_name("requester-worker")
            .enable_all()
            .build()?;
        let transport = ReqwestTransport::new(transport_config)?;
        let context = MainContext::spawn()?;
        let inner = Requester::new(transport, context, runtime.handle().clone());

        debug!(
            request_timeout = ?transport_config.request_timeout,
            resource_timeout = ?transport_config.resource_timeout,
            "requester ready"
        );

        Ok(Self {
            inner,
            _workers: Workers(Some(runtime)),
        })
    }

    /// Process-wide instance with default settings, built on first use
    pub fn shared() -> Result<&'static HttpRequester> {
        if let Some(requester) = SHARED.get() {
            return Ok(requester);
        }
        let requester = Self::from_config(&Config::default())?;
        Ok(SHARED.get_or_init(|| requester))
    }

    pub fn transport_config(&self) -> &TransportConfig {
        self.inner.transport().config()
    }

    pub fn send<F>(&self, request: &Request, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        self.inner.send(request, on_complete)
    }

    pub fn upload_multipart<F>(&self, upload: &Upload, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        self.inner.upload_multipart(upload, on_complete)
    }

    pub async fn execute(&self, request: &Request) -> Result<Completion, RequestError> {
        self.inner.execute(request).await
    }

    pub async fn execute_upload(&self, upload: &Upload) -> Result<Completion, RequestError> {
        self.inner.execute_upload(upload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_config_uses_configured_timeouts() {
        let config = Config::from_toml_str(
            "[transport]\nrequest_timeout_secs = 3\nresource_timeout_secs = 9\n",
        )
        .unwrap();
        let requester = HttpRequester::from_config(&config).unwrap();
        assert_eq!(requester.transport_config().request_timeout, Duration::from_secs(3));
        assert_eq!(requester.transport_config().resource_timeout, Duration::from_secs(9));
    }

    #[test]
    fn test_shared_is_built_once() {
        let first = HttpRequester::shared().unwrap();
        let second = HttpRequester::shared().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.transport_config(), &TransportConfig::default());
    }
}
