// requester-core/src/error.rs
use thiserror::Error;

/// A request that could not be assembled and never reached the transport
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialize JSON body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RequestError {
    pub(crate) fn invalid_url(url: &str, source: url::ParseError) -> Self {
        RequestError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}
