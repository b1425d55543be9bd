// requester-core/src/lib.rs
pub mod client;
pub mod context;
pub mod error;
pub mod http;
pub mod multipart;
pub mod query;
pub mod request;
pub mod types;

pub use client::{dispatch, Requester};
pub use context::{MainContext, MainLoop};
pub use error::RequestError;
pub use http::{HttpTransport, TransportError, TransportResponse};
pub use request::{PreparedRequest, Request, Upload};
pub use types::{
    AttachmentSet, BodyParams, Completion, ContentPolicy, Headers, Method, Outcome, QueryParams,
};

// Re-export reqwest transport when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::{ReqwestTransport, TransportConfig};
