pub mod client;
pub mod config;

pub use client::HttpRequester;
pub use config::{Config, LogSection, TransportSection};

// Re-export the request types for convenience
pub use requester_core::{
    AttachmentSet, BodyParams, Completion, ContentPolicy, Headers, Method, QueryParams, Request,
    RequestError, Upload,
};
