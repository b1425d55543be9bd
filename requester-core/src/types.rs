// requester-core/src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Header name to header value. Keys keep the caller's casing.
pub type Headers = BTreeMap<String, String>;

/// Query parameter name to value, encoded pair by pair.
pub type QueryParams = BTreeMap<String, String>;

/// Body parameters. JSON requests serialize the whole map; multipart
/// requests only use the string values.
pub type BodyParams = serde_json::Map<String, serde_json::Value>;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "PATCH" => Ok(Method::Patch),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

/// Which body encoding and `Content-Type` a request uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    Json,
    Multipart,
    #[default]
    None,
}

impl ContentPolicy {
    /// Concrete MIME type for this policy. Multipart needs the boundary token.
    pub fn content_type(&self, boundary: &str) -> Option<String> {
        match self {
            ContentPolicy::Json => Some("application/json".to_string()),
            ContentPolicy::Multipart => Some(format!("multipart/form-data; boundary={}", boundary)),
            ContentPolicy::None => None,
        }
    }
}

impl FromStr for ContentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ContentPolicy::Json),
            "multipart" => Ok(ContentPolicy::Multipart),
            "none" => Ok(ContentPolicy::None),
            other => Err(format!("unknown content policy: {}", other)),
        }
    }
}

/// Blobs of a multipart upload with their optional names.
///
/// The two sequences are parallel: `names[i]` names `blobs[i]` when it is
/// present and in range. Every unnamed blob falls back to the same default
/// name, so several unnamed blobs end up sharing a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    pub blobs: Vec<Option<Vec<u8>>>,
    pub names: Vec<Option<String>>,
}

pub const DEFAULT_ATTACHMENT_NAME: &str = "image";
pub const ATTACHMENT_EXTENSION: &str = "jpeg";
pub const ATTACHMENT_CONTENT_TYPE: &str = "image/jpeg";

impl AttachmentSet {
    pub fn new(blobs: Vec<Option<Vec<u8>>>, names: Vec<Option<String>>) -> Self {
        Self { blobs, names }
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Filename sent for blob `index`
    pub fn resolved_name(&self, index: usize) -> String {
        let name = self
            .names
            .get(index)
            .and_then(|n| n.as_deref())
            .unwrap_or(DEFAULT_ATTACHMENT_NAME);
        format!("{}.{}", name, ATTACHMENT_EXTENSION)
    }

    /// Present blobs with their resolved filenames, in index order
    pub fn present(&self) -> impl Iterator<Item = (String, &[u8])> + '_ {
        self.blobs
            .iter()
            .enumerate()
            .filter_map(|(i, blob)| blob.as_deref().map(|b| (self.resolved_name(i), b)))
    }
}

/// What a completed call hands back: body bytes, status code, and whether the
/// transport failed. HTTP error statuses never set `is_error`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Completion {
    pub body: Vec<u8>,
    pub status: u16,
    pub is_error: bool,
}

impl Completion {
    pub fn into_parts(self) -> (Vec<u8>, u16, bool) {
        (self.body, self.status, self.is_error)
    }
}

/// The three shapes a dispatched call can end in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { body: Vec<u8>, status: u16 },
    EmptyBody { status: u16 },
    TransportError,
}

impl From<Outcome> for Completion {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success { body, status } => Completion {
                body,
                status,
                is_error: false,
            },
            Outcome::EmptyBody { status } => Completion {
                body: Vec::new(),
                status,
                is_error: false,
            },
            Outcome::TransportError => Completion {
                body: Vec::new(),
                status: 0,
                is_error: true,
            },
        }
    }
}
