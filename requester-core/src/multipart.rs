// requester-core/src/multipart.rs
//! `multipart/form-data` body assembly.
//!
//! The layout is fixed: string parameters first, then one part per present
//! attachment, then the closing delimiter. Content bytes are written as-is;
//! nothing checks them against the boundary.

use crate::types::{AttachmentSet, BodyParams, ATTACHMENT_CONTENT_TYPE};
use tracing::warn;
use uuid::Uuid;

/// Fresh boundary token for one multipart request
pub fn generate_boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4())
}

/// Build the body bytes. Returns an empty body when there are no attachments.
pub fn build_body(
    boundary: &str,
    params: Option<&BodyParams>,
    field_name: &str,
    attachments: Option<&AttachmentSet>,
) -> Vec<u8> {
    let attachments = match attachments {
        Some(set) if !set.is_empty() => set,
        _ => return Vec::new(),
    };

    let mut out = Vec::new();

    if let Some(params) = params {
        for (key, value) in params {
            let Some(value) = value.as_str() else {
                warn!(key = %key, "skipping non-string multipart parameter");
                continue;
            };
            append_delimiter(&mut out, boundary);
            append_line(
                &mut out,
                &format!("Content-Disposition: form-data; name=\"{}\"", key),
            );
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
    }

    for (filename, blob) in attachments.present() {
        append_delimiter(&mut out, boundary);
        append_line(
            &mut out,
            &format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
                field_name, filename
            ),
        );
        append_line(&mut out, &format!("Content-Type: {}", ATTACHMENT_CONTENT_TYPE));
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(blob);
        out.extend_from_slice(b"\r\n");
    }

    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(b"--\r\n");
    out
}

fn append_delimiter(out: &mut Vec<u8>, boundary: &str) {
    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(b"\r\n");
}

fn append_line(out: &mut Vec<u8>, line: &str) {
    out.extend_from_slice(line.as_bytes());
    out.extend_from_slice(b"\r\n");
}
