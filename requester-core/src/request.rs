// requester-core/src/request.rs
use crate::error::RequestError;
use crate::multipart;
use crate::query::append_query;
use crate::types::{AttachmentSet, BodyParams, ContentPolicy, Headers, Method, QueryParams};
use url::Url;

/// A general-purpose request as the caller describes it
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub content: ContentPolicy,
    pub headers: Headers,
    pub body_params: Option<BodyParams>,
    pub query_params: QueryParams,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            content: ContentPolicy::None,
            headers: Headers::new(),
            body_params: None,
            query_params: QueryParams::new(),
        }
    }

    pub fn content(mut self, policy: ContentPolicy) -> Self {
        self.content = policy;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn body_params(mut self, params: BodyParams) -> Self {
        self.body_params = Some(params);
        self
    }

    pub fn body_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.body_params
            .get_or_insert_with(BodyParams::new)
            .insert(key.into(), value.into());
        self
    }

    /// Assemble with a freshly generated boundary
    pub fn prepare(&self) -> Result<PreparedRequest, RequestError> {
        self.prepare_with_boundary(&multipart::generate_boundary())
    }

    pub fn prepare_with_boundary(&self, boundary: &str) -> Result<PreparedRequest, RequestError> {
        assemble(
            self.method,
            &self.url,
            self.content,
            &self.headers,
            self.body_params.as_ref(),
            &self.query_params,
            boundary,
            "",
            None,
        )
    }
}

/// A multipart upload. Always sent with `ContentPolicy::Multipart`.
#[derive(Debug, Clone)]
pub struct Upload {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body_params: Option<BodyParams>,
    pub query_params: QueryParams,
    /// Form field name shared by every attachment
    pub field_name: String,
    pub attachments: AttachmentSet,
}

impl Upload {
    pub fn new(url: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Headers::new(),
            body_params: None,
            query_params: QueryParams::new(),
            field_name: field_name.into(),
            attachments: AttachmentSet::default(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn body_params(mut self, params: BodyParams) -> Self {
        self.body_params = Some(params);
        self
    }

    pub fn body_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.body_params
            .get_or_insert_with(BodyParams::new)
            .insert(key.into(), value.into());
        self
    }

    /// Push one blob with its name, keeping both sequences aligned
    pub fn attachment(mut self, blob: Option<Vec<u8>>, name: Option<String>) -> Self {
        let index = self.attachments.blobs.len();
        self.attachments.blobs.push(blob);
        if self.attachments.names.len() <= index {
            self.attachments.names.resize(index, None);
            self.attachments.names.push(name);
        } else {
            self.attachments.names[index] = name;
        }
        self
    }

    pub fn attachments(mut self, blobs: Vec<Option<Vec<u8>>>) -> Self {
        self.attachments.blobs = blobs;
        self
    }

    pub fn attachment_names(mut self, names: Vec<Option<String>>) -> Self {
        self.attachments.names = names;
        self
    }

    pub fn prepare(&self) -> Result<PreparedRequest, RequestError> {
        self.prepare_with_boundary(&multipart::generate_boundary())
    }

    pub fn prepare_with_boundary(&self, boundary: &str) -> Result<PreparedRequest, RequestError> {
        assemble(
            self.method,
            &self.url,
            ContentPolicy::Multipart,
            &self.headers,
            self.body_params.as_ref(),
            &self.query_params,
            boundary,
            &self.field_name,
            Some(&self.attachments),
        )
    }
}

/// A fully assembled request, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    method: Method,
    url: &str,
    content: ContentPolicy,
    headers: &Headers,
    body_params: Option<&BodyParams>,
    query_params: &QueryParams,
    boundary: &str,
    field_name: &str,
    attachments: Option<&AttachmentSet>,
) -> Result<PreparedRequest, RequestError> {
    Url::parse(url).map_err(|e| RequestError::invalid_url(url, e))?;

    let full_url = append_query(url, query_params);
    if !query_params.is_empty() {
        Url::parse(&full_url).map_err(|e| RequestError::invalid_url(&full_url, e))?;
    }

    let content_type = content.content_type(boundary);
    let mut prepared_headers: Vec<(String, String)> = headers
        .iter()
        .filter(|(k, _)| content_type.is_none() || !k.eq_ignore_ascii_case("content-type"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if let Some(content_type) = content_type {
        prepared_headers.push(("Content-Type".to_string(), content_type));
    }

    let body = match content {
        ContentPolicy::Json => {
            let empty = BodyParams::new();
            Some(serde_json::to_vec(body_params.unwrap_or(&empty))?)
        }
        ContentPolicy::Multipart => Some(multipart::build_body(
            boundary,
            body_params,
            field_name,
            attachments,
        )),
        ContentPolicy::None => None,
    };

    Ok(PreparedRequest {
        method,
        url: full_url,
        headers: prepared_headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_without_query_is_unchanged() {
        let prepared = Request::new(Method::Get, "https://example.com")
            .prepare()
            .unwrap();
        assert_eq!(prepared.url, "https://example.com");
        assert!(prepared.body.is_none());
        assert!(prepared.headers.is_empty());
    }

    #[test]
    fn test_query_is_encoded_and_appended() {
        let prepared = Request::new(Method::Get, "https://example.com/search")
            .query("a", "1")
            .query("b", "2 c")
            .prepare()
            .unwrap();
        assert_eq!(prepared.url, "https://example.com/search?a=1&b=2%20c");
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let err = Request::new(Method::Get, "not a url").prepare().unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl { .. }));
    }

    #[test]
    fn test_json_body_round_trips() {
        let body = json!({
            "name": "x",
            "count": 3,
            "ratio": 0.5,
            "ok": true,
            "missing": null,
            "tags": ["a", "b"],
            "nested": {"k": "v"}
        });
        let prepared = Request::new(Method::Post, "https://example.com/items")
            .content(ContentPolicy::Json)
            .body_params(body.as_object().cloned().unwrap())
            .prepare()
            .unwrap();

        assert_eq!(prepared.header("content-type"), Some("application/json"));
        let parsed: serde_json::Value =
            serde_json::from_slice(prepared.body.as_ref().unwrap()).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn test_json_without_params_sends_empty_object() {
        let prepared = Request::new(Method::Put, "https://example.com/items/1")
            .content(ContentPolicy::Json)
            .prepare()
            .unwrap();
        assert_eq!(prepared.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_headers_kept_verbatim_and_content_type_wins() {
        let prepared = Request::new(Method::Post, "https://example.com")
            .content(ContentPolicy::Json)
            .header("X-Trace-Id", "abc")
            .header("content-type", "text/plain")
            .prepare()
            .unwrap();
        assert_eq!(
            prepared.headers,
            vec![
                ("X-Trace-Id".to_string(), "abc".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn test_policy_none_keeps_caller_content_type() {
        let prepared = Request::new(Method::Post, "https://example.com")
            .header("Content-Type", "text/plain")
            .prepare()
            .unwrap();
        assert_eq!(prepared.header("Content-Type"), Some("text/plain"));
        assert!(prepared.body.is_none());
    }

    #[test]
    fn test_upload_forces_multipart() {
        let prepared = Upload::new("https://example.com/upload", "file")
            .body_param("name", "x")
            .attachment(Some(b"blob".to_vec()), Some("photo".to_string()))
            .prepare_with_boundary("Boundary-fixed")
            .unwrap();

        assert_eq!(prepared.method, Method::Post);
        assert_eq!(
            prepared.header("Content-Type"),
            Some("multipart/form-data; boundary=Boundary-fixed")
        );
        let body = prepared.body.unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"name\""));
        assert!(text.contains("name=\"file\"; filename=\"photo.jpeg\""));
        assert!(text.ends_with("--Boundary-fixed--\r\n"));
    }

    #[test]
    fn test_multipart_request_without_attachments_has_empty_body() {
        let prepared = Request::new(Method::Post, "https://example.com")
            .content(ContentPolicy::Multipart)
            .body_param("name", "x")
            .prepare_with_boundary("B")
            .unwrap();
        assert_eq!(prepared.body.as_deref(), Some(&b""[..]));
    }

    #[test]
    fn test_assembly_is_idempotent_for_fixed_boundary() {
        let upload = Upload::new("https://example.com/upload", "file")
            .method(Method::Put)
            .query("album", "summer 2019")
            .body_param("caption", "beach")
            .attachments(vec![Some(vec![1, 2, 3]), Some(vec![4])])
            .attachment_names(vec![Some("one".to_string())]);

        let first = upload.prepare_with_boundary("Boundary-x").unwrap();
        let second = upload.prepare_with_boundary("Boundary-x").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.url, "https://example.com/upload?album=summer%202019");
    }

    #[test]
    fn test_attachment_keeps_names_aligned() {
        let upload = Upload::new("https://example.com", "f")
            .attachments(vec![Some(vec![1])])
            .attachment(Some(vec![2]), Some("second".to_string()));
        assert_eq!(upload.attachments.resolved_name(0), "image.jpeg");
        assert_eq!(upload.attachments.resolved_name(1), "second.jpeg");
    }
}
