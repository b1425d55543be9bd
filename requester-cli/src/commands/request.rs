// requester-cli/src/commands/request.rs
use crate::args::{parse_body, parse_headers, parse_query};
use anyhow::Result;
use clap::Args;
use requester_client::{ContentPolicy, Method, Request};

#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE, HEAD, PATCH)
    pub method: Method,
    /// Target URL
    pub url: String,
    /// Header as 'name:value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Query parameter as 'name=value' (repeatable)
    #[arg(short, long = "query")]
    pub query: Vec<String>,
    /// Body field as 'key=value'; JSON values keep their type (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
    /// Body encoding: json, multipart or none [default: json when fields are given]
    #[arg(short, long)]
    pub content: Option<ContentPolicy>,
}

impl RequestArgs {
    pub fn into_request(self) -> Result<Request> {
        let body = parse_body(&self.fields)?;
        let content = self.content.unwrap_or(if body.is_some() {
            ContentPolicy::Json
        } else {
            ContentPolicy::None
        });

        let mut request = Request::new(self.method, self.url)
            .content(content)
            .headers(parse_headers(&self.headers)?)
            .query_params(parse_query(&self.query)?);
        if let Some(body) = body {
            request = request.body_params(body);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(method: Method, fields: &[&str], content: Option<ContentPolicy>) -> RequestArgs {
        RequestArgs {
            method,
            url: "https://example.com/api".to_string(),
            headers: vec!["Accept: application/json".to_string()],
            query: vec!["page=2".to_string()],
            fields: fields.iter().map(|s| s.to_string()).collect(),
            content,
        }
    }

    #[test]
    fn test_fields_default_to_json() {
        let request = args(Method::Post, &["title=milk"], None).into_request().unwrap();
        assert_eq!(request.content, ContentPolicy::Json);
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(request.query_params.get("page").map(String::as_str), Some("2"));
        assert!(request.body_params.is_some());
    }

    #[test]
    fn test_no_fields_means_no_body() {
        let request = args(Method::Get, &[], None).into_request().unwrap();
        assert_eq!(request.content, ContentPolicy::None);
        assert!(request.body_params.is_none());
    }

    #[test]
    fn test_explicit_content_wins() {
        let request = args(Method::Post, &["a=1"], Some(ContentPolicy::None))
            .into_request()
            .unwrap();
        assert_eq!(request.content, ContentPolicy::None);
    }
}
