// requester-cli/src/args.rs
use anyhow::{anyhow, Result};
use requester_client::{BodyParams, Headers, QueryParams};

/// `name:value`
pub fn parse_headers(raw: &[String]) -> Result<Headers> {
    raw.iter()
        .map(|h| {
            let (name, value) = h
                .split_once(':')
                .ok_or_else(|| anyhow!("header must look like 'name:value', got {:?}", h))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("header name is empty in {:?}", h));
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// `name=value`
pub fn parse_query(raw: &[String]) -> Result<QueryParams> {
    raw.iter()
        .map(|q| {
            let (name, value) = q.split_once('=').ok_or_else(|| {
                anyhow!("query parameter must look like 'name=value', got {:?}", q)
            })?;
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

/// `key=value`. Values that parse as JSON keep their type, anything else is a string.
pub fn parse_body(raw: &[String]) -> Result<Option<BodyParams>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut params = BodyParams::new();
    for field in raw {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("body field must look like 'key=value', got {:?}", field))?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(Some(params))
}

/// `key=value`. Every value stays a string, as multipart form fields are text.
pub fn parse_text_fields(raw: &[String]) -> Result<Option<BodyParams>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut params = BodyParams::new();
    for field in raw {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("form field must look like 'key=value', got {:?}", field))?;
        params.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }
    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_headers_trims_and_keeps_case() {
        let headers = parse_headers(&strings(&["X-Api-Key: secret", "Accept:text/html"])).unwrap();
        assert_eq!(headers.get("X-Api-Key").map(String::as_str), Some("secret"));
        assert_eq!(headers.get("Accept").map(String::as_str), Some("text/html"));
        assert!(parse_headers(&strings(&["missing-colon"])).is_err());
        assert!(parse_headers(&strings(&[": value"])).is_err());
    }

    #[test]
    fn test_parse_query_splits_on_first_equals() {
        let query = parse_query(&strings(&["expr=a=b", "empty="])).unwrap();
        assert_eq!(query.get("expr").map(String::as_str), Some("a=b"));
        assert_eq!(query.get("empty").map(String::as_str), Some(""));
        assert!(parse_query(&strings(&["novalue"])).is_err());
    }

    #[test]
    fn test_parse_body_keeps_json_types() {
        let raw = strings(&["n=3", "ok=true", "tags=[1,2]", "name=plain text", "nil=null"]);
        let body = parse_body(&raw).unwrap().unwrap();
        assert_eq!(
            serde_json::Value::Object(body),
            json!({"n": 3, "ok": true, "tags": [1, 2], "name": "plain text", "nil": null})
        );
        assert_eq!(parse_body(&[]).unwrap(), None);
    }

    #[test]
    fn test_parse_text_fields_keeps_strings() {
        let fields = parse_text_fields(&strings(&["count=3", "ok=true", "title=a=b"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::Value::Object(fields),
            json!({"count": "3", "ok": "true", "title": "a=b"})
        );
        assert_eq!(parse_text_fields(&[]).unwrap(), None);
        assert!(parse_text_fields(&strings(&["novalue"])).is_err());
    }
}
