// requester-cli/src/commands/upload.rs
use crate::args::{parse_headers, parse_query, parse_text_fields};
use anyhow::{Context, Result};
use clap::Args;
use requester_client::{Method, Upload};

#[derive(Args, Clone, Debug)]
pub struct UploadArgs {
    /// Target URL
    pub url: String,
    /// Form field name shared by every file
    #[arg(long)]
    pub field: String,
    /// File to attach (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,
    /// Name for the file at the same position, without extension (repeatable)
    #[arg(long = "name")]
    pub names: Vec<String>,
    /// HTTP method
    #[arg(short, long, default_value = "POST")]
    pub method: Method,
    /// Header as 'name:value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Query parameter as 'name=value' (repeatable)
    #[arg(short, long = "query")]
    pub query: Vec<String>,
    /// Text form field as 'key=value' (repeatable)
    #[arg(short, long = "field-value")]
    pub fields: Vec<String>,
}

impl UploadArgs {
    pub async fn into_upload(self) -> Result<Upload> {
        let mut blobs = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading {}", path))?;
            blobs.push(Some(data));
        }

        let mut upload = Upload::new(self.url, self.field)
            .method(self.method)
            .headers(parse_headers(&self.headers)?)
            .query_params(parse_query(&self.query)?)
            .attachments(blobs)
            .attachment_names(self.names.into_iter().map(Some).collect());
        if let Some(body) = parse_text_fields(&self.fields)? {
            upload = upload.body_params(body);
        }
        Ok(upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_numeric_looking_fields_reach_the_form() {
        let path = std::env::temp_dir().join(format!("httpreq-upload-{}.bin", std::process::id()));
        std::fs::write(&path, b"PNGDATA").unwrap();

        let args = UploadArgs {
            url: "https://example.com/upload".to_string(),
            field: "photo".to_string(),
            files: vec![path.to_string_lossy().into_owned()],
            names: vec!["avatar".to_string()],
            method: Method::Post,
            headers: Vec::new(),
            query: Vec::new(),
            fields: vec!["count=3".to_string(), "title=hello".to_string()],
        };
        let upload = args.into_upload().await;
        std::fs::remove_file(&path).unwrap();

        let prepared = upload.unwrap().prepare_with_boundary("B").unwrap();
        let body = String::from_utf8_lossy(prepared.body.as_deref().unwrap()).into_owned();
        assert!(body.contains("name=\"count\"\r\n\r\n3\r\n"));
        assert!(body.contains("name=\"title\"\r\n\r\nhello\r\n"));
        assert!(body.contains("PNGDATA"));
    }
}
