// requester-cli/src/output.rs
use requester_client::Completion;
use serde::Serialize;
use std::io::IsTerminal;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force JSON output
    Json,
    /// Force human-readable output
    Human,
}

impl OutputFormat {
    pub(crate) fn is_human(self) -> bool {
        match self {
            OutputFormat::Json => false,
            OutputFormat::Human => true,
            OutputFormat::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format as JSON string
    fn to_json(&self) -> String;

    /// Format as human-readable string
    fn to_human(&self) -> String;
}

/// Format output based on the specified format
pub fn format_output<T: Formattable>(data: &T, format: OutputFormat) -> String {
    if format.is_human() {
        data.to_human()
    } else {
        data.to_json()
    }
}

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    retryable: bool,
}

impl ErrorResponse {
    pub fn validation_failed(message: String) -> Self {
        Self {
            type_: "validation_failed",
            message,
            retryable: false,
        }
    }

    pub fn transport_failed(message: String) -> Self {
        Self {
            type_: "transport_error",
            message,
            retryable: true,
        }
    }
}

/// Completion as printed: the body is shown as lossy UTF-8
#[derive(Debug, Serialize)]
pub struct CompletionView {
    pub status: u16,
    pub error: bool,
    pub size: usize,
    pub body: String,
}

impl From<&Completion> for CompletionView {
    fn from(completion: &Completion) -> Self {
        Self {
            status: completion.status,
            error: completion.is_error,
            size: completion.body.len(),
            body: String::from_utf8_lossy(&completion.body).into_owned(),
        }
    }
}

impl Formattable for CompletionView {
    fn to_json(&self) -> String {
        let resp = if self.error {
            serde_json::to_string(&Response::<()>::error(ErrorResponse::transport_failed(
                "request did not reach the server".to_string(),
            )))
        } else {
            serde_json::to_string(&Response::ok(self))
        };
        resp.unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.error {
            return format!("{} request did not reach the server", console::style("Error:").red());
        }
        let status = if self.status >= 400 {
            console::style(self.status.to_string()).red()
        } else {
            console::style(self.status.to_string()).green()
        };
        format!(
            "{} {} ({} bytes)\n{}",
            console::style("Status:").bold(),
            status,
            self.size,
            self.body
        )
    }
}

/// Exit codes for scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    TransportError = 1,
    InvalidRequest = 2,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn for_completion(completion: &Completion) -> Self {
        if completion.is_error {
            ExitCode::TransportError
        } else {
            ExitCode::Success
        }
    }
}

// Print response to stdout
pub fn print_response<T: Serialize>(resp: &Response<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}
