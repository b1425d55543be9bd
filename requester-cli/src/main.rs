mod args;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{RequestArgs, UploadArgs};
use output::{
    format_output, print_error, print_response, CompletionView, ErrorResponse, ExitCode,
    OutputFormat, Response,
};
use requester_client::{Completion, Config, HttpRequester, RequestError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "httpreq")]
#[command(about = "Send HTTP requests and multipart uploads", long_about = None)]
struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "auto")]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a request
    Request(RequestArgs),
    /// Upload files as multipart/form-data
    Upload(UploadArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(&config, cli.verbose);

    let requester = HttpRequester::from_config(&config)?;
    let result = match cli.command {
        Commands::Request(args) => {
            let request = args.into_request()?;
            debug!(method = %request.method, url = %request.url, "sending request");
            requester.execute(&request).await
        }
        Commands::Upload(args) => {
            let upload = args.into_upload().await?;
            debug!(url = %upload.url, files = upload.attachments.blobs.len(), "sending upload");
            requester.execute_upload(&upload).await
        }
    };

    let code = report(result, cli.output)?;
    std::process::exit(code.code());
}

fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

fn report(result: Result<Completion, RequestError>, format: OutputFormat) -> Result<ExitCode> {
    match result {
        Ok(completion) => {
            println!("{}", format_output(&CompletionView::from(&completion), format));
            Ok(ExitCode::for_completion(&completion))
        }
        Err(e) => {
            if format.is_human() {
                print_error(&e.to_string());
            } else {
                let resp = Response::<()>::error(ErrorResponse::validation_failed(e.to_string()));
                print_response(&resp)?;
            }
            Ok(ExitCode::InvalidRequest)
        }
    }
}
