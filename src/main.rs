//! CLI entry point for abc.

use std::process::ExitCode;

use abc::utils::display_size;
use abc::{DownloaderBuilder, Status};
use clap::Parser;
use tracing::debug;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG takes precedence over -v.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let summary = DownloaderBuilder::new().build().download(&request).await;
    match summary.status() {
        Status::Fail(_) => ExitCode::FAILURE,
        Status::Probed => {
            println!(
                "Content-Length = {}\nAccept-Ranges = {}",
                display_size(summary.total_size()),
                summary.accept_ranges()
            );
            ExitCode::SUCCESS
        }
        Status::Success | Status::AlreadyComplete => ExitCode::SUCCESS,
    }
}
