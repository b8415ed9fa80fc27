mod auth;
mod cli;
mod config;
mod drive;
mod error;
mod google;
mod sheets;

use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    // Logs on stderr; stdout carries command output only
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(cli::dispatch(std::env::args_os()).await);
}
