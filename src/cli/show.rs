use crate::config::Paths;
use crate::error::Result;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show token cache and client secret paths
    Paths,
}

impl ShowResource {
    pub fn execute(&self, paths: &Paths) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(paths),
        }
    }
}

fn show_paths(paths: &Paths) -> Result<()> {
    info!(path = ?paths.base_dir(), "Config directory");
    info!(path = ?paths.token_file(), "Token cache path");
    info!(path = ?paths.client_secret_file(), "Client secret path");

    Ok(())
}
