mod drive;
mod read;
mod show;
mod tabs;
mod write;

use crate::auth::{Credential, CredentialManager};
use crate::config::{Paths, SPREADSHEET_ID};
use crate::drive::DriveClient;
use crate::error::Result;
use crate::sheets::SheetsClient;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, error};

pub use show::ShowResource;
pub use write::CellGrid;

#[derive(Parser, Debug)]
#[command(name = "gsheet")]
#[command(about = "Read and write a Google Sheets spreadsheet and browse Google Drive", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding token.json and client_secret.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let paths = Paths::resolve(self.config_dir.as_deref())?;
        self.command.execute(&paths).await
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all tabs
    Tabs,
    /// Read tab data (e.g. "master" or "master!A1:E5")
    Read {
        #[arg(default_value = "master")]
        tab: String,
        range: Option<String>,
    },
    /// Write a JSON array of rows into <tab>!<range>
    Write {
        tab: String,
        range: String,
        #[arg(value_parser = write::parse_cell_grid)]
        data: CellGrid,
    },
    /// List Drive folder contents, or all folders when no id is given
    Drive { folder_id: Option<String> },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

impl Commands {
    async fn execute(&self, paths: &Paths) -> Result<()> {
        let mut out = std::io::stdout();
        match self {
            Commands::Tabs => {
                let sheets = SheetsClient::new(&credential(paths).await?, SPREADSHEET_ID)?;
                tabs::execute(&sheets, &mut out).await
            }
            Commands::Read { tab, range } => {
                let sheets = SheetsClient::new(&credential(paths).await?, SPREADSHEET_ID)?;
                read::execute(&sheets, tab, range.as_deref(), &mut out).await
            }
            Commands::Write { tab, range, data } => {
                let sheets = SheetsClient::new(&credential(paths).await?, SPREADSHEET_ID)?;
                write::execute(&sheets, tab, range, data.clone(), &mut out).await
            }
            Commands::Drive { folder_id } => {
                let drive = DriveClient::new(&credential(paths).await?)?;
                drive::execute(&drive, folder_id.as_deref(), &mut out).await
            }
            Commands::Show { resource } => resource.execute(paths),
        }
    }
}

async fn credential(paths: &Paths) -> Result<Credential> {
    CredentialManager::from_paths(paths)?
        .acquire_credentials()
        .await
}

/// Parse `args` and run the selected command, returning the process exit code.
///
/// Usage problems print clap's message and usage text; everything else is
/// logged. Both exit with 1.
pub async fn dispatch<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() { 1 } else { 0 };
            if let Err(print_err) = e.print() {
                debug!(error = %print_err, "Failed to print usage message");
            }
            return code;
        }
    };

    match cli.run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("Error: {}", e);
            1
        }
    }
}
