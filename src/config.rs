use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};

const CONFIG_DIR_PREFIX: &str = "gsheet";
const TOKEN_FILE: &str = "token.json";
const CLIENT_SECRET_FILE: &str = "client_secret.json";

/// Spreadsheet that every sheets command operates on.
pub const SPREADSHEET_ID: &str = "1fI1s_KLcegpiACJYpmpNe9tnQmnZo2o8eHIXNV5SpPg";

/// Locations of the token cache and OAuth client secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    base_dir: PathBuf,
}

impl Paths {
    /// Resolve paths from `override_dir`, falling back to the XDG config home
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        match override_dir {
            Some(dir) => Ok(Self::from_base_dir(dir)),
            None => Self::discover(),
        }
    }

    pub fn discover() -> Result<Self> {
        let xdg = xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX);
        xdg.get_config_home()
            .map(|base_dir| Self { base_dir })
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    pub fn from_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Cached access/refresh token, rewritten after every refresh
    pub fn token_file(&self) -> PathBuf {
        self.base_dir.join(TOKEN_FILE)
    }

    /// OAuth client secret as downloaded from the Google Cloud console
    pub fn client_secret_file(&self) -> PathBuf {
        self.base_dir.join(CLIENT_SECRET_FILE)
    }
}
