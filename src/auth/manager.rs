use super::{
    ClientIdentitySource, FileClientIdentity, FileTokenStore, OAuth2Refresher, TokenRecord,
    TokenRefresher, TokenStore,
};
use crate::config::Paths;
use crate::error::Result;
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Bearer token ready to be attached to a single API request
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub access_token: String,
}

impl From<&TokenRecord> for Credential {
    fn from(record: &TokenRecord) -> Self {
        Credential {
            access_token: record.access_token.clone(),
        }
    }
}

pub struct CredentialManager<TS, CI, TR> {
    tokens: TS,
    identity: CI,
    refresher: TR,
}

impl CredentialManager<FileTokenStore, FileClientIdentity, OAuth2Refresher> {
    pub fn from_paths(paths: &Paths) -> Result<Self> {
        Ok(Self::new(
            FileTokenStore::new(paths.token_file()),
            FileClientIdentity::new(paths.client_secret_file()),
            OAuth2Refresher::new()?,
        ))
    }
}

impl<TS, CI, TR> CredentialManager<TS, CI, TR>
where
    TS: TokenStore,
    CI: ClientIdentitySource,
    TR: TokenRefresher + Sync,
{
    pub fn new(tokens: TS, identity: CI, refresher: TR) -> Self {
        Self {
            tokens,
            identity,
            refresher,
        }
    }

    /// Load the cached token, refreshing and persisting it first if expired
    #[instrument(name = "Acquiring Google credentials", skip_all)]
    pub async fn acquire_credentials(&self) -> Result<Credential> {
        let mut record = self.tokens.load()?;
        let identity = self.identity.load()?;

        if record.is_valid(Utc::now()) {
            debug!("Using cached Google access token");
            return Ok(Credential::from(&record));
        }

        debug!(expiry = ?record.expiry, "Access token expired, refreshing...");
        let refreshed = self.refresher.refresh(&record, &identity).await?;
        record.apply_refresh(refreshed, Utc::now());

        // Must hit disk before the token is handed out
        self.tokens.save(&record)?;
        info!(expiry = ?record.expiry, "Refreshed Google access token");

        Ok(Credential::from(&record))
    }
}
