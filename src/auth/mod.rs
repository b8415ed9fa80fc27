mod manager;
mod refresh;
mod store;

pub use manager::{Credential, CredentialManager};
pub use refresh::{OAuth2Refresher, RefreshedToken};
pub use store::{ClientIdentity, FileClientIdentity, FileTokenStore, TokenRecord};

use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the cached token record
pub trait TokenStore {
    fn load(&self) -> Result<TokenRecord>;

    fn save(&self, record: &TokenRecord) -> Result<()>;
}

/// Read-only source of the OAuth client id and secret
pub trait ClientIdentitySource {
    fn load(&self) -> Result<ClientIdentity>;
}

#[async_trait]
pub trait TokenRefresher {
    async fn refresh(
        &self,
        record: &TokenRecord,
        identity: &ClientIdentity,
    ) -> Result<RefreshedToken>;
}
