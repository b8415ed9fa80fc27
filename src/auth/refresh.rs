use super::{ClientIdentity, TokenRecord, TokenRefresher};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use oauth2::basic::BasicClient;
use oauth2::{AuthType, ClientId, ClientSecret, RefreshToken, Scope, TokenResponse, TokenUrl};
use reqwest::redirect::Policy;
use tracing::{debug, instrument};

// Used when the token endpoint omits expires_in
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

// Longer lifetimes are clamped to this
const MAX_EXPIRES_IN_SECS: u64 = 86_400;

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshedToken {
    pub access_token: String,
    /// Only present when the endpoint rotates the refresh token
    pub refresh_token: Option<String>,
    pub expires_in: Option<std::time::Duration>,
}

impl TokenRecord {
    pub(super) fn apply_refresh(&mut self, refreshed: RefreshedToken, now: DateTime<Utc>) {
        self.access_token = refreshed.access_token;
        if let Some(refresh_token) = refreshed.refresh_token {
            self.refresh_token = refresh_token;
        }

        let expires_in = refreshed
            .expires_in
            .map(|d| d.as_secs().min(MAX_EXPIRES_IN_SECS) as i64)
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        self.expiry = Some(now + Duration::seconds(expires_in));
    }
}

/// Refreshes access tokens against the record's token endpoint
pub struct OAuth2Refresher {
    http_client: reqwest::Client,
}

impl OAuth2Refresher {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .build()
            .map_err(|e| AppError::Auth(format!("Failed to build reqwest client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl TokenRefresher for OAuth2Refresher {
    #[instrument(name = "Refreshing Google access token", skip_all)]
    async fn refresh(
        &self,
        record: &TokenRecord,
        identity: &ClientIdentity,
    ) -> Result<RefreshedToken> {
        let token_url = TokenUrl::new(record.token_uri.clone())
            .map_err(|e| AppError::Auth(format!("Invalid token URL: {}", e)))?;

        // Google expects the client credentials in the form body
        let client = BasicClient::new(ClientId::new(identity.client_id.clone()))
            .set_client_secret(ClientSecret::new(identity.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(token_url);

        let scopes = record
            .scopes
            .iter()
            .map(|s| Scope::new(s.clone()))
            .collect::<Vec<Scope>>();
        let refresh_token = RefreshToken::new(record.refresh_token.clone());

        let token_result = client
            .exchange_refresh_token(&refresh_token)
            .add_scopes(scopes)
            .request_async(&self.http_client)
            .await
            .map_err(|e| AppError::Auth(format!("Failed to refresh token: {:?}", e)))?;

        debug!(expires_in = ?token_result.expires_in(), "Token endpoint accepted refresh");

        Ok(RefreshedToken {
            access_token: token_result.access_token().secret().clone(),
            refresh_token: token_result.refresh_token().map(|t| t.secret().clone()),
            expires_in: token_result.expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::test_helpers::mock_record;

    #[test]
    fn test_apply_refresh_keeps_refresh_token() {
        let now = Utc::now();
        let mut record = mock_record(Some(now - Duration::hours(1)));

        record.apply_refresh(
            RefreshedToken {
                access_token: "ya29.new".to_string(),
                refresh_token: None,
                expires_in: Some(std::time::Duration::from_secs(1800)),
            },
            now,
        );

        assert_eq!(record.access_token, "ya29.new");
        assert_eq!(record.refresh_token, "1//refresh");
        assert_eq!(record.expiry, Some(now + Duration::seconds(1800)));
    }

    #[test]
    fn test_apply_refresh_rotates_refresh_token() {
        let now = Utc::now();
        let mut record = mock_record(None);

        record.apply_refresh(
            RefreshedToken {
                access_token: "ya29.new".to_string(),
                refresh_token: Some("1//rotated".to_string()),
                expires_in: None,
            },
            now,
        );

        assert_eq!(record.refresh_token, "1//rotated");
        assert_eq!(
            record.expiry,
            Some(now + Duration::seconds(DEFAULT_EXPIRES_IN_SECS)),
            "missing expires_in should default to an hour"
        );
    }

    #[test]
    fn test_apply_refresh_clamps_huge_lifetime() {
        let now = Utc::now();
        let mut record = mock_record(None);

        record.apply_refresh(
            RefreshedToken {
                access_token: "ya29.new".to_string(),
                refresh_token: None,
                expires_in: Some(std::time::Duration::from_secs(u64::MAX)),
            },
            now,
        );

        assert_eq!(
            record.expiry,
            Some(now + Duration::seconds(MAX_EXPIRES_IN_SECS as i64))
        );
        assert!(record.is_valid(now));
    }

    #[tokio::test]
    async fn test_invalid_token_uri_is_auth_error() {
        let record = TokenRecord {
            token_uri: "not a url".to_string(),
            ..mock_record(None)
        };
        let identity = crate::auth::store::test_helpers::mock_identity();

        let err = OAuth2Refresher::new()
            .unwrap()
            .refresh(&record, &identity)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)), "got {:?}", err);
    }
}
