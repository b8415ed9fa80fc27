use super::{ClientIdentitySource, TokenStore};
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

// Tokens this close to expiry are refreshed before use
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

/// Cached OAuth token, in the `authorized_user` layout written by Google's
/// client libraries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenRecord {
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    /// Fields we don't interpret, preserved across rewrites
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenRecord {
    /// A record without an expiry can't be trusted and counts as expired
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expiry {
            Some(expiry) => expiry > now + Duration::seconds(EXPIRY_MARGIN_SECS),
            None => false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientIdentity>,
    web: Option<ClientIdentity>,
}

fn read_json_file(path: &Path, what: &str) -> Result<String> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "{} not found at {:?}. Please create one.",
            what, path
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("Failed to read {} {:?}: {}", what, path, e)))
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<TokenRecord> {
        let contents = read_json_file(&self.path, "Token cache")?;

        serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse token cache: {}", e)))
    }

    fn save(&self, record: &TokenRecord) -> Result<()> {
        let contents = serde_json::to_string_pretty(record)
            .map_err(|e| AppError::Auth(format!("Failed to serialize tokens: {}", e)))?;

        // Overwritten in place; the cache holds a refresh token so keep it private
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(0o600)
            .open(&self.path)
            .map_err(|e| AppError::Auth(format!("Failed to open tokens file: {}", e)))?;

        file.write_all(contents.as_bytes())
            .map_err(|e| AppError::Auth(format!("Failed to write tokens file: {}", e)))?;

        Ok(())
    }
}

pub struct FileClientIdentity {
    path: PathBuf,
}

impl FileClientIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClientIdentitySource for FileClientIdentity {
    fn load(&self) -> Result<ClientIdentity> {
        let contents = read_json_file(&self.path, "Client secret file")?;

        let file: ClientSecretFile = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse client secret file: {}", e)))?;

        let identity = file.installed.or(file.web).ok_or_else(|| {
            AppError::Config(
                "Client secret file has neither an \"installed\" nor a \"web\" section"
                    .to_string(),
            )
        })?;

        if identity.client_id.is_empty() || identity.client_secret.is_empty() {
            return Err(AppError::Config(
                "client_id and client_secret must be set in client secret file".to_string(),
            ));
        }

        Ok(identity)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_valid() {
        let now = Utc::now();

        let future = test_helpers::mock_record(Some(now + Duration::hours(1)));
        assert!(future.is_valid(now));

        let past = test_helpers::mock_record(Some(now - Duration::hours(1)));
        assert!(!past.is_valid(now));

        let nearly = test_helpers::mock_record(Some(now + Duration::seconds(10)));
        assert!(!nearly.is_valid(now), "tokens inside the margin should refresh");

        let missing = test_helpers::mock_record(None);
        assert!(!missing.is_valid(now));

        let empty = TokenRecord {
            access_token: String::new(),
            ..future
        };
        assert!(!empty.is_valid(now));
    }

    #[test]
    fn test_load_google_token_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        fs::write(
            &path,
            r#"{
                "token": "ya29.abc",
                "refresh_token": "1//xyz",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_id": "client.apps.googleusercontent.com",
                "scopes": ["https://www.googleapis.com/auth/spreadsheets"],
                "universe_domain": "googleapis.com",
                "expiry": "2025-06-01T10:00:00.123456Z"
            }"#,
        )
        .unwrap();

        let record = FileTokenStore::new(&path).load().unwrap();
        assert_eq!(record.access_token, "ya29.abc");
        assert_eq!(record.refresh_token, "1//xyz");
        assert_eq!(record.scopes.len(), 1);
        assert!(record.expiry.is_some());
        assert_eq!(
            record.extra.get("universe_domain"),
            Some(&Value::String("googleapis.com".to_string()))
        );
    }

    #[test]
    fn test_token_uri_defaults() {
        let record: TokenRecord =
            serde_json::from_str(r#"{"token": "a", "refresh_token": "b"}"#).unwrap();
        assert_eq!(record.token_uri, GOOGLE_TOKEN_URL);
        assert!(record.scopes.is_empty());
        assert!(record.expiry.is_none());
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        fs::write(
            &path,
            r#"{"token": "a", "refresh_token": "b", "account": "me@example.com"}"#,
        )
        .unwrap();

        let store = FileTokenStore::new(&path);
        let mut record = store.load().unwrap();
        record.access_token = "fresh".to_string();
        store.save(&record).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.access_token, "fresh");
        assert_eq!(
            reloaded.extra.get("account"),
            Some(&Value::String("me@example.com".to_string()))
        );
    }

    #[test]
    fn test_missing_token_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = FileTokenStore::new(dir.path().join("nope.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_malformed_token_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, r#"{"refresh_token": "b"}"#).unwrap();

        let err = FileTokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_load_installed_identity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client_secret.json");
        fs::write(
            &path,
            r#"{"installed": {"client_id": "id", "client_secret": "secret", "project_id": "p"}}"#,
        )
        .unwrap();

        let identity = FileClientIdentity::new(&path).load().unwrap();
        assert_eq!(identity.client_id, "id");
        assert_eq!(identity.client_secret, "secret");
    }

    #[test]
    fn test_load_web_identity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client_secret.json");
        fs::write(
            &path,
            r#"{"web": {"client_id": "web-id", "client_secret": "web-secret"}}"#,
        )
        .unwrap();

        let identity = FileClientIdentity::new(&path).load().unwrap();
        assert_eq!(identity.client_id, "web-id");
    }

    #[test]
    fn test_identity_without_section_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client_secret.json");
        fs::write(&path, r#"{"client_id": "id", "client_secret": "secret"}"#).unwrap();

        let err = FileClientIdentity::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
    }
}
