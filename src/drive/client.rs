use super::{DriveFile, DriveOperations, DriveQuery};
use crate::auth::Credential;
use crate::error::{AppError, Result};
use crate::google::https_connector;
use async_trait::async_trait;
use google_drive3::api::{DriveHub, File, Scope};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::instrument;

const AUTH_SCOPE: Scope = Scope::Readonly;

pub struct DriveClient {
    hub: DriveHub<HttpsConnector<HttpConnector>>,
}

impl DriveClient {
    pub fn new(credential: &Credential) -> Result<Self> {
        let client =
            Client::builder(hyper_util::rt::TokioExecutor::new()).build(https_connector()?);

        Ok(Self {
            hub: DriveHub::new(client, credential.access_token.clone()),
        })
    }
}

impl From<File> for DriveFile {
    fn from(file: File) -> Self {
        DriveFile {
            id: file.id.unwrap_or_default(),
            name: file.name.unwrap_or_default(),
            mime_type: file.mime_type.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl DriveOperations for DriveClient {
    #[instrument(name = "Listing Drive files", skip(self))]
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>> {
        let request = query.list_request();
        let (_, file_list) = self
            .hub
            .files()
            .list()
            .q(&request.q)
            .page_size(request.page_size)
            .order_by(request.order_by)
            .param("fields", request.fields)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to list Drive files: {}", e)))?;

        Ok(file_list
            .files
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
