mod client;

pub use client::DriveClient;

use crate::error::Result;
use async_trait::async_trait;

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Files listed per request; no further pages are fetched
pub const PAGE_SIZE: i32 = 50;

const ORDER_BY: &str = "name";

// Partial response: only the fields we print
const FILE_FIELDS: &str = "files(id, name, mimeType)";

/// Parameters of a single `files.list` call
#[derive(Debug, Clone, PartialEq)]
pub struct FileListRequest {
    pub q: String,
    pub page_size: i32,
    pub order_by: &'static str,
    pub fields: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriveQuery {
    /// Direct children of the given folder
    InFolder(String),
    /// Every folder visible to the user
    AllFolders,
}

impl DriveQuery {
    /// An empty `folder_id` counts as omitted
    pub fn new(folder_id: Option<&str>) -> Self {
        match folder_id.filter(|id| !id.is_empty()) {
            Some(id) => DriveQuery::InFolder(id.to_string()),
            None => DriveQuery::AllFolders,
        }
    }

    /// Render as a Drive `q` search expression
    pub fn to_query(&self) -> String {
        match self {
            DriveQuery::InFolder(id) => format!("'{}' in parents", id),
            DriveQuery::AllFolders => format!("mimeType='{}'", FOLDER_MIME_TYPE),
        }
    }

    pub fn list_request(&self) -> FileListRequest {
        FileListRequest {
            q: self.to_query(),
            page_size: PAGE_SIZE,
            order_by: ORDER_BY,
            fields: FILE_FIELDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

#[async_trait]
pub trait DriveOperations {
    /// List matching files ordered by name, one page only
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>>;
}
