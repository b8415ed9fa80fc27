mod client;
pub mod range;

pub use client::SheetsClient;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Rows of cell values, as exchanged with the values endpoints
pub type Rows = Vec<Vec<Value>>;

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetSummary {
    pub title: String,
    pub tabs: Vec<TabSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabSummary {
    pub title: String,
    pub row_count: i32,
    pub column_count: i32,
}

#[async_trait]
pub trait SpreadsheetOperations {
    async fn list_tabs(&self) -> Result<SpreadsheetSummary>;

    async fn read_range(&self, range: &str) -> Result<Rows>;

    /// Returns the number of cells the API reports as updated
    async fn write_range(&self, range: &str, values: Rows) -> Result<i32>;
}
