use super::{Rows, SpreadsheetOperations, SpreadsheetSummary, TabSummary};
use crate::auth::Credential;
use crate::error::{AppError, Result};
use crate::google::https_connector;
use async_trait::async_trait;
use google_sheets4::api::{Scope, Sheet, Sheets, ValueRange};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::instrument;

// Read and write access to spreadsheets
const AUTH_SCOPE: Scope = Scope::Spreadsheet;

// Values are parsed as if typed into the UI: formulas evaluate, numbers and dates are inferred
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(credential: &Credential, spreadsheet_id: &str) -> Result<Self> {
        let client =
            Client::builder(hyper_util::rt::TokioExecutor::new()).build(https_connector()?);

        Ok(Self {
            hub: Sheets::new(client, credential.access_token.clone()),
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }
}

fn tab_summary(sheet: Sheet) -> Option<TabSummary> {
    let properties = sheet.properties?;
    let grid = properties.grid_properties.unwrap_or_default();

    Some(TabSummary {
        title: properties.title.unwrap_or_default(),
        row_count: grid.row_count.unwrap_or_default(),
        column_count: grid.column_count.unwrap_or_default(),
    })
}

#[async_trait]
impl SpreadsheetOperations for SheetsClient {
    #[instrument(name = "Fetching spreadsheet metadata", skip(self))]
    async fn list_tabs(&self) -> Result<SpreadsheetSummary> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.spreadsheet_id)
            .include_grid_data(false)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to get spreadsheet: {}", e)))?;

        let title = spreadsheet
            .properties
            .and_then(|props| props.title)
            .unwrap_or_default();
        let tabs = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(tab_summary)
            .collect();

        Ok(SpreadsheetSummary { title, tabs })
    }

    #[instrument(name = "Reading range", skip(self))]
    async fn read_range(&self, range: &str) -> Result<Rows> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to read range '{}': {}", range, e)))?;

        Ok(response.values.unwrap_or_default())
    }

    #[instrument(name = "Writing range", skip(self, values))]
    async fn write_range(&self, range: &str, values: Rows) -> Result<i32> {
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.to_string()),
            values: Some(values),
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(value_range, &self.spreadsheet_id, range)
            .value_input_option(VALUE_INPUT_OPTION)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to write range '{}': {}", range, e)))?;

        Ok(response.updated_cells.unwrap_or(0))
    }
}
