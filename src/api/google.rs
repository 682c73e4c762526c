//! Implements the `Store` trait using the `sheets::Client` to interact with
//! the ledger's Google sheet.

use crate::api::Store;
use crate::{Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sheets::types::{
    BatchClearValuesRequest, BatchUpdateValuesRequest, DateTimeRenderOption, Dimension,
    ValueInputOption, ValueRange, ValueRenderOption,
};
use sheets::ClientError;
use std::path::Path;
use tracing::trace;

/// OAuth client and token material stored at
/// `$FUNDBOOK_HOME/.secrets/credentials.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Credentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) refresh_token: String,
}

impl Credentials {
    pub(crate) async fn load(path: &Path) -> Result<Self> {
        crate::utils::deserialize(path)
            .await
            .context("Failed to load Google credentials")
    }
}

/// Implements the `Store` trait against the Google Sheets API. The access
/// token is refreshed before each call when a refresh token is available.
pub(super) struct GoogleStore {
    spreadsheet_id: String,
    has_refresh_token: bool,
    client: sheets::Client,
}

impl GoogleStore {
    pub(super) async fn new(config: &Config) -> Result<Self> {
        let credentials = Credentials::load(&config.credentials_path()).await?;
        let has_refresh_token = !credentials.refresh_token.is_empty();
        let client = sheets::Client::new(
            credentials.client_id,
            credentials.client_secret,
            String::new(), // redirect_uri (not needed for API calls)
            credentials.access_token,
            credentials.refresh_token,
        );
        Ok(Self {
            spreadsheet_id: config.spreadsheet_id().to_string(),
            has_refresh_token,
            client,
        })
    }

    /// Refreshes the access token if a refresh token was provided.
    async fn refresh(&mut self) -> Result<()> {
        if self.has_refresh_token {
            self.client
                .refresh_access_token()
                .await
                .map_err(map_client_error)
                .context("Failed to refresh the Google access token")?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for GoogleStore {
    async fn read_rows(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        trace!("read_rows for {sheet_name}");
        self.refresh().await?;
        let range = format!("{sheet_name}!A:Z");
        let response = self
            .client
            .spreadsheets()
            .values_get(
                &self.spreadsheet_id,
                &range,
                DateTimeRenderOption::FormattedString,
                Dimension::Rows,
                ValueRenderOption::FormattedValue,
            )
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to fetch {sheet_name} sheet data"))?;
        Ok(response.body.values)
    }

    async fn write_rows(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()> {
        trace!("write_rows for {sheet_name} ({} rows)", rows.len());
        self.refresh().await?;

        // Clear the whole sheet first so stale trailing rows cannot survive a
        // shrinking write.
        let clear_request = BatchClearValuesRequest {
            ranges: vec![format!("{sheet_name}!A:Z")],
        };
        self.client
            .spreadsheets()
            .values_batch_clear(&self.spreadsheet_id, &clear_request)
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to clear the {sheet_name} sheet"))?;

        let request = BatchUpdateValuesRequest {
            data: vec![ValueRange {
                major_dimension: Some(Dimension::Rows),
                range: format!("{sheet_name}!A1"),
                values: rows.to_vec(),
            }],
            include_values_in_response: Some(false),
            response_date_time_render_option: None,
            response_value_render_option: None,
            value_input_option: Some(ValueInputOption::Raw),
        };
        self.client
            .spreadsheets()
            .values_batch_update(&self.spreadsheet_id, &request)
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to write the {sheet_name} sheet"))?;
        Ok(())
    }
}

fn map_client_error(e: sheets::ClientError) -> anyhow::Error {
    let error_name = match &e {
        ClientError::EmptyRefreshToken => "EmptyRefreshToken".to_string(),
        ClientError::FromUtf8Error(inner) => format!("FromUtf8Error {inner}"),
        ClientError::UrlParserError(inner) => format!("UrlParserError {inner}"),
        ClientError::SerdeJsonError(inner) => format!("SerdeJsonError {inner}"),
        ClientError::ReqwestError(inner) => format!("ReqwestError {inner}"),
        ClientError::InvalidHeaderValue(inner) => format!("InvalidHeaderValue {inner}"),
        ClientError::ReqwestMiddleWareError(inner) => format!("ReqwestMiddleWareError {inner}"),
        ClientError::HttpError { .. } => "HttpError".to_string(),
        ClientError::Other(_) => "Other".to_string(),
    };
    Err::<(), ClientError>(e).context(error_name).err().unwrap()
}
