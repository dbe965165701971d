//! Spreadsheet loading over the Sheets REST surface.
//!
//! The loader resolves a user-pasted sheet URL to a spreadsheet id, fetches
//! the first worksheet's cell values, and converts them into a [`Table`]:
//! first row = headers, every cell coerced to text with no type
//! interpretation. All failures here abort the run as one recoverable data
//! error; nothing downstream executes on a bad sheet.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::table::Table;
use crate::util::SecretString;

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// A range with no sheet-name prefix resolves against the first worksheet.
const FULL_RANGE: &str = "A1:ZZ";

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("not a spreadsheet URL: {0}")]
    InvalidUrl(String),
    #[error("Sheets API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheet has no rows")]
    EmptySheet,
}

pub struct SheetsClient {
    client: Client,
    token: SecretString,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsClient {
    pub fn new(token: String, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::with_base_url(token, SHEETS_BASE_URL.to_string(), timeout_secs)
    }

    pub fn with_base_url(
        token: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?,
            token: token.into(),
            base_url,
        })
    }

    /// Fetch the first worksheet of the spreadsheet behind `sheet_url` as a
    /// table of text cells.
    pub async fn fetch_table(&self, sheet_url: &str) -> Result<Table, SheetsError> {
        let id = spreadsheet_id_from_url(sheet_url)?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, id, FULL_RANGE
        );

        debug!("Fetching worksheet values for spreadsheet {}", id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, body });
        }

        let range: ValueRange = response.json().await?;
        table_from_values(range.values)
    }
}

/// Extract the spreadsheet id from a pasted URL
/// (`…/spreadsheets/d/<id>/…`).
pub fn spreadsheet_id_from_url(url: &str) -> Result<String, SheetsError> {
    let marker = "/spreadsheets/d/";
    let start = url
        .find(marker)
        .ok_or_else(|| SheetsError::InvalidUrl(url.to_string()))?
        + marker.len();
    let id: String = url[start..]
        .chars()
        .take_while(|c| !matches!(c, '/' | '?' | '#'))
        .collect();
    if id.is_empty() {
        return Err(SheetsError::InvalidUrl(url.to_string()));
    }
    Ok(id)
}

fn table_from_values(values: Vec<Vec<Value>>) -> Result<Table, SheetsError> {
    let mut rows = values.into_iter().map(|row| {
        row.iter().map(cell_text).collect::<Vec<String>>()
    });
    let headers = rows.next().ok_or(SheetsError::EmptySheet)?;
    Ok(Table::new(headers, rows.collect()))
}

/// Cells come back as JSON values; everything is kept as text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
