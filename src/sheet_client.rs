// src/sheet_client.rs
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::data_types::{CellValue, Table};
use crate::error::{SheetError, SheetResult};

/// `/*O_o*/\ngoogle.visualization.Query.setResponse(`
pub const WRAPPER_PREFIX_LEN: usize = 47;
/// `);`
pub const WRAPPER_SUFFIX_LEN: usize = 2;

#[derive(Debug, Deserialize)]
struct ExportResponse {
    #[serde(default)]
    errors: Vec<ExportError>,
    table: Option<ExportTable>,
}

#[derive(Debug, Deserialize)]
struct ExportError {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportTable {
    #[serde(default)]
    cols: Vec<ExportColumn>,
    #[serde(default)]
    rows: Vec<ExportRow>,
}

#[derive(Debug, Deserialize)]
struct ExportColumn {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(default)]
    c: Vec<Option<CellValue>>,
}

/// Read-only client for a public spreadsheet's JSON export endpoint.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl SheetClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });

        let endpoint = if config.spreadsheet.trim().is_empty() {
            warn!("no spreadsheet configured; every sheet will load empty");
            None
        } else {
            match extract_spreadsheet_id(config.spreadsheet.trim()) {
                Ok(id) => Some(format!(
                    "{}/{}/gviz/tq",
                    config.base_url.trim_end_matches('/'),
                    id
                )),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            }
        };

        SheetClient { http, endpoint }
    }

    /// Client pointed straight at an export endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        SheetClient {
            http: reqwest::Client::new(),
            endpoint: Some(endpoint.into()),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Fetches one sheet. Any failure is logged and yields an empty table.
    pub async fn fetch_table(&self, sheet: &str) -> Table {
        match self.try_fetch_table(sheet).await {
            Ok(table) => {
                debug!(sheet, rows = table.rows.len(), "sheet fetched");
                table
            }
            Err(e) => {
                warn!(sheet, "failed to fetch sheet: {e}");
                Table::empty()
            }
        }
    }

    pub async fn try_fetch_table(&self, sheet: &str) -> SheetResult<Table> {
        let endpoint = self.endpoint.as_deref().ok_or(SheetError::NotConfigured)?;
        let url = Url::parse_with_params(
            endpoint,
            &[("tqx", "out:json"), ("sheet", sheet), ("headers", "1")],
        )
        .map_err(|_| SheetError::InvalidUrl(endpoint.to_string()))?;

        debug!(%url, "requesting sheet");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }

    /// Downloads image bytes for a card. `None` means the image stays hidden.
    pub async fn fetch_image(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, "image request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "image not available");
            return None;
        }

        let is_image = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, |ct| ct.starts_with("image/"));
        if !is_image {
            debug!(url, "not an image response");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
            Ok(_) => None,
            Err(e) => {
                debug!(url, "image download failed: {e}");
                None
            }
        }
    }
}

// URLs typically look like: https://docs.google.com/spreadsheets/d/[SPREADSHEET_ID]/edit
pub fn extract_spreadsheet_id(url: &str) -> SheetResult<&str> {
    if !url.contains('/') {
        return Ok(url);
    }

    let parts: Vec<&str> = url.split('/').collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "d" && i + 1 < parts.len() && !parts[i + 1].is_empty() {
            return Ok(parts[i + 1]);
        }
    }

    Err(SheetError::InvalidUrl(url.to_string()))
}

/// Cuts the fixed-length callback wrapper off an export response.
pub fn strip_wrapper(body: &str) -> SheetResult<&str> {
    let len = body.chars().count();
    if len < WRAPPER_PREFIX_LEN + WRAPPER_SUFFIX_LEN {
        return Err(SheetError::Wrapper { len });
    }

    let byte_at = |n: usize| {
        body.char_indices()
            .nth(n)
            .map_or(body.len(), |(i, _)| i)
    };
    let start = byte_at(WRAPPER_PREFIX_LEN);
    let end = byte_at(len - WRAPPER_SUFFIX_LEN);

    Ok(&body[start..end])
}

pub fn parse_response(body: &str) -> SheetResult<Table> {
    let payload = strip_wrapper(body)?;
    let response: ExportResponse = serde_json::from_str(payload)?;

    let Some(table) = response.table else {
        let reasons = response
            .errors
            .iter()
            .map(|e| match &e.detailed_message {
                Some(detail) => format!("{}: {}", e.reason, detail),
                None => e.reason.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SheetError::MissingTable { reasons });
    };

    Ok(Table {
        columns: table
            .cols
            .into_iter()
            .map(|c| c.label.unwrap_or_default())
            .collect(),
        rows: table.rows.into_iter().map(|r| r.c).collect(),
    })
}
