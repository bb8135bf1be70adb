// src/error.rs
use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("No spreadsheet configured")]
    NotConfigured,

    #[error("Invalid spreadsheet URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error status {0}")]
    Status(u16),

    #[error("Response of {len} characters is too short for the export wrapper")]
    Wrapper { len: usize },

    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response carries no table ({reasons})")]
    MissingTable { reasons: String },
}
