// src/config.rs
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "value_viewer.json";
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spreadsheet id, or a full spreadsheet URL containing it.
    pub spreadsheet: String,
    pub base_url: String,
    pub sections: Vec<String>,
    pub banner_sheet: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            spreadsheet: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            sections: ["Common", "Rare", "Epic", "Legendary", "Omega", "Misc", "Cars"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            banner_sheet: "Banner".to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Reads `value_viewer.json`, falling back to defaults if it is missing or broken.
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let mut json = String::new();

        match File::open(path).and_then(|mut f| f.read_to_string(&mut json)) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no {} found, using default configuration", path.display());
                return AppConfig::default();
            }
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
                return AppConfig::default();
            }
        }

        match Self::parse(&json) {
            Ok(config) => {
                info!("loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("malformed {}: {e}; using defaults", path.display());
                AppConfig::default()
            }
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
