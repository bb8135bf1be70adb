// src/lib.rs
pub mod banner;
pub mod config;
pub mod data_types;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod navigation;
pub mod normalizer;
pub mod render;
pub mod search;
pub mod sheet_client;
pub mod tax;
pub mod ui;

#[cfg(test)]
mod test_support;
