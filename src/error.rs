// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ─────────────────────────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ── Response shape ────────────────────────────────────────────────────────
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Response has no <record_count> element (body starts with: {snippet:?})")]
    MissingRecordCount { snippet: String },

    #[error("Response ends with {open} element(s) still open (body ends with: {snippet:?})")]
    Truncated { open: usize, snippet: String },

    #[error("Invalid <record_count> value: {0:?}")]
    InvalidRecordCount(String),

    // ── Output ────────────────────────────────────────────────────────────────
    #[error("CSV write failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ── Config ────────────────────────────────────────────────────────────────
    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid filter {0:?} (expected NAME=VALUE)")]
    InvalidFilter(String),
}
