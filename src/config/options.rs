// src/config/options.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{Error, Result};

/// Record type exposed by the API (`<type_of_data>`).
///
/// Unknown names are kept as `Other` and forwarded verbatim; the remote
/// service decides whether they are valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataCategory {
    Contracts,
    Budget,
    Revenue,
    Payroll,
    Spending,
    SpendingOge,
    ContractsOge,
    Other(String),
}

impl DataCategory {
    pub const KNOWN: [DataCategory; 7] = [
        DataCategory::Contracts,
        DataCategory::Budget,
        DataCategory::Revenue,
        DataCategory::Payroll,
        DataCategory::Spending,
        DataCategory::SpendingOge,
        DataCategory::ContractsOge,
    ];

    /// Name as sent on the wire and used in file names.
    pub fn as_str(&self) -> &str {
        match self {
            DataCategory::Contracts => "Contracts",
            DataCategory::Budget => "Budget",
            DataCategory::Revenue => "Revenue",
            DataCategory::Payroll => "Payroll",
            DataCategory::Spending => "Spending",
            DataCategory::SpendingOge => "Spending_OGE",
            DataCategory::ContractsOge => "Contracts_OGE",
            DataCategory::Other(s) => s,
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let known = DataCategory::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s));
        Ok(known.unwrap_or_else(|| DataCategory::Other(s.to_string())))
    }
}

impl From<String> for DataCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(c) => c,
            Err(never) => match never {},
        }
    }
}

impl From<DataCategory> for String {
    fn from(c: DataCategory) -> Self {
        c.as_str().to_string()
    }
}

/// One `<criteria>` entry. Kept in a list so request bodies are deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub value: String,
}

impl Filter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Parses `NAME=VALUE` (value may itself contain `=`).
impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Filter::new(name.trim(), value.trim()))
            }
            _ => Err(Error::InvalidFilter(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    pub category: DataCategory,
    pub agencies: Vec<String>,
    pub filters: Vec<Filter>,
    pub endpoint: String,
    /// Criteria name carrying the agency code; `None` sends filters only.
    pub agency_criteria: Option<String>,
    pub timeout_secs: Option<u64>,
    pub summary_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            category: DataCategory::from(DEFAULT_CATEGORY.to_string()),
            agencies: DEFAULT_AGENCIES.iter().map(|s| s.to_string()).collect(),
            filters: Vec::new(),
            endpoint: ENDPOINT.to_string(),
            agency_criteria: Some(AGENCY_CRITERIA.to_string()),
            timeout_secs: None,
            summary_path: None,
        }
    }
}

impl RunOptions {
    /// Load options from a JSON file; missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Agency codes trimmed, de-duplicated and sorted.
    pub fn normalized_agencies(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .agencies
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Configured filters plus the agency criterion, in request order.
    pub fn criteria_for(&self, agency: &str) -> Vec<Filter> {
        let mut out = self.filters.clone();
        if let Some(name) = &self.agency_criteria {
            out.push(Filter::new(name.as_str(), agency));
        }
        out
    }

    pub fn filter_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name.clone()).collect()
    }
}
