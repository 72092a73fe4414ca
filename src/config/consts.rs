// src/config/consts.rs

// Net config
pub const ENDPOINT: &str = "https://www.checkbooknyc.com/api";
pub const USER_AGENT: &str = concat!("checkbook_scrape/", env!("CARGO_PKG_VERSION"));

// Paging
pub const PAGE_SIZE: u64 = 1000; // API maximum per request
pub const PROBE_SIZE: u64 = 5;

// Request shape
pub const AGENCY_CRITERIA: &str = "agency_code";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_CATEGORY: &str = "Budget";
pub const DEFAULT_AGENCIES: &[&str] = &["040"];
pub const CATEGORY_COLUMN: &str = "TYPE_OF_DATA";
pub const PAGE_FILE_TAG: &str = "ITERATION";
pub const PAGE_FILE_EXT: &str = "csv";
