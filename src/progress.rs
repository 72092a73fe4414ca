// src/progress.rs
use std::path::Path;

use tracing::{info, warn};

/// Lightweight progress reporting for a run.
/// Frontends implement this to surface status; every hook defaults to a no-op.
pub trait Progress {
    /// Called once with the number of agencies to process.
    fn begin(&mut self, _agencies: usize) {}

    /// Probe answered with zero records; nothing will be written.
    fn agency_skipped(&mut self, _agency: &str) {}

    /// Probe answered with `records`, to be fetched in `pages` pages.
    fn agency_started(&mut self, _agency: &str, _records: u64, _pages: u64) {}

    /// One page file written. `page` is 0-based.
    fn page_done(&mut self, _agency: &str, _page: u64, _pages: u64, _rows: usize, _path: &Path) {}

    fn agency_done(&mut self, _agency: &str, _records: u64) {}

    /// Called at the end of a successful run.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Reports through `tracing` at info level.
pub struct LogProgress;

impl Progress for LogProgress {
    fn begin(&mut self, agencies: usize) {
        info!("Processing {agencies} agencies");
    }

    fn agency_skipped(&mut self, agency: &str) {
        info!("NO RECORDS FOR {agency}");
    }

    fn agency_started(&mut self, agency: &str, records: u64, pages: u64) {
        info!("Agency {agency}: {records} records in {pages} pages");
    }

    fn page_done(&mut self, agency: &str, page: u64, pages: u64, rows: usize, path: &Path) {
        if rows == 0 {
            warn!("Agency {agency}: page {page} came back empty ({})", path.display());
        }
        info!("ITERATION {page} DONE OUT OF {pages}.");
    }

    fn agency_done(&mut self, agency: &str, records: u64) {
        info!("Finished agency {agency} with {records} results.");
    }
}
