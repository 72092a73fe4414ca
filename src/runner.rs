// src/runner.rs
use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    config::{
        DataCategory, RunOptions,
        consts::{CATEGORY_COLUMN, PAGE_SIZE, PROBE_SIZE},
    },
    core::{Transport, xml::parse_response},
    error::Result,
    file::{ensure_directory, page_file_path, write_rows_file, write_table_file},
    flatten::Table,
    progress::{NullProgress, Progress},
    query::Query,
};

/// What happened for one agency. Zero-count agencies are logged too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyLogEntry {
    pub category: DataCategory,
    pub agency: String,
    pub record_count: u64,
    pub filter_names: Vec<String>,
}

impl AgencyLogEntry {
    /// `[category, record_count, filter names...]`
    pub fn to_row(&self) -> Vec<String> {
        let mut row = row![self.category, self.record_count];
        row.extend(self.filter_names.iter().cloned());
        row
    }
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub entries: Vec<AgencyLogEntry>,
    pub files_written: Vec<PathBuf>,
}

impl RunSummary {
    /// One row per agency: `[agency, category, record_count, filter names...]`
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|e| {
                let mut row = vec![e.agency.clone()];
                row.extend(e.to_row());
                row
            })
            .collect()
    }

    pub fn total_records(&self) -> u64 {
        self.entries.iter().map(|e| e.record_count).sum()
    }
}

/// Pages to request for a reported count: `round(count / PAGE_SIZE) + 1`,
/// rounding halves to even. Zero records means zero pages.
///
/// The `+ 1` reaches the partial tail page that rounding down would miss
/// (4300 → 5 pages); when rounding goes up it costs one trailing empty page.
pub fn page_count(record_count: u64, page_size: u64) -> u64 {
    if record_count == 0 {
        return 0;
    }
    let q = record_count / page_size;
    let r = record_count % page_size;
    let twice = r * 2;
    let rounded = if twice > page_size || (twice == page_size && q % 2 == 1) { q + 1 } else { q };
    rounded + 1
}

/// 1-based `records_from` of a 0-based page.
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page * page_size + 1
}

/// Run every configured agency in order. The first error aborts the run;
/// files already written stay on disk.
pub fn run(
    opts: &RunOptions,
    transport: &dyn Transport,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let agencies = opts.normalized_agencies();
    let mut summary = RunSummary::default();

    progress.begin(agencies.len());
    ensure_directory(&opts.out_dir)?;

    for agency in &agencies {
        let (entry, mut written) = run_agency(opts, transport, agency, progress)?;
        summary.entries.push(entry);
        summary.files_written.append(&mut written);
    }

    if let Some(path) = &opts.summary_path {
        write_rows_file(path, &summary.rows())?;
        info!("Wrote summary to {}", path.display());
    }

    progress.finish();
    Ok(summary)
}

/// Probe, then fetch and write every page for one agency.
pub fn run_agency(
    opts: &RunOptions,
    transport: &dyn Transport,
    agency: &str,
    progress: &mut dyn Progress,
) -> Result<(AgencyLogEntry, Vec<PathBuf>)> {
    let criteria = opts.criteria_for(agency);

    // Probe
    let probe = Query::new(opts.category.clone(), 1, PROBE_SIZE).with_criteria(criteria.clone());
    let record_count = parse_response(&transport.post_xml(&probe.to_xml()?)?)?.record_count()?;
    debug!(agency, record_count, "probe");

    let entry = AgencyLogEntry {
        category: opts.category.clone(),
        agency: agency.to_string(),
        record_count,
        filter_names: opts.filter_names(),
    };

    let pages = page_count(record_count, PAGE_SIZE);
    if pages == 0 {
        progress.agency_skipped(agency);
        return Ok((entry, Vec::new()));
    }
    progress.agency_started(agency, record_count, pages);

    let mut tags = vec![(CATEGORY_COLUMN.to_string(), opts.category.to_string())];
    tags.extend(opts.filters.iter().map(|f| (f.name.clone(), f.value.clone())));

    let mut written = Vec::with_capacity(pages as usize);
    for page in 0..pages {
        let offset = page_offset(page, PAGE_SIZE);
        let query = Query::new(opts.category.clone(), offset, PAGE_SIZE).with_criteria(criteria.clone());
        debug!(agency, page, offset, "fetch");

        let response = parse_response(&transport.post_xml(&query.to_xml()?)?)?;
        let table = Table::from_transactions(response.transactions(), &tags);

        let path = page_file_path(&opts.out_dir, &opts.category, agency, page);
        write_table_file(&path, &table)?;

        progress.page_done(agency, page, pages, table.len(), &path);
        written.push(path);
    }

    progress.agency_done(agency, record_count);

    Ok((entry, written))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_counts_follow_half_even_rounding() {
        let cases = [
            (0, 0),
            (1, 1),
            (499, 1),
            (500, 1),
            (501, 2),
            (999, 2),
            (1000, 2),
            (1001, 2),
            (1500, 3),
            (2500, 3),
            (3500, 5),
            (4300, 5),
        ];
        for (count, expected) in cases {
            assert_eq!(page_count(count, 1000), expected, "count {count}");
        }
    }

    #[test]
    fn offsets_step_by_page_size() {
        let offsets: Vec<u64> = (0..page_count(4300, 1000)).map(|p| page_offset(p, 1000)).collect();
        assert_eq!(offsets, vec![1, 1001, 2001, 3001, 4001]);
    }

    #[test]
    fn log_entry_row_shape() {
        let entry = AgencyLogEntry {
            category: DataCategory::Budget,
            agency: s!("040"),
            record_count: 0,
            filter_names: Vec::new(),
        };
        assert_eq!(entry.to_row(), row!["Budget", "0"]);

        let summary = RunSummary {
            entries: vec![AgencyLogEntry { filter_names: row!["fiscal_year"], record_count: 12, ..entry }],
            files_written: Vec::new(),
        };
        assert_eq!(summary.rows(), vec![row!["040", "Budget", "12", "fiscal_year"]]);
        assert_eq!(summary.total_records(), 12);
    }
}
