// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::config::{DataCategory, Filter, RunOptions};
use crate::core::HttpTransport;
use crate::error::Result;
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};

/// Download Checkbook NYC transactions into paginated CSV files.
///
/// Options not given on the command line come from `--config`, then from
/// built-in defaults (Budget, agency 040, ./out).
#[derive(Parser, Debug)]
#[command(name = "checkbook_scrape", version, about)]
pub struct Args {
    /// JSON config file (same keys as the flags below)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Type of data: Contracts, Budget, Revenue, Payroll, Spending, Spending_OGE, Contracts_OGE
    #[arg(short = 't', long = "type")]
    pub category: Option<String>,

    /// Agency code(s); repeat or comma-separate
    #[arg(short, long = "agency", value_delimiter = ',')]
    pub agencies: Vec<String>,

    /// Search criteria as NAME=VALUE; repeatable, sent in the given order
    #[arg(short, long = "filter")]
    pub filters: Vec<Filter>,

    /// Output directory for page files
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub endpoint: Option<String>,

    /// Criteria name used to send the agency code
    #[arg(long, conflicts_with = "no_agency_criteria")]
    pub agency_criteria: Option<String>,

    /// Send only the configured filters, not the agency code
    #[arg(long)]
    pub no_agency_criteria: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write the per-agency record counts to this CSV file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Also append log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the known data categories and exit
    #[arg(long)]
    pub list_categories: bool,
}

impl Args {
    /// Layer flags over the config file (if any) over defaults.
    pub fn resolve(&self) -> Result<RunOptions> {
        let mut opts = match &self.config {
            Some(path) => RunOptions::from_json_file(path)?,
            None => RunOptions::default(),
        };

        if let Some(c) = &self.category {
            opts.category = DataCategory::from(c.clone());
        }
        if !self.agencies.is_empty() {
            opts.agencies = self.agencies.clone();
        }
        if !self.filters.is_empty() {
            opts.filters = self.filters.clone();
        }
        if let Some(o) = &self.out {
            opts.out_dir = o.clone();
        }
        if let Some(e) = &self.endpoint {
            opts.endpoint = e.clone();
        }
        if self.no_agency_criteria {
            opts.agency_criteria = None;
        } else if let Some(a) = &self.agency_criteria {
            opts.agency_criteria = Some(a.clone());
        }
        if self.timeout.is_some() {
            opts.timeout_secs = self.timeout;
        }
        if self.summary.is_some() {
            opts.summary_path = self.summary.clone();
        }
        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose, args.log_file.as_deref())?;

    if args.list_categories {
        for c in DataCategory::KNOWN {
            println!("{c}");
        }
        return Ok(());
    }

    let opts = args.resolve()?;
    if let Ok(json) = serde_json::to_string(&opts) {
        debug!(options = %json, "resolved");
    }
    let transport = HttpTransport::new(opts.endpoint.as_str(), opts.timeout())?;
    info!(
        "Fetching {} for agencies {:?} into {}",
        opts.category,
        opts.normalized_agencies(),
        opts.out_dir.display()
    );

    let mut progress = LogProgress;
    let summary = runner::run(&opts, &transport, Some(&mut progress))?;
    report(&summary);
    Ok(())
}

fn report(summary: &RunSummary) {
    for row in summary.rows() {
        info!("{}", row.join(","));
    }
    info!(
        "Done: {} agencies, {} records reported, {} files written",
        summary.entries.len(),
        summary.total_records(),
        summary.files_written.len()
    );
}
