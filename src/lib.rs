// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;

pub mod csv;
pub mod file;
pub mod flatten;
pub mod log;
pub mod progress;
pub mod query;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{DataCategory, Filter, RunOptions};
pub use error::{Error, Result};
pub use runner::{AgencyLogEntry, RunSummary, run};
