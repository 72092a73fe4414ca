// src/file.rs

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::config::DataCategory;
use crate::config::consts::{PAGE_FILE_EXT, PAGE_FILE_TAG};
use crate::core::sanitize::sanitize_file_part;
use crate::csv::{write_ragged, write_table};
use crate::error::{Error, Result};
use crate::flatten::Table;

/// `<category>_<agency>_ITERATION_<page>.csv`
///
/// The same (category, agency, page) always maps to the same name, so a
/// re-run replaces earlier output instead of adding to it.
pub fn page_file_name(category: &DataCategory, agency: &str, page: u64) -> String {
    let cat = sanitize_file_part(category.as_str(), "category");
    let agency = sanitize_file_part(agency, "agency");
    join!(cat, "_", agency, "_", PAGE_FILE_TAG, "_", page.to_string(), ".", PAGE_FILE_EXT)
}

pub fn page_file_path(dir: &Path, category: &DataCategory, agency: &str, page: u64) -> PathBuf {
    dir.join(page_file_name(category, agency, page))
}

/// Create/truncate `path` and write the table, header first.
pub fn write_table_file(path: &Path, table: &Table) -> Result<()> {
    ensure_parent(path)?;
    let out = BufWriter::new(File::create(path)?); // truncate/overwrite
    write_table(out, table)
}

/// Ragged rows, no header; see `runner::AgencyLogEntry::to_row`.
pub fn write_rows_file(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    ensure_parent(path)?;
    let out = BufWriter::new(File::create(path)?);
    write_ragged(out, rows)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
