//! Daily workbook persistence.
//!
//! Both workbooks live in one fixed output directory under deterministic,
//! date-derived names. Yesterday's file is located by name only — if it is
//! absent the comparison is skipped; no older file is searched for.

pub mod reader;
pub mod writer;

pub use reader::read_rankings;
pub use writer::{write_comparison, write_rankings};

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::{COMPARISON_PREFIX, RANKINGS_PREFIX};

pub fn rankings_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{RANKINGS_PREFIX}_{}.xlsx", date.format("%Y%m%d")))
}

pub fn comparison_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{COMPARISON_PREFIX}_{}.xlsx", date.format("%Y%m%d")))
}
