//! Flat-file outputs for both pipelines.
//!
//! # Submodules
//!
//! - [`json`]: Article index and match records as pretty-printed JSON
//! - [`markdown`]: The rendered press review
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── actu_2026-01-10.md     # Press review
//! └── actu_2026-01-10.json   # Article index for lookup by number
//! ```
//!
//! Every write replaces the previous file.

pub mod json;
pub mod markdown;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Path of a dated output file: `{dir}/actu_{YYYY-MM-DD}.{extension}`.
pub fn dated_path(dir: &Path, date: NaiveDate, extension: &str) -> PathBuf {
    dir.join(format!("actu_{}.{}", date.format("%Y-%m-%d"), extension))
}
