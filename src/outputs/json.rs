//! JSON files: the article index and parsed match records.
//!
//! Files are pretty-printed UTF-8 with two-space indentation. Non-ASCII text
//! is written as-is and keys keep the field order of the models, so that a
//! file written today diffs cleanly against yesterday's.

use super::dated_path;
use crate::models::{ArticleIndex, IndexEntry, MatchRecord};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

async fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    if let Err(e) = fs::write(path, json).await {
        error!(path = %path.display(), error = %e, "Failed to write JSON");
        return Err(e.into());
    }
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Write the article index to `{dir}/actu_{date}.json` and return its path.
///
/// An existing file for the same date is overwritten.
///
/// # Errors
///
/// Returns an error if the index cannot be serialized or the file cannot be
/// written. Write failures are also logged with the target path.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %date))]
pub async fn write_index(
    index: &ArticleIndex,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dated_path(dir, date, "json");
    write_json(index, &path).await?;
    info!(path = %path.display(), entries = index.len(), "Wrote article index");
    Ok(path)
}

/// Read the article index written for `date`.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, or is not a valid index.
pub async fn read_index(dir: &Path, date: NaiveDate) -> Result<ArticleIndex, Box<dyn Error>> {
    read_json(&dated_path(dir, date, "json")).await
}

/// Look up one article by its display number.
///
/// # Arguments
///
/// * `dir` - Directory holding the digest files
/// * `date` - Digest date, selects `actu_{date}.json`
/// * `number` - 1-based number printed in the digest
///
/// # Errors
///
/// Returns an error if the index cannot be read (see [`read_index`]) or has
/// no entry for `number`.
pub async fn lookup(dir: &Path, date: NaiveDate, number: usize) -> Result<IndexEntry, Box<dyn Error>> {
    let mut index = read_index(dir, date).await?;
    index.remove(&number).ok_or_else(|| {
        format!(
            "no article #{number} in {}",
            dated_path(dir, date, "json").display()
        )
        .into()
    })
}

/// Write match records as a JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_matches(matches: &[MatchRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    write_json(matches, path).await?;
    info!(count = matches.len(), "Saved match records");
    Ok(())
}

/// Read match records written by [`write_matches`].
pub async fn read_matches(path: &Path) -> Result<Vec<MatchRecord>, Box<dyn Error>> {
    read_json(path).await
}
