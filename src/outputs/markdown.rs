//! Markdown output for the press review.

use super::dated_path;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write the digest Markdown to `{dir}/actu_{date}.md` and return its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %date))]
pub async fn write_digest(
    markdown: &str,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dated_path(dir, date, "md");
    fs::write(&path, markdown).await?;
    info!(path = %path.display(), bytes = markdown.len(), "Wrote press review");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_digest_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        write_digest("old", tmp.path(), date).await.unwrap();
        let path = write_digest("# REVUE DE PRESSE — 10 January 2026\n", tmp.path(), date)
            .await
            .unwrap();

        assert_eq!(path, tmp.path().join("actu_2026-01-10.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# REVUE DE PRESSE — 10 January 2026\n");
    }
}
