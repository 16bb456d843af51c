//! Text helpers for feed descriptions and file-system checks.
//!
//! This module provides helper functions used by both pipelines:
//! - Stripping the handful of HTML tags feeds put in descriptions
//! - Character-based truncation with a word-boundary back-off
//! - Output directory validation

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Maximum description length, in characters, before truncation kicks in.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Remove paragraph tags and turn line breaks into spaces.
///
/// Only `<p>`, `</p>`, `<br>` and `<br/>` are handled. Anything else is left
/// in place; this is not an HTML sanitizer.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_basic_html("<p>a<br>b</p>"), "a b");
/// ```
pub fn strip_basic_html(s: &str) -> String {
    s.replace("<p>", "")
        .replace("</p>", "")
        .replace("<br>", " ")
        .replace("<br/>", " ")
}

/// Return the first `max` characters of `s`.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Truncate a description longer than `max` characters.
///
/// The text is cut at `max` characters, then backed off to the last
/// whitespace in that prefix (when there is one) and `"..."` is appended.
/// Strings of at most `max` characters come back unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_description("one two three", 9), "one two...");
/// assert_eq!(truncate_description("short", 200), "short");
/// ```
pub fn truncate_description(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head = take_chars(s, max);
    let kept = match head.rsplit_once(char::is_whitespace) {
        Some((before, _)) => before,
        None => head,
    };
    format!("{kept}...")
}

/// Strip basic tags then truncate to [`DESCRIPTION_MAX_CHARS`].
pub fn clean_description(raw: &str) -> String {
    truncate_description(&strip_basic_html(raw), DESCRIPTION_MAX_CHARS)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // A plain sync create gives the simplest error surface
    let scratch = path.join("..__write_test__");
    match stdfs::File::create(&scratch) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
