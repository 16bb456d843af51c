//! Command-line interface definitions for actus.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Running the binary without a subcommand builds the digest, so the digest
//! options are also accepted at the top level.

use crate::config::DigestOptions;
use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for actus.
///
/// # Examples
///
/// ```sh
/// # Today's press review in the current directory
/// actus
///
/// # Same, written elsewhere with a custom catalog
/// actus digest -o ./revue -s sources.yaml
///
/// # Parse pasted results
/// actus matches -i pasted.txt -d 2026-01-10 -o results.json
///
/// # Show article 4 of today's review
/// actus lookup 4 -o ./revue
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub digest: DigestArgs,
}

impl Cli {
    /// The subcommand to run, defaulting to the digest.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Digest(self.digest))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the feeds and write today's press review and article index
    Digest(DigestArgs),
    /// Parse copied data-hub text into match records
    Matches(MatchesArgs),
    /// Print one article of a press review by its number
    Lookup(LookupArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DigestArgs {
    /// Directory receiving actu_<date>.md and actu_<date>.json
    #[arg(short, long, env = "ACTUS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// YAML source catalog replacing the built-in one
    #[arg(short, long, env = "ACTUS_SOURCES")]
    pub sources: Option<PathBuf>,

    /// Ignore entries older than this many hours
    #[arg(long, default_value_t = 24)]
    pub max_age_hours: u32,

    /// Entries kept per feed
    #[arg(long, default_value_t = 8)]
    pub max_items: usize,

    /// Headlines shown per category
    #[arg(long, default_value_t = 5)]
    pub max_per_category: usize,
}

impl DigestArgs {
    pub fn options(&self) -> DigestOptions {
        DigestOptions {
            max_age: Duration::hours(i64::from(self.max_age_hours)),
            max_items_per_source: self.max_items,
            max_per_category: self.max_per_category,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MatchesArgs {
    /// Text file to parse; the built-in sample when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Date label stored in every record (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// JSON file receiving the records
    #[arg(short, long, default_value = "datahub_sample.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Article number as printed in the review
    pub number: usize,

    /// Directory holding the review files
    #[arg(short, long, env = "ACTUS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Review date; today when omitted
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}
