//! # actus
//!
//! Two small pipelines for a French morning routine:
//!
//! - **Press review**: fetch a catalog of RSS feeds, keep the last day's
//!   entries, and render a categorized, deduplicated Markdown digest together
//!   with a numbered JSON index for looking articles up later.
//! - **Match results**: turn tennis results copied from a data hub into
//!   structured [`models::MatchRecord`]s with the winner and odds resolved.
//!
//! ## Architecture
//!
//! The press review is a single sequential pass:
//! 1. **Catalog**: built-in sources or a YAML file ([`config`])
//! 2. **Fetching**: one feed at a time, failures logged and skipped ([`feeds`])
//! 3. **Rendering**: grouping, caps, dedup, numbering ([`digest`])
//! 4. **Output**: Markdown and JSON files ([`outputs`])
//!
//! The match parser ([`matches`]) is a pure function over a text blob.

pub mod cli;
pub mod config;
pub mod digest;
pub mod feeds;
pub mod matches;
pub mod models;
pub mod outputs;
pub mod utils;
