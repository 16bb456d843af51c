//! Command-line entry point for actus.
//!
//! ```sh
//! actus                       # today's press review in the current directory
//! actus matches -i pasted.txt # parse copied match results
//! actus lookup 3              # print article #3 of today's review
//! ```

use actus::cli::{Cli, Command, DigestArgs, LookupArgs, MatchesArgs};
use actus::config::load_catalog;
use actus::digest::build_digest;
use actus::feeds;
use actus::matches::{SAMPLE_TEXT, parse_match_text};
use actus::outputs::{json, markdown};
use actus::utils::ensure_writable_dir;
use chrono::{Local, Utc};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    let command = args.into_command();
    debug!(?command, "Parsed CLI arguments");

    match command {
        Command::Digest(args) => {
            run_digest(args).await?;
        }
        Command::Matches(args) => run_matches(args).await?,
        Command::Lookup(args) => run_lookup(args).await?,
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Build today's press review and return the Markdown path.
#[instrument(level = "info", skip_all, fields(output_dir = %args.output_dir.display()))]
async fn run_digest(args: DigestArgs) -> Result<PathBuf, Box<dyn Error>> {
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let sources = load_catalog(args.sources.as_deref()).await?;
    let opts = args.options();
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let now = Local::now();
    info!(sources = sources.len(), "Fetching RSS feeds");
    let articles = feeds::fetch_all(&client, &sources, &opts, now.with_timezone(&Utc)).await;

    let digest = build_digest(&articles, now.naive_local(), opts.max_per_category);
    let date = now.date_naive();
    let md_path = markdown::write_digest(&digest.markdown, &args.output_dir, date).await?;
    let json_path = json::write_index(&digest.index, &args.output_dir, date).await?;

    info!(review = %md_path.display(), index = %json_path.display(), "Press review ready");
    println!("{}", md_path.display());
    Ok(md_path)
}

/// Parse match text from a file (or the built-in sample) and save the records.
#[instrument(level = "info", skip_all, fields(output = %args.output.display()))]
async fn run_matches(args: MatchesArgs) -> Result<(), Box<dyn Error>> {
    let text = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => {
            info!("No input file given; parsing the built-in sample");
            SAMPLE_TEXT.to_string()
        }
    };

    let matches = parse_match_text(&text, args.date.as_deref());
    for m in &matches {
        info!(
            tournament = %m.tournament,
            player1 = %m.player1,
            player2 = %m.player2,
            score = %m.score,
            winner = %m.winner,
            odds_player1 = ?m.odds_player1,
            odds_player2 = ?m.odds_player2,
            winner_odds = ?m.winner_odds,
            "Parsed match"
        );
    }

    json::write_matches(&matches, &args.output).await
}

/// Print one entry of a written article index.
#[instrument(level = "info", skip_all, fields(number = args.number))]
async fn run_lookup(args: LookupArgs) -> Result<(), Box<dyn Error>> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let entry = json::lookup(&args.output_dir, date, args.number).await?;

    println!("{}. [{}] {}", args.number, entry.category, entry.title);
    println!("   {}", entry.source);
    if !entry.description.is_empty() {
        println!("\n{}", entry.description);
    }
    println!("\n{}", entry.url);
    Ok(())
}
