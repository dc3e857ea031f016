//! `optigence` CLI — meeting slot proposals, intent routing and entity extraction.
//!
//! ## Usage
//!
//! ```sh
//! # Propose meeting slots (request JSON on stdin, proposal JSON on stdout)
//! optigence propose < request.json
//!
//! # With a calendar busy list and stored preferences
//! optigence propose -i request.json --busy busy.json --preferences prefs.json
//!
//! # Pin the response timestamp
//! optigence propose -i request.json --now 2026-03-15T12:00:00Z
//!
//! # Which assistant module should handle this text?
//! optigence classify "book a flight to Lisbon"
//!
//! # Pull emails, dates, times, durations and amounts out of text
//! echo "30 min call with dana@example.com tomorrow at 3pm" | optigence extract
//! ```
//!
//! Exit status: 0 on success, 2 for an invalid request, 3 when a calendar or
//! preference collaborator fails, 1 for anything else.

mod providers;

use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use intent_engine::{EntityExtractor, IntentClassifier, TtlCache};
use slot_engine::{propose_slots, MeetingRequest, SchedulingError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::providers::{FileCalendar, FilePreferences};

#[derive(Parser)]
#[command(
    name = "optigence",
    version,
    about = "Optigence scheduling and assistant-routing CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g., "debug", "slot_engine=trace")
    #[arg(long, global = true, env = "OPTIGENCE_LOG", default_value = "warn")]
    log_level: String,

    /// Maximum entries held by the classification/extraction cache
    #[arg(long, global = true, env = "OPTIGENCE_CACHE_CAPACITY", default_value = "256")]
    cache_capacity: NonZeroUsize,

    /// Seconds a cached classification/extraction stays valid
    #[arg(long, global = true, env = "OPTIGENCE_CACHE_TTL_SECS", default_value_t = 300)]
    cache_ttl_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Propose meeting slots for a request
    Propose {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON array of busy intervals reported by the calendar
        #[arg(long)]
        busy: Option<PathBuf>,
        /// JSON file with the user's scheduling preferences
        #[arg(long)]
        preferences: Option<PathBuf>,
        /// Result cap used when the request does not set `max_results`
        #[arg(long, env = "OPTIGENCE_MAX_RESULTS")]
        max_results: Option<usize>,
        /// Timestamp for the response (defaults to the current time)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Classify text into an assistant intent
    Classify {
        /// Text to classify (reads --input or stdin if omitted)
        text: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Extract entities from text
    Extract {
        /// Text to analyze (reads --input or stdin if omitted)
        text: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        let code = match err.downcast_ref::<SchedulingError>() {
            Some(e) if e.is_client_error() => 2,
            Some(_) => 3,
            None => 1,
        };
        process::exit(code);
    }
}

/// Install the stderr subscriber. An unparseable directive falls back to `warn`
/// and says so.
fn init_tracing(directive: &str) {
    let (filter, rejected) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("warn"), Some(e)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    if let Some(e) = rejected {
        warn!(directive, error = %e, "invalid log filter, using \"warn\"");
    }
}

fn run(cli: Cli) -> Result<()> {
    let ttl = Duration::from_secs(cli.cache_ttl_secs);

    match cli.command {
        Commands::Propose {
            input,
            output,
            busy,
            preferences,
            max_results,
            now,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut request = MeetingRequest::from_json(&raw)?;
            if request.max_results.is_none() {
                request.max_results = max_results;
            }

            let now = now.unwrap_or_else(Utc::now);
            let proposal = propose_slots(
                &request,
                &FileCalendar::new(busy),
                &FilePreferences::new(preferences),
                now,
            )?;
            info!(
                slots = proposal.slots.len(),
                considered = proposal.candidates_considered,
                "proposal ready"
            );

            let json = serde_json::to_string_pretty(&proposal)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Classify { text, input } => {
            let text = text_argument(text, input.as_deref())?;
            let classifier = IntentClassifier::new(TtlCache::new(cli.cache_capacity, ttl))
                .context("Failed to build intent classifier")?;
            let classification = classifier.classify(&text);
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Commands::Extract { text, input } => {
            let text = text_argument(text, input.as_deref())?;
            let extractor = EntityExtractor::new(TtlCache::new(cli.cache_capacity, ttl))
                .context("Failed to build entity extractor")?;
            let entities = extractor.extract(&text);
            println!("{}", serde_json::to_string_pretty(&entities)?);
        }
    }

    Ok(())
}

/// Positional text wins; otherwise read `--input` or stdin.
fn text_argument(text: Option<String>, input: Option<&str>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => read_input(input),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
