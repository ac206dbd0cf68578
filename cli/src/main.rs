//! `ouija`: the command-line front end over `ouija_core`.
//!
//! Reads a query document, resolves it, and drives a search to completion
//! (or cancellation), writing one CSV row per accepted seed to stdout
//! (spec §6).

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ouija_core::config::SearchParams;
use ouija_core::driver::{CancellationToken, SearchDriver};
use ouija_core::query::load::resolve_json;
use ouija_core::seed::Seed;

/// Seed-search over a deckbuilder's procedurally generated per-ante content.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the query document (JSON).
    query: PathBuf,

    /// Minimum total score a result must reach to be printed.
    #[arg(long, default_value_t = 0)]
    cutoff: i64,

    /// Worker thread count for the seed-space partition. 0 lets rayon pick.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// First seed to probe; the search walks forward from here.
    #[arg(long, default_value = "00000000")]
    start: String,

    /// Stop after this many results. Unset runs until the seed space is
    /// exhausted.
    #[arg(long)]
    count: Option<u64>,

    /// Increase log verbosity. Repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn install_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "ouija_core=info,ouija_cli=info",
        1 => "ouija_core=debug,ouija_cli=debug",
        _ => "ouija_core=trace,ouija_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    let start = match args.start.parse::<Seed>() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid --start seed {:?}: {e}", args.start);
            return ExitCode::FAILURE;
        }
    };

    let text = match std::fs::read_to_string(&args.query) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("failed to read {}: {e}", args.query.display());
            return ExitCode::FAILURE;
        }
    };

    let config = match resolve_json(&text) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("query error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let params = SearchParams {
        cutoff: args.cutoff,
        threads: args.threads,
        start,
        count: args.count,
    };

    info!(
        must = config.must.len(),
        must_not = config.must_not.len(),
        should = config.should.len(),
        threads = params.threads,
        "starting search"
    );

    let cancel = CancellationToken::new();
    let driver = SearchDriver::new(config, params, cancel);
    let results = match driver.run() {
        Ok(rx) => rx,
        Err(e) => {
            eprintln!("search error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut accepted = 0u64;
    for result in results.iter() {
        if let Err(e) = writeln!(out, "{}", result.to_csv_row()) {
            eprintln!("failed writing result row: {e}");
            return ExitCode::FAILURE;
        }
        accepted += 1;
    }
    if let Err(e) = out.flush() {
        eprintln!("failed flushing output: {e}");
        return ExitCode::FAILURE;
    }

    info!(accepted, "search complete");
    ExitCode::SUCCESS
}
