//! # carsales-cli
//!
//! Command-line importer: reads the car-sale tables out of one PDF document
//! and lands the records in either a JSON export file or the SQLite store.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use carsales_import::{run_import, ImportError, JsonSink, StoreSink};
use carsales_pdf::{ExtractOptions, PageRange};
use carsales_store::CarStore;

/// carsales - extract car-sale records from PDF tables
#[derive(Parser)]
#[command(name = "carsales", version, about, long_about = None)]
struct Cli {
    /// PDF document to import
    #[arg(value_name = "PDF")]
    pdf: PathBuf,

    /// Page selector: `all`, `N-`, `N-M`, or a comma-separated list
    #[arg(short, long, default_value = "all")]
    pages: String,

    /// Upsert records into this SQLite store
    #[arg(long, value_name = "PATH", conflicts_with = "json", required_unless_present = "json")]
    db: Option<PathBuf>,

    /// Write records to this JSON file instead
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let pages: PageRange = cli
        .pages
        .parse()
        .with_context(|| format!("invalid page selector '{}'", cli.pages))?;
    let options = ExtractOptions {
        pages,
        ..Default::default()
    };

    let result = if let Some(db) = &cli.db {
        let mut store = CarStore::open(db)
            .with_context(|| format!("failed to open store at {}", db.display()))?;
        let mut sink = StoreSink::new(&mut store);
        run_import(&cli.pdf, options, &mut sink)
    } else if let Some(json) = &cli.json {
        let mut sink = JsonSink::new(json);
        run_import(&cli.pdf, options, &mut sink)
    } else {
        unreachable!("clap enforces --db or --json");
    };

    match result {
        Ok(summary) => {
            println!(
                "committed {} records ({} blocks rejected, {} rows dropped)",
                summary.records, summary.blocks_rejected, summary.rows_dropped
            );
            Ok(())
        }
        Err(err) => {
            let outcome = match &err {
                ImportError::Persistence(_) => "rolled back",
                _ => "aborted",
            };
            bail!("import {outcome}: {err}")
        }
    }
}
