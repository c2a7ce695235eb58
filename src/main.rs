//! london-times: print a day's prayer times from the lookup table.
//!
//! 1. Loads config (.env, config.toml, env vars)
//! 2. Builds the lookup store (bundled table or `data_path`)
//! 3. Looks up the requested date
//! 4. Prints wall-clock times with their adjusted UTC instants

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, SecondsFormat, Utc};
use clap::Parser;
use serde_json::json;
use tracing::{error, info};

use london_times::{Converter, DateComponents, DefaultSource, LookupStore, Prayer};

/// London prayer-time lookup
#[derive(Parser)]
#[command(name = "london-times", about = "Look up published prayer times for a date")]
struct Cli {
    /// Date to look up (YYYY-MM-DD). Defaults to today in the configured zone.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// JSON table to load instead of the configured default.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Print the record and instants as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "london_times=info,common=info".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, common::Error> {
    let config = config::load_config()?;
    let converter = Converter::from_name(&config.zone)?;

    let store = match &cli.data {
        Some(path) => {
            let store = LookupStore::with_source(DefaultSource::None);
            store.load_str(&std::fs::read_to_string(path)?)?;
            store
        }
        None => LookupStore::from_config(&config),
    };

    let date = cli
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&converter.zone()).date_naive());
    let query = DateComponents::from(date);

    let record = match store.require(&query) {
        Ok(record) => record,
        Err(e) if e.is_invalid_data() => {
            error!("Prayer-time table has a bad entry: {}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let resolved = london_times::resolve(&record, &query, &converter, &config.adjustments);

    if cli.json {
        let out = json!({
            "city": store.city().unwrap_or_else(|| config.city.clone()),
            "zone": config.zone,
            "record": record,
            "instants": resolved,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    info!("Prayer times for {} ({})", date, config.zone);
    println!("{} {}", config.city, record.date());
    for prayer in Prayer::ALL {
        let instant = resolved
            .map(|day| day.time(prayer).to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".into());
        println!("  {:<8} {}  {}", prayer.as_str(), record.time(prayer), instant);
    }

    Ok(ExitCode::SUCCESS)
}
