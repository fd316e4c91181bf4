//! Seller Panel report
//!
//! Prints the listing and order tables for a fixture set.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to evaluate at a fixed RFC 3339 timestamp instead of the system clock
//! Use `-p` to load a YAML policy overriding the default thresholds

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use jiff::Timestamp;
use seller_panel::{
    fixtures::Fixture,
    policy::ListingPolicy,
    report::{write_listing_report, write_order_report},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments for the report
#[derive(Debug, Parser)]
#[command(name = "seller-panel", about = "Listing and order report for a fixture set")]
struct Args {
    /// Fixture set to report on
    #[arg(short, long, default_value = "panel")]
    fixture: String,

    /// Evaluate as of this RFC 3339 timestamp
    #[arg(short, long)]
    now: Option<Timestamp>,

    /// Policy YAML file
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Default log level when `RUST_LOG` is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    let policy = match &args.policy {
        Some(path) => ListingPolicy::from_yaml_file(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => ListingPolicy::default(),
    };

    let fixture = Fixture::from_set(&args.fixture)
        .with_context(|| format!("loading fixture set {}", args.fixture))?;

    let now = args.now.unwrap_or_else(Timestamp::now);

    info!(
        fixture = %args.fixture,
        %now,
        listings = fixture.listings().len(),
        orders = fixture.orders().len(),
        "writing report"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_listing_report(&mut handle, fixture.listings(), now, &policy)?;
    write_order_report(&mut handle, fixture.orders())?;

    Ok(())
}
