//! platecache - command line inspection tool for the restaurant mirror
//! cache.
//!
//! Fetches the dataset (or serves it from the local store with
//! `--offline`) and prints a filtered listing.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use platecache::config::Config;
use platecache::{ApiClient, DiskStore, FetchCoordinator, RecordStore, FILTER_ALL};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn usage() -> ! {
    eprintln!("Usage: platecache [--offline] [--cuisine NAME] [--neighborhood NAME]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("platecache starting");

    let mut offline = false;
    let mut cuisine = FILTER_ALL.to_string();
    let mut neighborhood = FILTER_ALL.to_string();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offline" => offline = true,
            "--cuisine" => cuisine = args.next().unwrap_or_else(|| usage()),
            "--neighborhood" => neighborhood = args.next().unwrap_or_else(|| usage()),
            _ => usage(),
        }
    }

    let config = Config::load()?;
    let store = Arc::new(DiskStore::open(config.store_dir()?)?);
    let client = ApiClient::new(&config.base_url)?;
    let coordinator =
        FetchCoordinator::new(client, store.clone()).with_probe(move || !offline);

    let restaurants = coordinator
        .fetch_by_cuisine_and_neighborhood(&cuisine, &neighborhood)
        .await?;

    println!("{} restaurant(s)", restaurants.len());
    for r in &restaurants {
        println!(
            "  [{}] {} - {} ({})",
            r.id, r.name, r.cuisine_type, r.neighborhood
        );
    }

    if let Some(at) = store.last_refreshed()? {
        println!("store last refreshed: {}", at.to_rfc3339());
    }

    Ok(())
}
