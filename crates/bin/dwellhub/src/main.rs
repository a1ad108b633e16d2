//! # dwellhub — inventory runner
//!
//! Composition root that wires all crates together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Build the in-memory store with the configured id strategy
//! - Construct repositories and application services
//! - Seed the configured inventory and print a report
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod report;
mod seed;
mod wiring;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::wiring::Services;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.logging.filter)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!(?config.ids, "configuration loaded");

    let store = wiring::store(&config.ids);
    let services = Services::new(&store);
    let summary = seed::seed(&config.inventory, &services)?;
    tracing::info!(
        devices = summary.devices,
        hubs = summary.hubs,
        dwellings = summary.dwellings,
        "inventory seeded"
    );

    print!("{}", report::render(&services)?);
    Ok(())
}
