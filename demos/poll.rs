// SPDX-License-Identifier: MPL-2.0

//! Panel polling example.
//!
//! Loads a panel configuration from a JSON file, polls the panel and prints
//! the resolved alarm state.
//!
//! # Usage
//!
//! ```bash
//! # Poll once
//! cargo run --example poll -- panel.json
//!
//! # Poll every 30 seconds and print every event
//! cargo run --example poll -- panel.json 30
//!
//! # With debug logging
//! RUST_LOG=elkron_lib=debug cargo run --example poll -- panel.json
//! ```
//!
//! # Configuration
//!
//! ```json
//! {
//!     "name": "Home",
//!     "host": "192.168.1.20",
//!     "username": "installer",
//!     "password": "secret",
//!     "states": [
//!         {"name": "armed_away", "zones": "1,2,3"},
//!         {"name": "armed_home", "zones": "1"}
//!     ]
//! }
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use elkron_lib::panel::{AlarmControl, AlarmPanel, spawn_poller};
use elkron_lib::{PanelConfig, PanelEvent};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(config_path) = args.get(1) else {
        eprintln!("Usage: {} <config.json> [interval_secs]", args[0]);
        std::process::exit(1);
    };

    let config = PanelConfig::load(config_path)?;
    let panel = Arc::new(AlarmPanel::from_config(&config)?);

    match args.get(2) {
        None => poll_once(&panel).await,
        Some(secs) => watch(panel, Duration::from_secs(secs.parse()?)).await,
    }
}

async fn poll_once(panel: &AlarmPanel<elkron_lib::HttpGateway>) -> Result<(), Box<dyn std::error::Error>> {
    let state = panel.update().await?;
    println!("{}: {state}", panel.name());

    let attributes = panel.attributes();
    if let Some(snapshot) = attributes.snapshot() {
        for zone in snapshot.structure() {
            let active = snapshot
                .active_zones()
                .is_some_and(|zones| zones.contains(zone.zone_id));
            println!("  zone {:>3} {:<24} {}", zone.zone_id, zone.name, if active { "armed" } else { "-" });
        }
    }
    Ok(())
}

async fn watch(
    panel: Arc<AlarmPanel<elkron_lib::HttpGateway>>,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = panel.events().subscribe();
    let poller = spawn_poller(Arc::clone(&panel), period);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PanelEvent::StateChanged { previous, current, at, .. }) => {
                    println!("[{at}] {previous} -> {current}");
                }
                Ok(PanelEvent::AvailabilityChanged { available, error, at, .. }) => {
                    println!("[{at}] available: {available} {}", error.unwrap_or_default());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Event stream lagged"),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.stop();
    Ok(())
}
