//! HTTP server
//!
//! - `cache`: the scrape cache with single-flight refresh
//! - `router`: route definitions and handlers

pub mod cache;
pub mod router;

pub use cache::ReportCache;
pub use router::build_router;

use std::sync::Arc;

use chrono::Duration;
use indexmap::IndexMap;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{self, SCRAPE_MAX_AGE_SECS};
use crate::platform::client::FoundationClient;
use crate::platform::cloud_controller::CloudControllerClient;
use crate::report::aggregate::Aggregator;

/// Wire up clients from the environment and serve until shutdown
pub async fn run(port: u16) -> anyhow::Result<()> {
    let foundations = config::foundations_from_env()?;

    let clients: IndexMap<String, Arc<dyn FoundationClient>> = foundations
        .into_iter()
        .map(|foundation| {
            info!("Configured foundation {} at {}", foundation.name, foundation.api_url);
            let client = CloudControllerClient::new(
                foundation.api_url,
                foundation.username,
                foundation.password,
            );
            (foundation.name, Arc::new(client) as Arc<dyn FoundationClient>)
        })
        .collect();

    let aggregator = Aggregator::new(clients);
    let cache = Arc::new(ReportCache::new(
        aggregator,
        Duration::seconds(SCRAPE_MAX_AGE_SECS),
    ));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Starting app on port {}", port);
    axum::serve(listener, build_router(cache)).await?;

    Ok(())
}
