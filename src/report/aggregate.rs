//! Multi-foundation aggregation
//!
//! Fans out the four collection fetches for every configured foundation,
//! fails the whole pass on the first error, then assembles the flat
//! application list in configuration order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use indexmap::IndexMap;
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

use crate::platform::client::FoundationClient;
use crate::platform::types::FoundationSnapshot;
use crate::report::assemble::build_app_list;
use crate::report::error::ReportError;
use crate::report::model::{AppReport, Summary};

/// Source of assembled reports; the scrape cache sits in front of one
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Build a complete report across every foundation, evaluated at `now`
    async fn build_report(&self, now: DateTime<Utc>) -> Result<AppReport, ReportError>;
}

/// Aggregates app data across the configured foundations
pub struct Aggregator {
    clients: IndexMap<String, Arc<dyn FoundationClient>>,
}

impl Aggregator {
    /// `clients` maps foundation name to client; its iteration order fixes
    /// the order foundations appear in the report
    pub fn new(clients: IndexMap<String, Arc<dyn FoundationClient>>) -> Self {
        Self { clients }
    }

    /// Fetch one foundation's four collections on parallel tasks.
    ///
    /// The session is refreshed before any fetch is dispatched. Sibling
    /// tasks of a failed fetch run to completion; their results are
    /// discarded with the rest of the pass.
    async fn fetch_snapshot(
        name: &str,
        client: Arc<dyn FoundationClient>,
    ) -> Result<FoundationSnapshot, ReportError> {
        client.reauthenticate().await?;
        debug!("Fetching collections for foundation {}", name);

        let apps = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.list_applications().await }
        });
        let buildpacks = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.list_buildpacks().await }
        });
        let orgs = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.list_organizations().await }
        });
        let spaces = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.list_spaces().await }
        });

        let (apps, buildpacks, orgs, spaces) =
            tokio::try_join!(apps, buildpacks, orgs, spaces)?;

        Ok(FoundationSnapshot::new(apps?, buildpacks?, orgs?, spaces?))
    }
}

#[async_trait]
impl ReportSource for Aggregator {
    async fn build_report(&self, now: DateTime<Utc>) -> Result<AppReport, ReportError> {
        let snapshots = try_join_all(self.clients.iter().map(|(name, client)| {
            let client = Arc::clone(client);
            async move {
                Self::fetch_snapshot(name, client)
                    .await
                    .map(|snapshot| (name, snapshot))
            }
        }))
        .await?;

        let mut apps = Vec::new();
        for (name, snapshot) in &snapshots {
            apps.extend(build_app_list(snapshot, now, name)?);
        }

        info!(
            "Assembled {} apps across {} foundations",
            apps.len(),
            snapshots.len()
        );

        Ok(AppReport {
            summary: Summary::from_apps(&apps),
            apps,
        })
    }
}
