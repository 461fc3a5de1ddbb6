//! Scrape cache
//!
//! Scraping every foundation takes seconds and the report only changes as
//! fast as deployments happen, so the serialized report is cached and
//! refreshed at most once per window. Concurrent requests that find the
//! cache stale coalesce on a single scrape instead of each hitting the
//! foundations.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::report::aggregate::ReportSource;
use crate::report::error::ReportError;

struct CachedReport {
    body: String,
    fetched_at: DateTime<Utc>,
}

impl CachedReport {
    fn is_fresh_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.fetched_at < max_age
    }
}

/// Serialized report cache with single-flight refresh
pub struct ReportCache<S> {
    source: S,
    max_age: Duration,
    refresh: Mutex<()>,
    current: RwLock<Option<CachedReport>>,
}

impl<S: ReportSource> ReportCache<S> {
    pub fn new(source: S, max_age: Duration) -> Self {
        Self {
            source,
            max_age,
            refresh: Mutex::new(()),
            current: RwLock::new(None),
        }
    }

    /// Return the serialized report, scraping only if the cached copy is
    /// older than `max_age`.
    ///
    /// Callers that find the cache stale queue on the refresh lock; the
    /// first through scrapes and the rest are served its bytes. A failed
    /// scrape surfaces to its caller and leaves any previous bytes in
    /// place.
    pub async fn payload(&self, now: DateTime<Utc>) -> Result<String, ReportError> {
        if let Some(body) = self.fresh_body(now).await {
            debug!("Serving cached report");
            return Ok(body);
        }

        let _permit = self.refresh.lock().await;

        // Another caller may have refreshed while we waited on the lock
        if let Some(body) = self.fresh_body(now).await {
            debug!("Report refreshed while waiting; serving cached copy");
            return Ok(body);
        }

        info!("Cached report is stale; scraping foundations");
        let report = self.source.build_report(now).await?;
        let body = serde_json::to_string(&report)?;

        let mut current = self.current.write().await;
        *current = Some(CachedReport {
            body: body.clone(),
            fetched_at: now,
        });

        Ok(body)
    }

    async fn fresh_body(&self, now: DateTime<Utc>) -> Option<String> {
        let current = self.current.read().await;
        current
            .as_ref()
            .filter(|cached| cached.is_fresh_at(now, self.max_age))
            .map(|cached| cached.body.clone())
    }
}
