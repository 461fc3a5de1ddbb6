//! Per-foundation report assembly
//!
//! Joins one foundation's four collections into application rows: resolves
//! each app's buildpack, drops apps whose space or organization is missing,
//! normalizes timestamps, and computes staleness.

use chrono::{DateTime, Duration, Utc};

use crate::config::STALE_APP_MIN_AGE_DAYS;
use crate::platform::types::{AppRecord, FoundationSnapshot};
use crate::report::buildpacks::resolve_buildpacks;
use crate::report::error::ReportError;
use crate::report::model::{Application, Buildpack};

/// Assemble one foundation's application rows, preserving source order.
///
/// Apps referencing a space or organization absent from the fetched
/// collections are dropped without error. An unparsable app timestamp
/// aborts the assembly.
pub fn build_app_list(
    snapshot: &FoundationSnapshot,
    now: DateTime<Utc>,
    foundation_name: &str,
) -> Result<Vec<Application>, ReportError> {
    let buildpacks = resolve_buildpacks(&snapshot.buildpacks)?;

    let mut apps = Vec::new();
    for record in &snapshot.apps {
        let updated_at = last_activity(record)?;

        let buildpack = match non_empty(&record.detected_buildpack_guid) {
            Some(guid) => buildpacks
                .get(guid)
                .cloned()
                .unwrap_or_else(Buildpack::deleted),
            None => match non_empty(&record.buildpack) {
                Some(identifier) => Buildpack::custom(identifier.to_string()),
                None => Buildpack::undetected(),
            },
        };

        let Some(space) = snapshot.spaces.get(&record.space_guid) else {
            continue;
        };
        let Some(org) = snapshot.orgs.get(&space.organization_guid) else {
            continue;
        };

        let is_stale = now - updated_at >= Duration::days(STALE_APP_MIN_AGE_DAYS);

        apps.push(Application {
            name: record.name.clone(),
            updated_at: updated_at.format("%Y-%m-%d").to_string(),
            buildpack,
            is_stale,
            foundation: foundation_name.to_string(),
            org: org.name.clone(),
            space: space.name.clone(),
            instances: record.instances,
            memory_mb: record.memory_mb,
            state: record.state.to_lowercase(),
        });
    }

    Ok(apps)
}

/// The app's update timestamp, falling back to the creation timestamp when
/// the platform reports no update
fn last_activity(record: &AppRecord) -> Result<DateTime<Utc>, ReportError> {
    let raw = non_empty(&record.updated_at).unwrap_or(&record.created_at);
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// Treats an empty string the same as an absent value
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
