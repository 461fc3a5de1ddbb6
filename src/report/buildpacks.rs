//! Buildpack resolution for one foundation
//!
//! Turns the fetched buildpack records into report buildpacks: every
//! artifact filename is parsed, the versions observed per buildpack name
//! form a freshness ladder, and each buildpack is scored against the
//! ladder for its name.

use std::collections::HashMap;

use crate::buildpack::{FilenameParser, VersionLadder, is_deprecated};
use crate::platform::types::BuildpackRecord;
use crate::report::error::ReportError;
use crate::report::model::Buildpack;

/// Resolve one foundation's buildpacks, keyed by GUID.
///
/// A single unrecognized filename fails the whole resolution.
pub fn resolve_buildpacks(
    records: &HashMap<String, BuildpackRecord>,
) -> Result<HashMap<String, Buildpack>, ReportError> {
    let parser = FilenameParser::new();

    let mut parsed = HashMap::new();
    for (guid, record) in records {
        parsed.insert(guid.clone(), parser.parse(&record.filename)?);
    }

    let mut versions_by_name: HashMap<String, Vec<String>> = HashMap::new();
    for filename in parsed.values() {
        versions_by_name
            .entry(filename.name.clone())
            .or_default()
            .push(filename.version.clone());
    }

    let ladders: HashMap<String, VersionLadder> = versions_by_name
        .into_iter()
        .map(|(name, versions)| (name, VersionLadder::new(versions)))
        .collect();

    let mut buildpacks = HashMap::new();
    for (guid, filename) in parsed {
        let freshness = ladders
            .get(&filename.name)
            .map_or(0, |ladder| ladder.freshness(&filename.version));
        buildpacks.insert(
            guid,
            Buildpack {
                freshness,
                is_deprecated: is_deprecated(&filename.version, freshness),
                name: filename.name,
                version: filename.version,
            },
        );
    }

    Ok(buildpacks)
}
