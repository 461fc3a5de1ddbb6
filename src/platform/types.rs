//! Raw platform records
//!
//! The four collections fetched per foundation, shaped the way the platform
//! API reports them. Fields the platform may omit are `Option`s; callers
//! treat an empty string the same as an absent value.

use std::collections::HashMap;

/// One deployed application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppRecord {
    pub guid: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    /// Free-text buildpack identifier (typically a git URL for custom buildpacks)
    pub buildpack: Option<String>,
    /// GUID of the admin buildpack the platform detected during staging
    pub detected_buildpack_guid: Option<String>,
    pub space_guid: String,
    pub instances: u32,
    pub memory_mb: u32,
    pub state: String,
}

/// One admin buildpack and its uploaded artifact filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildpackRecord {
    pub guid: String,
    /// Empty when no artifact has been uploaded
    pub filename: String,
}

/// One organization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgRecord {
    pub guid: String,
    pub name: String,
}

/// One space and the organization it belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceRecord {
    pub guid: String,
    pub name: String,
    pub organization_guid: String,
}

/// The four collections of one foundation, apps in source order and the
/// rest keyed by GUID for joining
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundationSnapshot {
    pub apps: Vec<AppRecord>,
    pub buildpacks: HashMap<String, BuildpackRecord>,
    pub orgs: HashMap<String, OrgRecord>,
    pub spaces: HashMap<String, SpaceRecord>,
}

impl FoundationSnapshot {
    pub fn new(
        apps: Vec<AppRecord>,
        buildpacks: Vec<BuildpackRecord>,
        orgs: Vec<OrgRecord>,
        spaces: Vec<SpaceRecord>,
    ) -> Self {
        Self {
            apps,
            buildpacks: buildpacks.into_iter().map(|b| (b.guid.clone(), b)).collect(),
            orgs: orgs.into_iter().map(|o| (o.guid.clone(), o)).collect(),
            spaces: spaces.into_iter().map(|s| (s.guid.clone(), s)).collect(),
        }
    }
}
