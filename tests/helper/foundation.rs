//! Foundation client test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use indexmap::IndexMap;

use foundation_lens::platform::{
    AppRecord, BuildpackRecord, ClientError, FoundationClient, OrgRecord, SpaceRecord,
};

/// In-memory foundation client serving canned collections
pub struct FakeFoundation {
    apps: Vec<AppRecord>,
    buildpacks: Vec<BuildpackRecord>,
    orgs: Vec<OrgRecord>,
    spaces: Vec<SpaceRecord>,
    apps_failure: Option<String>,
    reauth_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl FakeFoundation {
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            buildpacks: Vec::new(),
            orgs: Vec::new(),
            spaces: Vec::new(),
            apps_failure: None,
            reauth_calls: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_app(mut self, app: AppRecord) -> Self {
        self.apps.push(app);
        self
    }

    pub fn with_buildpack(mut self, guid: &str, filename: &str) -> Self {
        self.buildpacks.push(BuildpackRecord {
            guid: guid.to_string(),
            filename: filename.to_string(),
        });
        self
    }

    pub fn with_org(mut self, guid: &str, name: &str) -> Self {
        self.orgs.push(OrgRecord {
            guid: guid.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_space(mut self, guid: &str, name: &str, organization_guid: &str) -> Self {
        self.spaces.push(SpaceRecord {
            guid: guid.to_string(),
            name: name.to_string(),
            organization_guid: organization_guid.to_string(),
        });
        self
    }

    /// Make `list_applications` fail with the given message
    pub fn with_apps_failure(mut self, message: &str) -> Self {
        self.apps_failure = Some(message.to_string());
        self
    }

    /// Counter handles survive moving the fake into a router
    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::clone(&self.reauth_calls), Arc::clone(&self.fetch_calls))
    }
}

#[async_trait]
impl FoundationClient for FakeFoundation {
    async fn reauthenticate(&self) -> Result<(), ClientError> {
        self.reauth_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<AppRecord>, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.apps_failure {
            Some(message) => Err(ClientError::InvalidResponse(message.clone())),
            None => Ok(self.apps.clone()),
        }
    }

    async fn list_buildpacks(&self) -> Result<Vec<BuildpackRecord>, ClientError> {
        Ok(self.buildpacks.clone())
    }

    async fn list_organizations(&self) -> Result<Vec<OrgRecord>, ClientError> {
        Ok(self.orgs.clone())
    }

    async fn list_spaces(&self) -> Result<Vec<SpaceRecord>, ClientError> {
        Ok(self.spaces.clone())
    }
}

/// Build the aggregator input map, preserving the given foundation order
pub fn into_clients(
    foundations: Vec<(&str, FakeFoundation)>,
) -> IndexMap<String, Arc<dyn FoundationClient>> {
    foundations
        .into_iter()
        .map(|(name, foundation)| {
            (
                name.to_string(),
                Arc::new(foundation) as Arc<dyn FoundationClient>,
            )
        })
        .collect()
}
