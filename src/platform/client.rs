//! Client trait for fetching the four foundation collections

#[cfg(test)]
use mockall::automock;

use crate::platform::error::ClientError;
use crate::platform::types::{AppRecord, BuildpackRecord, OrgRecord, SpaceRecord};

/// Trait for talking to one foundation's platform API
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FoundationClient: Send + Sync {
    /// Ensures the client holds a valid session token, obtaining a fresh
    /// one when the stored token is missing or about to expire
    async fn reauthenticate(&self) -> Result<(), ClientError>;

    /// Fetches every deployed application, in the order the platform lists them
    async fn list_applications(&self) -> Result<Vec<AppRecord>, ClientError>;

    /// Fetches every admin buildpack
    async fn list_buildpacks(&self) -> Result<Vec<BuildpackRecord>, ClientError>;

    /// Fetches every organization
    async fn list_organizations(&self) -> Result<Vec<OrgRecord>, ClientError>;

    /// Fetches every space
    async fn list_spaces(&self) -> Result<Vec<SpaceRecord>, ClientError>;
}
