//! Cloud Controller API client
//!
//! Talks to one foundation's Cloud Controller v2 API: discovers the
//! authorization endpoint from `/v2/info`, obtains a UAA password-grant
//! token, and pages through the four list endpoints with a bearer token.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::platform::client::FoundationClient;
use crate::platform::error::ClientError;
use crate::platform::types::{AppRecord, BuildpackRecord, OrgRecord, SpaceRecord};

/// Page size for list endpoints
const RESULTS_PER_PAGE: u32 = 100;

/// Tokens within this many seconds of expiry count as expired
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 10;

/// Cloud Controller client for one foundation
pub struct CloudControllerClient {
    client: Client,
    api_url: String,
    username: String,
    password: String,
    token: RwLock<Option<SessionToken>>,
}

/// A UAA access token and its computed expiry
struct SessionToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > now
    }
}

impl CloudControllerClient {
    pub fn new(api_url: String, username: String, password: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            username,
            password,
            token: RwLock::new(None),
        }
    }

    /// Discover the authorization endpoint and exchange credentials for a
    /// fresh access token
    async fn request_token(&self) -> Result<SessionToken, ClientError> {
        let info_url = format!("{}/v2/info", self.api_url);
        debug!("Discovering authorization endpoint: {}", info_url);

        let response = self.client.get(&info_url).send().await?;
        if !response.status().is_success() {
            warn!("Info endpoint returned status {}", response.status());
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url: info_url,
            });
        }
        let info: InfoResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let token_url = format!("{}/oauth/token", info.authorization_endpoint);
        debug!("Requesting token from {}", token_url);

        let params = [
            ("grant_type", "password"),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];
        let response = self
            .client
            .post(&token_url)
            .basic_auth("cf", Some(""))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Auth {
                api_url: self.api_url.clone(),
                reason: format!("token endpoint returned status {}", response.status()),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        Ok(SessionToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }

    async fn bearer(&self) -> Result<String, ClientError> {
        match self.token.read().await.as_ref() {
            Some(token) => Ok(token.access_token.clone()),
            None => Err(ClientError::Auth {
                api_url: self.api_url.clone(),
                reason: "no session token; reauthenticate first".to_string(),
            }),
        }
    }

    /// Fetch every resource behind a list endpoint, following `next_url`
    /// until the last page
    async fn fetch_all_pages<E>(&self, path: &str) -> Result<Vec<Resource<E>>, ClientError>
    where
        E: DeserializeOwned,
    {
        let bearer = self.bearer().await?;
        let mut resources = Vec::new();
        let mut next = Some(format!("{path}?results-per-page={RESULTS_PER_PAGE}"));

        while let Some(path_and_query) = next {
            let url = format!("{}{}", self.api_url, path_and_query);
            debug!("Fetching {}", url);

            let response = self.client.get(&url).bearer_auth(&bearer).send().await?;

            if response.status() == reqwest::StatusCode::UNAUTHORIZED {
                return Err(ClientError::Auth {
                    api_url: self.api_url.clone(),
                    reason: "session token rejected".to_string(),
                });
            }
            if !response.status().is_success() {
                warn!("{} returned status {}", url, response.status());
                return Err(ClientError::Status {
                    status: response.status().as_u16(),
                    url,
                });
            }

            let page: Page<E> = response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            resources.extend(page.resources);
            next = page.next_url;
        }

        Ok(resources)
    }
}

#[async_trait]
impl FoundationClient for CloudControllerClient {
    async fn reauthenticate(&self) -> Result<(), ClientError> {
        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref() {
                if token.is_valid_at(Utc::now()) {
                    return Ok(());
                }
            }
        }

        let token = self.request_token().await?;
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<AppRecord>, ClientError> {
        let resources: Vec<Resource<AppEntity>> = self.fetch_all_pages("/v2/apps").await?;
        Ok(resources
            .into_iter()
            .map(|r| AppRecord {
                guid: r.metadata.guid,
                name: r.entity.name,
                created_at: r.metadata.created_at,
                updated_at: r.metadata.updated_at,
                buildpack: r.entity.buildpack,
                detected_buildpack_guid: r.entity.detected_buildpack_guid,
                space_guid: r.entity.space_guid,
                instances: r.entity.instances,
                memory_mb: r.entity.memory,
                state: r.entity.state,
            })
            .collect())
    }

    async fn list_buildpacks(&self) -> Result<Vec<BuildpackRecord>, ClientError> {
        let resources: Vec<Resource<BuildpackEntity>> =
            self.fetch_all_pages("/v2/buildpacks").await?;
        Ok(resources
            .into_iter()
            .map(|r| BuildpackRecord {
                guid: r.metadata.guid,
                filename: r.entity.filename.unwrap_or_default(),
            })
            .collect())
    }

    async fn list_organizations(&self) -> Result<Vec<OrgRecord>, ClientError> {
        let resources: Vec<Resource<OrgEntity>> =
            self.fetch_all_pages("/v2/organizations").await?;
        Ok(resources
            .into_iter()
            .map(|r| OrgRecord {
                guid: r.metadata.guid,
                name: r.entity.name,
            })
            .collect())
    }

    async fn list_spaces(&self) -> Result<Vec<SpaceRecord>, ClientError> {
        let resources: Vec<Resource<SpaceEntity>> = self.fetch_all_pages("/v2/spaces").await?;
        Ok(resources
            .into_iter()
            .map(|r| SpaceRecord {
                guid: r.metadata.guid,
                name: r.entity.name,
                organization_guid: r.entity.organization_guid,
            })
            .collect())
    }
}

/// `/v2/info` response (only the field we need)
#[derive(Debug, Deserialize)]
struct InfoResponse {
    authorization_endpoint: String,
}

/// UAA token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Paginated list envelope
#[derive(Debug, Deserialize)]
struct Page<E> {
    next_url: Option<String>,
    resources: Vec<Resource<E>>,
}

#[derive(Debug, Deserialize)]
struct Resource<E> {
    metadata: Metadata,
    entity: E,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    guid: String,
    created_at: String,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppEntity {
    name: String,
    space_guid: String,
    instances: u32,
    memory: u32,
    state: String,
    #[serde(default)]
    buildpack: Option<String>,
    #[serde(default)]
    detected_buildpack_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildpackEntity {
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrgEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpaceEntity {
    name: String,
    organization_guid: String,
}
