use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use spacetrouble_core::provider::LaunchProvider;
use spacetrouble_core::repository::{CollaboratorError, CollaboratorResult};
use spacetrouble_core::{Launchpad, UpcomingLaunch};
use tracing::debug;

use crate::dto::{LaunchDto, LaunchpadDto};

pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/";

const LAUNCHPADS_PATH: &str = "v4/launchpads";
const UPCOMING_LAUNCHES_PATH: &str = "v5/launches/upcoming";

/// SpaceX REST API client. Owns transport concerns only.
#[derive(Clone)]
pub struct SpacexClient {
    client: Client,
    base_url: String,
}

impl SpacexClient {
    /// Build a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CollaboratorResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(CollaboratorError::io)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Upstream { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(CollaboratorError::io)?;
        serde_json::from_slice(&body)
            .map_err(|err| CollaboratorError::Decode(format!("invalid payload from {}: {}", url, err)))
    }
}

#[async_trait]
impl LaunchProvider for SpacexClient {
    async fn list_launchpads(&self) -> CollaboratorResult<Vec<Launchpad>> {
        let pads: Vec<LaunchpadDto> = self.get_json(LAUNCHPADS_PATH).await?;
        Ok(pads.into_iter().map(Launchpad::from).collect())
    }

    async fn list_upcoming_launches(&self) -> CollaboratorResult<Vec<UpcomingLaunch>> {
        let launches: Vec<LaunchDto> = self.get_json(UPCOMING_LAUNCHES_PATH).await?;
        Ok(launches.into_iter().filter_map(LaunchDto::into_upcoming).collect())
    }
}
