use crate::config::OpenSkySettings;
use crate::domain::ports::FlightSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Body of `GET /api/states/all`. `states` is `null` when nothing is airborne
/// in the requested box.
#[derive(Debug, Deserialize)]
struct StatesResponse {
    states: Option<Vec<serde_json::Value>>,
}

pub struct OpenSkyClient {
    client: Client,
    endpoint: String,
}

impl OpenSkyClient {
    pub fn new(settings: &OpenSkySettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }
}

#[async_trait]
impl FlightSource for OpenSkyClient {
    fn name(&self) -> &str {
        "opensky"
    }

    async fn fetch_states(&self) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body: StatesResponse = response.error_for_status()?.json().await?;
        Ok(body.states.unwrap_or_default())
    }
}
