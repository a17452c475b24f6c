use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::source::{LeagueEndpoint, LeagueSource};
use super::LeagueError;

/// Client for the Fleaflicker league API, bound to a single league.
#[derive(Clone)]
pub struct FleaflickerClient {
    http: Client,
    base_url: String,
    league_id: u64,
    sport: String,
}

impl FleaflickerClient {
    pub fn new(base_url: &str, league_id: u64, sport: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FleaflickerClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            league_id,
            sport: sport.to_string(),
        })
    }

    /// Upstream URL for an endpoint, e.g.
    /// `https://www.fleaflicker.com/api/FetchLeagueScoreboard?sport=NFL&league_id=91436`.
    pub fn endpoint_url(&self, endpoint: LeagueEndpoint) -> Result<Url, LeagueError> {
        let league_id = self.league_id.to_string();
        let url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, endpoint.path()),
            &[("sport", self.sport.as_str()), ("league_id", league_id.as_str())],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl LeagueSource for FleaflickerClient {
    fn name(&self) -> &str {
        "Fleaflicker"
    }

    async fn fetch(&self, endpoint: LeagueEndpoint) -> Result<serde_json::Value, LeagueError> {
        let url = self.endpoint_url(endpoint)?;
        debug!("Fetching league {} from {}", endpoint, url);

        let resp = self.http.get(url.clone()).send().await?;

        if !resp.status().is_success() {
            return Err(LeagueError::Upstream {
                status: resp.status(),
                url: url.to_string(),
            });
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| LeagueError::MalformedPayload(format!("{} body: {}", endpoint, e)))?;
        Ok(raw)
    }
}
