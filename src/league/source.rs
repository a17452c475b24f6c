use async_trait::async_trait;
use chrono::Utc;
use std::fmt;

use super::models::{ScoreboardSnapshot, StandingsSnapshot};
use super::LeagueError;

/// Which upstream league feed to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeagueEndpoint {
    #[default]
    Standings,
    Scoreboard,
}

impl LeagueEndpoint {
    /// Map the `endpoint` query parameter; anything unrecognised reads standings.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("scoreboard") => LeagueEndpoint::Scoreboard,
            _ => LeagueEndpoint::Standings,
        }
    }

    /// Upstream API method name.
    pub fn path(self) -> &'static str {
        match self {
            LeagueEndpoint::Standings => "FetchLeagueStandings",
            LeagueEndpoint::Scoreboard => "FetchLeagueScoreboard",
        }
    }
}

impl fmt::Display for LeagueEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueEndpoint::Standings => f.write_str("standings"),
            LeagueEndpoint::Scoreboard => f.write_str("scoreboard"),
        }
    }
}

/// Anything that can serve the league's standings and scoreboard JSON.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    /// Raw upstream JSON for the endpoint, unmodified.
    async fn fetch(&self, endpoint: LeagueEndpoint) -> Result<serde_json::Value, LeagueError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;

    async fn standings(&self) -> Result<StandingsSnapshot, LeagueError> {
        let raw = self.fetch(LeagueEndpoint::Standings).await?;
        StandingsSnapshot::from_json(raw, Utc::now())
    }

    async fn scoreboard(&self) -> Result<ScoreboardSnapshot, LeagueError> {
        let raw = self.fetch(LeagueEndpoint::Scoreboard).await?;
        ScoreboardSnapshot::from_json(raw, Utc::now())
    }
}
