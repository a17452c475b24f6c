pub mod client;
pub mod models;
pub mod source;
pub mod wire;

pub use client::FleaflickerClient;
pub use source::{LeagueEndpoint, LeagueSource};

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("league request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("league API returned {status} for {url}")]
    Upstream { status: StatusCode, url: String },

    #[error("invalid league URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("malformed league payload: {0}")]
    MalformedPayload(String),
}
