use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Where matchup commentary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommentaryMode {
    /// Anthropic Messages API, with a fixed sentence when a call fails
    Ai,
    /// Built-in margin-based templates, no network
    Template,
}

/// Fantasy football league dashboard API
#[derive(Parser, Debug, Clone)]
#[command(name = "gonzo-dashboard", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Fleaflicker API base URL
    #[arg(
        long,
        env = "FLEAFLICKER_API_URL",
        default_value = "https://www.fleaflicker.com/api"
    )]
    pub fleaflicker_api_url: String,

    /// Fleaflicker league ID
    #[arg(long, env = "LEAGUE_ID", default_value = "91436")]
    pub league_id: u64,

    /// Sport tag passed to Fleaflicker
    #[arg(long, env = "LEAGUE_SPORT", default_value = "NFL")]
    pub league_sport: String,

    /// Commentary source for the casualties report
    #[arg(long, env = "COMMENTARY_MODE", value_enum, default_value = "ai")]
    pub commentary_mode: CommentaryMode,

    /// Anthropic API base URL
    #[arg(
        long,
        env = "ANTHROPIC_API_URL",
        default_value = "https://api.anthropic.com"
    )]
    pub anthropic_api_url: String,

    /// Anthropic API key (required in ai commentary mode)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Model used for commentary
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = "claude-3-haiku-20240307")]
    pub anthropic_model: String,

    /// Token budget per commentary request
    #[arg(long, env = "ANTHROPIC_MAX_TOKENS", default_value = "1024")]
    pub anthropic_max_tokens: u32,

    /// Timeout for every upstream HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.commentary_mode == CommentaryMode::Ai && self.api_key().is_none() {
            anyhow::bail!(
                "ANTHROPIC_API_KEY is required in ai commentary mode. Use --commentary-mode template to run without it."
            );
        }
        if self.fleaflicker_api_url.trim().is_empty() {
            anyhow::bail!("fleaflicker_api_url must not be empty");
        }
        if self.league_sport.trim().is_empty() {
            anyhow::bail!("league_sport must not be empty");
        }
        if self.anthropic_max_tokens == 0 {
            anyhow::bail!("anthropic_max_tokens must be positive");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        Ok(())
    }

    /// The API key, treating a blank value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.anthropic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
