use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod commentary;
mod config;
mod dashboard;
mod league;
mod stats;

use commentary::{AnthropicClient, CommentaryProvider, TemplateNarrator};
use config::{CommentaryMode, Config};
use dashboard::AppState;
use league::{FleaflickerClient, LeagueSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let league: Arc<dyn LeagueSource> = Arc::new(FleaflickerClient::new(
        &config.fleaflicker_api_url,
        config.league_id,
        &config.league_sport,
        config.http_timeout(),
    )?);
    info!(
        "League {} ({}) via {}",
        config.league_id, config.league_sport, config.fleaflicker_api_url
    );

    let commentary: Arc<dyn CommentaryProvider> = match config.commentary_mode {
        CommentaryMode::Ai => {
            let key = config
                .api_key()
                .context("ANTHROPIC_API_KEY missing in ai commentary mode")?;
            Arc::new(AnthropicClient::new(
                &config.anthropic_api_url,
                key.to_string(),
                &config.anthropic_model,
                config.anthropic_max_tokens,
                config.http_timeout(),
            )?)
        }
        CommentaryMode::Template => Arc::new(TemplateNarrator),
    };
    info!("Commentary provider: {}", commentary.name());

    let app = dashboard::router(AppState { league, commentary });
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
