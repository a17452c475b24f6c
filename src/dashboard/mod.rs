use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::commentary::{casualties, Casualties, CommentaryProvider};
use crate::league::{LeagueEndpoint, LeagueError, LeagueSource};
use crate::stats::{hall_of_infamy, power_index, HallOfInfamy, Matchup, PowerIndex};

const LEAGUE_FETCH_FAILED: &str = "Failed to fetch league data";
const LEAGUE_PROCESS_FAILED: &str = "Failed to process league data";
const COMMENTARY_FAILED: &str = "Failed to generate commentary";

#[derive(Clone)]
pub struct AppState {
    pub league: Arc<dyn LeagueSource>,
    pub commentary: Arc<dyn CommentaryProvider>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(message: &'static str) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
}

fn league_failure(source: &str, err: LeagueError) -> ApiError {
    error!("{} league request failed: {}", source, err);
    match err {
        LeagueError::MalformedPayload(_) => api_error(LEAGUE_PROCESS_FAILED),
        _ => api_error(LEAGUE_FETCH_FAILED),
    }
}

/// Build the Axum router for the dashboard API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/fleaflicker", get(league_proxy_handler))
        .route("/api/generate-commentary", post(generate_commentary_handler))
        .route("/api/hall-of-infamy", get(hall_of_infamy_handler))
        .route("/api/power-index", get(power_index_handler))
        .route("/api/casualties", get(casualties_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
struct LeagueQuery {
    endpoint: Option<String>,
}

/// GET /api/fleaflicker?endpoint=standings|scoreboard
async fn league_proxy_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeagueQuery>,
) -> Result<Json<Value>, ApiError> {
    let endpoint = LeagueEndpoint::from_param(query.endpoint.as_deref());
    state
        .league
        .fetch(endpoint)
        .await
        .map(Json)
        .map_err(|e| {
            error!("{} {} proxy failed: {}", state.league.name(), endpoint, e);
            api_error(LEAGUE_FETCH_FAILED)
        })
}

/// POST /api/generate-commentary
async fn generate_commentary_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Matchup>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(matchup) = payload.map_err(|e| {
        error!("Rejected commentary request: {}", e);
        api_error(COMMENTARY_FAILED)
    })?;

    state
        .commentary
        .commentary(&matchup)
        .await
        .map(|text| Json(json!({ "commentary": text })))
        .map_err(|e| {
            error!(
                "{} commentary failed for {} vs {}: {}",
                state.commentary.name(),
                matchup.winner,
                matchup.loser,
                e
            );
            api_error(COMMENTARY_FAILED)
        })
}

/// GET /api/hall-of-infamy
async fn hall_of_infamy_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HallOfInfamy>, ApiError> {
    let board = state
        .league
        .scoreboard()
        .await
        .map_err(|e| league_failure(state.league.name(), e))?;
    Ok(Json(hall_of_infamy(&board)))
}

/// GET /api/power-index
async fn power_index_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PowerIndex>, ApiError> {
    let standings = state
        .league
        .standings()
        .await
        .map_err(|e| league_failure(state.league.name(), e))?;
    Ok(Json(power_index(&standings)))
}

/// GET /api/casualties
async fn casualties_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Casualties>, ApiError> {
    let board = state
        .league
        .scoreboard()
        .await
        .map_err(|e| league_failure(state.league.name(), e))?;
    Ok(Json(casualties(state.commentary.as_ref(), &board).await))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView {
    generated_at: DateTime<Utc>,
    casualties: Casualties,
    hall_of_infamy: HallOfInfamy,
    power_index: PowerIndex,
}

/// GET /api/dashboard: every view from one standings and scoreboard fetch.
async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, ApiError> {
    let (standings, board) = tokio::join!(state.league.standings(), state.league.scoreboard());
    let standings = standings.map_err(|e| league_failure(state.league.name(), e))?;
    let board = board.map_err(|e| league_failure(state.league.name(), e))?;

    Ok(Json(DashboardView {
        generated_at: Utc::now(),
        casualties: casualties(state.commentary.as_ref(), &board).await,
        hall_of_infamy: hall_of_infamy(&board),
        power_index: power_index(&standings),
    }))
}
