//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the game catalogue, frequency analysis and
//! the prediction fallback chain.

pub mod routes;
pub mod state;

use axum::{
    http::{header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::models::{GameRules, GameType};
use crate::strategy::StrategyError;
use state::AppState;

/// Largest number of entries one request may ask for.
pub const MAX_ENTRIES: u32 = 50;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StrategyError> for ApiError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Selection(e) => {
                tracing::info!("Rejected prediction request: {}", e);
                ApiError::Unprocessable(e.user_message().to_string())
            }
            StrategyError::Unavailable(reason) => ApiError::Unavailable(reason),
        }
    }
}

/// Pick the rules for a request.
///
/// Explicit rules are only accepted for the custom game; otherwise the custom
/// game uses the configured default.
pub fn resolve_rules(
    game: GameType,
    rules: Option<GameRules>,
    state: &AppState,
) -> Result<GameRules, ApiError> {
    match (game, rules) {
        (GameType::Custom, Some(rules)) => Ok(rules),
        (GameType::Custom, None) => Ok(state.custom_game),
        (_, Some(_)) => Err(ApiError::BadRequest(format!(
            "custom rules are only accepted for the custom game, not {}",
            game.slug()
        ))),
        (_, None) => Ok(game.rules()),
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/games", get(routes::games::list_games))
        .route("/api/games/:game/odds", get(routes::games::game_odds))
        .route("/api/analyze", post(routes::predict::analyze_history))
        .route("/api/predict", post(routes::predict::predict))
        .route("/api/simulate", post(routes::simulate::simulate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origin; `*` allows any.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        Ok(layer.allow_origin(origin.parse::<HeaderValue>()?))
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
