use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_rules, ApiError};
use crate::calculate::request_rng;
use crate::calculate::simulate::{simulate_draw, MatchSummary, SimulatedDraw};
use crate::models::{GameRules, GameType};

#[derive(Debug, Deserialize)]
pub struct SimulateBody {
    pub game: GameType,
    #[serde(default)]
    pub rules: Option<GameRules>,
    /// Optional entry to score against the draw.
    #[serde(default)]
    pub entry: Option<Vec<u32>>,
    #[serde(default)]
    pub bonus: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub draw: SimulatedDraw,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<MatchSummary>,
}

pub async fn simulate(
    State(state): State<AppState>,
    Json(body): Json<SimulateBody>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let rules = resolve_rules(body.game, body.rules, &state)?;

    let mut rng = request_rng(state.seed);
    let draw = simulate_draw(&rules, &mut rng);
    let score = body.entry.as_deref().map(|entry| draw.score(entry, body.bonus));

    Ok(Json(SimulateResponse { draw, score }))
}
