use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_rules, ApiError, MAX_ENTRIES};
use crate::calculate::odds::{coverage, CoverageStats};
use crate::models::{GameRules, GameType};

#[derive(Debug, Serialize)]
pub struct GameInfo {
    pub id: GameType,
    pub name: &'static str,
    pub region: &'static str,
    pub description: &'static str,
    pub rules: GameRules,
    pub two_barrel: bool,
    pub system_options: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub games: Vec<GameInfo>,
}

pub async fn list_games(State(state): State<AppState>) -> Json<GamesResponse> {
    let games = GameType::ALL
        .into_iter()
        .map(|game| {
            let rules = match game {
                GameType::Custom => state.custom_game,
                _ => game.rules(),
            };
            GameInfo {
                id: game,
                name: game.display_name(),
                region: game.region(),
                description: game.description(),
                rules,
                two_barrel: rules.is_two_barrel(),
                system_options: rules.system_options(),
            }
        })
        .collect();

    Json(GamesResponse { games })
}

#[derive(Debug, Deserialize)]
pub struct OddsParams {
    pub system: Option<u32>,
    pub entries: Option<u32>,
}

pub async fn game_odds(
    State(state): State<AppState>,
    Path(game): Path<String>,
    Query(params): Query<OddsParams>,
) -> Result<Json<CoverageStats>, ApiError> {
    let game = GameType::from_slug(&game)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown game: {}", game)))?;
    let rules = resolve_rules(game, None, &state)?;

    let entry_size = params.system.unwrap_or(rules.main_count());
    if entry_size < rules.main_count() || entry_size > rules.main_range() {
        return Err(ApiError::BadRequest(format!(
            "system size must be between {} and {}",
            rules.main_count(),
            rules.main_range()
        )));
    }

    let entries = params.entries.unwrap_or(1).clamp(1, MAX_ENTRIES);
    Ok(Json(coverage(&rules, entry_size, entries)))
}
