use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_rules, ApiError, MAX_ENTRIES};
use crate::calculate::{analyze, FrequencyProfile};
use crate::models::{GameRules, GameType, PredictionRequest, PredictionResult};
use crate::strategy::PredictionInput;

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub game: GameType,
    #[serde(default)]
    pub rules: Option<GameRules>,
    #[serde(default)]
    pub history: String,
}

pub async fn analyze_history(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<FrequencyProfile>, ApiError> {
    let rules = resolve_rules(body.game, body.rules, &state)?;
    Ok(Json(analyze(&body.history, rules.main_range())))
}

#[derive(Debug, Deserialize)]
pub struct PredictBody {
    pub game: GameType,
    #[serde(default)]
    pub rules: Option<GameRules>,
    #[serde(default)]
    pub history: String,
    #[serde(flatten)]
    pub request: PredictionRequest,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Name of the strategy that served the request.
    pub strategy: &'static str,
    pub result: PredictionResult,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<PredictBody>,
) -> Result<Json<PredictResponse>, ApiError> {
    let rules = resolve_rules(body.game, body.rules, &state)?;

    let entries = body.request.entry_count;
    if entries == 0 || entries > MAX_ENTRIES {
        return Err(ApiError::BadRequest(format!(
            "entry_count must be between 1 and {}",
            MAX_ENTRIES
        )));
    }

    if let Some(size) = body.request.system_number {
        if size < rules.main_count() || size > rules.main_range() {
            return Err(ApiError::BadRequest(format!(
                "system_number must be between {} and {}",
                rules.main_count(),
                rules.main_range()
            )));
        }
    }

    let input = PredictionInput {
        rules,
        history: body.history,
        request: body.request,
    };
    let attempted = state.chain.run(&input).await?;

    Ok(Json(PredictResponse {
        strategy: attempted.strategy,
        result: attempted.result,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::api::test_support::*;
    use crate::calculate::SelectorTuning;
    use crate::models::GameType;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_predict_scenario() {
        let body = r#"{
            "game": "custom",
            "history": "",
            "entry_count": 2,
            "lucky_numbers": [7],
            "unwanted_numbers": [13]
        }"#;
        let (status, json) = post_json(build_router(test_state()), "/api/predict", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["strategy"], "local");

        let entries = json["result"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        for entry in entries {
            let nums: Vec<u64> = entry
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_u64().unwrap())
                .collect();
            assert_eq!(nums.len(), 6);
            assert!(nums.contains(&7));
            assert!(!nums.contains(&13));
            assert!(nums.windows(2).all(|w| w[0] < w[1]));
        }
        assert!(json["result"].get("bonus_numbers").is_none());
        assert_eq!(json["result"]["method_tags"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_predict_two_barrel_with_system() {
        let body = r#"{
            "game": "us-powerball",
            "history": "Draw 1: 4 8 15 16 23 (+ 12)",
            "entry_count": 3,
            "system_number": 7
        }"#;
        let (status, json) = post_json(build_router(test_state()), "/api/predict", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["system_label"], "System 7");
        assert_eq!(json["result"]["entries"][0].as_array().unwrap().len(), 7);
        assert_eq!(json["result"]["bonus_numbers"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_predict_custom_rules() {
        let body = r#"{
            "game": "custom",
            "rules": {"main_count": 4, "main_range": 20, "bonus_count": 1},
            "entry_count": 1
        }"#;
        let (status, json) = post_json(build_router(test_state()), "/api/predict", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["entries"][0].as_array().unwrap().len(), 4);
        assert_eq!(json["result"]["bonus_numbers"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_predict_insufficient_pool() {
        let unwanted: Vec<String> = (1..=45).map(|n| n.to_string()).collect();
        let body = format!(
            r#"{{"game": "custom", "entry_count": 1, "unwanted_numbers": [{}]}}"#,
            unwanted.join(",")
        );
        let (status, json) = post_json(build_router(test_state()), "/api/predict", &body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json["error"]["message"],
            "Unable to generate numbers with current filters."
        );
    }

    #[tokio::test]
    async fn test_predict_rejects_zero_entries() {
        let body = r#"{"game": "uk-lotto", "entry_count": 0}"#;
        let (status, json) = post_json(build_router(test_state()), "/api/predict", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_predict_rejects_out_of_range_system() {
        for system in [0, 5, 46] {
            let body = format!(
                r#"{{"game": "custom", "entry_count": 1, "system_number": {}}}"#,
                system
            );
            let (status, json) =
                post_json(build_router(test_state()), "/api/predict", &body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "system {}", system);
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn test_predict_rejects_oversized_custom_rules() {
        let body = r#"{
            "game": "custom",
            "rules": {"main_count": 6, "main_range": 4000000000},
            "entry_count": 1
        }"#;
        let (status, _) = post_json(build_router(test_state()), "/api/predict", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_uses_state_tuning() {
        let tuning = SelectorTuning {
            confidence_min: 50,
            confidence_max: 50,
            ..SelectorTuning::default()
        };
        let state = AppState::local(tuning, GameType::Custom.rules(), Some(3));
        let body = r#"{"game": "custom", "entry_count": 1}"#;
        let (status, json) = post_json(build_router(state), "/api/predict", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["confidence_score"], 50);
    }

    #[tokio::test]
    async fn test_analyze() {
        let body = r#"{"game": "custom", "history": "1 1 1 2 2 3"}"#;
        let (status, json) = post_json(build_router(test_state()), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["counts"]["1"], 3);
        assert_eq!(json["counts"]["45"], 0);
        assert_eq!(json["hot"][0], 1);
        assert_eq!(json["hot"][1], 2);
        assert_eq!(json["cold"][0], 45);
    }
}
