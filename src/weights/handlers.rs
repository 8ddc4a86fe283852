use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::LogWeightRequest;
use super::repo;
use super::repo_types::WeightLog;
use super::services::{self, PacingReport};
use crate::{auth::AuthUser, nutrition::WeightGoal, state::AppState};

pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/weights", get(list_weights).post(log_weight))
        .route("/goal", put(put_goal))
        .route("/goal/pacing", get(get_pacing))
}

#[instrument(skip(state))]
pub async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<LogWeightRequest>,
) -> Result<Json<WeightLog>, (StatusCode, String)> {
    if !(body.weight.is_finite() && body.weight > 0.0) {
        warn!(%user_id, weight = body.weight, "invalid weight");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "weight must be positive".into()));
    }
    let log = repo::upsert_log(&state.db, user_id, body.date, body.weight)
        .await
        .map_err(internal)?;
    info!(%user_id, date = %log.date, "weight logged");
    Ok(Json(log))
}

#[instrument(skip(state))]
pub async fn list_weights(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WeightLog>>, (StatusCode, String)> {
    let logs = repo::list_logs(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(logs))
}

#[instrument(skip(state))]
pub async fn put_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(goal): Json<WeightGoal>,
) -> Result<Json<WeightGoal>, (StatusCode, String)> {
    if let Err(msg) = services::validate_goal(&goal) {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, msg));
    }
    repo::upsert_goal(&state.db, user_id, &goal)
        .await
        .map_err(internal)?;
    Ok(Json(goal))
}

#[instrument(skip(state))]
pub async fn get_pacing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PacingReport>, (StatusCode, String)> {
    let goal = repo::get_goal(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Weight goal not set".to_string()))?;
    let logs = repo::list_logs(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(services::pacing_report(goal, &logs)))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "weights request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
