use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument, warn};

use super::repo;
use super::services::{self, ProfileView};
use crate::{auth::AuthUser, nutrition::ProfileParameters, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(put_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    match repo::get(&state.db, user_id).await {
        Ok(Some(row)) => Ok(Json(row.into())),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "get_profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state, params))]
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(params): Json<ProfileParameters>,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    if let Err(msg) = services::validate(&params) {
        warn!(%user_id, %msg, "invalid profile");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, msg));
    }
    let view = services::save(&state, user_id, params).await.map_err(|e| {
        error!(error = %e, %user_id, "save profile failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(view))
}
