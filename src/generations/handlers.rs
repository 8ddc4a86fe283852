use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use time::UtcOffset;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateGenerationBase64, DailyQuery, GenerationView, Pagination};
use super::repo;
use super::services::{self, AnalyzeError, UploadItem};
use crate::{auth::AuthUser, nutrition::DailySummary, state::AppState};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/generations", get(list_generations))
        .route("/generations/:id", get(get_generation))
        .route("/summary/daily", get(daily_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/generations", post(create_generation_multipart)) // multipart field "file"
        .route("/generations/base64", post(create_generation_base64))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_generations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<GenerationView>>, (StatusCode, String)> {
    let rows = repo::list_by_user(&state.db, user_id, p.limit.clamp(1, 100), p.offset.max(0))
        .await
        .map_err(internal)?;
    let mut items = Vec::with_capacity(rows.len());
    for g in rows {
        items.push(services::to_view(&state, g).await);
    }
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_generation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerationView>, (StatusCode, String)> {
    match repo::get(&state.db, user_id, id).await {
        Ok(Some(g)) => Ok(Json(services::to_view(&state, g).await)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Generation not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, %id, "get_generation failed");
            Err(internal(e))
        }
    }
}

/// POST /generations (multipart), one image in field `file`
#[instrument(skip(state, mp))]
pub async fn create_generation_multipart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, HeaderMap, Json<GenerationView>), (StatusCode, String)> {
    let mut upload: Option<(Bytes, String)> = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "image/jpeg".into());
            let data = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            upload = Some((data, content_type));
            break;
        }
    }
    let Some((body, content_type)) = upload else {
        return Err((StatusCode::BAD_REQUEST, "file is required".into()));
    };

    create(
        &state,
        user_id,
        UploadItem {
            body,
            content_type: &content_type,
        },
    )
    .await
}

/// POST /generations/base64 { image_b64: "...", content_type?: "image/jpeg" }
#[instrument(skip(state, body))]
pub async fn create_generation_base64(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateGenerationBase64>,
) -> Result<(StatusCode, HeaderMap, Json<GenerationView>), (StatusCode, String)> {
    let bytes = decode_image(&body.image_b64)?;
    let ct = body.content_type.as_deref().unwrap_or("image/jpeg");
    create(
        &state,
        user_id,
        UploadItem {
            body: Bytes::from(bytes),
            content_type: ct,
        },
    )
    .await
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DailyQuery>,
) -> Result<Json<DailySummary>, (StatusCode, String)> {
    let offset = UtcOffset::from_whole_seconds(q.offset_minutes.saturating_mul(60))
        .map_err(|_| (StatusCode::BAD_REQUEST, "offset_minutes out of range".into()))?;
    let date = q.date.unwrap_or_else(|| services::today(offset));
    let summary = services::daily_summary(&state, user_id, date, offset)
        .await
        .map_err(internal)?;
    Ok(Json(summary))
}

// --- helpers ---

async fn create(
    state: &AppState,
    user_id: Uuid,
    image: UploadItem<'_>,
) -> Result<(StatusCode, HeaderMap, Json<GenerationView>), (StatusCode, String)> {
    let generation = services::analyze_and_store(state, user_id, image)
        .await
        .map_err(analyze_error)?;
    let view = services::to_view(state, generation).await;

    let mut headers = HeaderMap::new();
    if let Ok(loc) = HeaderValue::from_str(&format!("/api/v1/generations/{}", view.id)) {
        headers.insert(axum::http::header::LOCATION, loc);
    }
    Ok((StatusCode::CREATED, headers, Json(view)))
}

/// Accepts bare base64 or a `data:<mime>;base64,` URL.
fn decode_image(b64: &str) -> Result<Vec<u8>, (StatusCode, String)> {
    let payload = match b64.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => b64,
    };
    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|_| (StatusCode::BAD_REQUEST, "invalid base64".into()))
}

fn analyze_error(e: AnalyzeError) -> (StatusCode, String) {
    match e {
        AnalyzeError::EmptyImage => (StatusCode::BAD_REQUEST, e.to_string()),
        AnalyzeError::Vision(_) => {
            warn!(error = %e, "vision analysis failed");
            (StatusCode::BAD_GATEWAY, e.to_string())
        }
        AnalyzeError::Internal(_) => {
            error!(error = %e, "generation not stored");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::VisionError;

    #[test]
    fn decodes_plain_and_data_url() {
        assert_eq!(decode_image("YWJj").unwrap(), b"abc");
        assert_eq!(decode_image("data:image/png;base64,YWJj").unwrap(), b"abc");
        assert_eq!(
            decode_image("not base64!").unwrap_err().0,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn analyze_errors_map_to_status() {
        assert_eq!(analyze_error(AnalyzeError::EmptyImage).0, StatusCode::BAD_REQUEST);
        assert_eq!(
            analyze_error(AnalyzeError::Vision(VisionError::EmptyResponse)).0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            analyze_error(AnalyzeError::Internal(anyhow::anyhow!("db down"))).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
