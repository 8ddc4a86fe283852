use anyhow::Context;
use bytes::Bytes;
use thiserror::Error;
use time::{Date, Duration, OffsetDateTime, UtcOffset};
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::GenerationView;
use super::repo;
use super::repo_types::Generation;
use crate::nutrition::{extract_dish_title, extract_macros, summarize_day, DailySummary};
use crate::profile;
use crate::state::AppState;
use crate::storage::photo_key;
use crate::vision::VisionError;

pub struct UploadItem<'a> {
    pub body: Bytes,
    pub content_type: &'a str,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("image is empty")]
    EmptyImage,
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Runs the photo through the vision service, stores the photo and the raw answer.
///
/// The photo is uploaded only after a successful analysis, so a failed call leaves
/// nothing behind.
pub async fn analyze_and_store(
    st: &AppState,
    user_id: Uuid,
    image: UploadItem<'_>,
) -> Result<Generation, AnalyzeError> {
    if image.body.is_empty() {
        return Err(AnalyzeError::EmptyImage);
    }

    let result_text = st.vision.analyze(&image.body, image.content_type).await?;

    let id = Uuid::new_v4();
    let key = photo_key(user_id, id, image.content_type);
    st.storage
        .put_object(&key, image.body, image.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;

    let generation = repo::insert(&st.db, id, user_id, &key, &result_text).await?;
    info!(%user_id, generation_id = %id, "generation stored");
    Ok(generation)
}

/// Pure part of the read path: derive title and macros from the stored text.
pub fn view_from(g: Generation, image_url: Option<String>) -> GenerationView {
    GenerationView {
        id: g.id,
        title: extract_dish_title(&g.result_text),
        macros: extract_macros(&g.result_text),
        result_text: g.result_text,
        image_url,
        created_at: g.created_at,
    }
}

/// A failed presign degrades to a view without an image instead of failing the list.
pub async fn to_view(st: &AppState, g: Generation) -> GenerationView {
    let url = match st
        .storage
        .presign_get(&g.image_key, st.config.storage.presign_ttl_secs)
        .await
    {
        Ok(u) => Some(u),
        Err(e) => {
            warn!(error = %e, key = %g.image_key, "presign failed");
            None
        }
    };
    view_from(g, url)
}

/// `[start, end)` of a local calendar day expressed in UTC.
pub fn day_bounds(date: Date, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_offset(offset);
    (start, start + Duration::days(1))
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

pub async fn daily_summary(
    st: &AppState,
    user_id: Uuid,
    date: Date,
    offset: UtcOffset,
) -> anyhow::Result<DailySummary> {
    let (from, to) = day_bounds(date, offset);
    let texts = repo::list_texts_between(&st.db, user_id, from, to).await?;
    let targets = profile::repo::get(&st.db, user_id)
        .await?
        .map(|p| p.targets());
    Ok(summarize_day(date, texts.iter().map(String::as_str), targets))
}
