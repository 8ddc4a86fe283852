use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::ExtractedMacros;

/// A generation as the client sees it. `title` and `macros` are derived from
/// `result_text` on every read and never stored.
#[derive(Debug, Serialize)]
pub struct GenerationView {
    pub id: Uuid,
    pub title: String,
    pub macros: ExtractedMacros,
    pub result_text: String,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateGenerationBase64 {
    pub image_b64: String,
    pub content_type: Option<String>, // default image/jpeg
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// Defaults to today.
    pub date: Option<Date>,
    /// Client UTC offset in minutes, used to cut day boundaries.
    #[serde(default)]
    pub offset_minutes: i32,
}
