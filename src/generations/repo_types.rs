use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One stored photo analysis. Never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Generation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_key: String,   // object key of the photo
    pub result_text: String, // raw model output
    pub created_at: OffsetDateTime,
}
