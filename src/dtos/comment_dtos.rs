use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patch::Patch;
use super::user_dtos::UserOut;

#[derive(Debug, Deserialize)]
pub struct CreateCommentDTO {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentDTO {
    #[serde(default)]
    pub content: Patch<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentOut {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub author: UserOut,
}
