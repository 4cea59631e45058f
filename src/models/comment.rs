use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

use super::{patch_required, require_text};
use crate::dtos::comment_dtos::UpdateCommentDTO;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub post_id: Uuid,
}

impl Comment {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            author_id: row.try_get("author_id")?,
            post_id: row.try_get("post_id")?,
        })
    }

    pub fn apply_patch(&mut self, patch: UpdateCommentDTO) -> AppResult<bool> {
        let changed = patch_required("content", patch.content, &mut self.content)?;
        require_text("content", &self.content)?;
        Ok(changed)
    }
}
