use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

use super::{normalize_image_url, patch_nullable, patch_required, reject_nul, require_text};
use crate::dtos::post_dtos::{CreatePostDTO, UpdatePostDTO};
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
}

#[derive(Debug)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
}

impl Post {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            image_url: row.try_get("image_url")?,
            is_published: row.try_get("is_published")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            author_id: row.try_get("author_id")?,
        })
    }

    /// Apply only the fields present in `patch`. Returns whether anything was set.
    pub fn apply_patch(&mut self, patch: UpdatePostDTO) -> AppResult<bool> {
        let mut changed = patch_required("title", patch.title, &mut self.title)?;
        require_text("title", &self.title)?;

        changed |= patch_required("content", patch.content, &mut self.content)?;
        require_text("content", &self.content)?;

        changed |= patch_nullable(patch.image_url, &mut self.image_url);
        self.image_url = normalize_image_url(self.image_url.take());
        if let Some(url) = &self.image_url {
            reject_nul("image_url", url)?;
        }

        changed |= patch_required("is_published", patch.is_published, &mut self.is_published)?;
        Ok(changed)
    }
}

impl NewPost {
    pub fn from_dto(dto: CreatePostDTO, author_id: Uuid) -> AppResult<Self> {
        require_text("title", &dto.title)?;
        require_text("content", &dto.content)?;
        let image_url = normalize_image_url(dto.image_url);
        if let Some(url) = &image_url {
            reject_nul("image_url", url)?;
        }
        Ok(Self {
            title: dto.title,
            content: dto.content,
            image_url,
            author_id,
        })
    }
}
