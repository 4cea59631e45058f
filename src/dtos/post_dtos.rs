use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patch::Patch;
use super::user_dtos::UserOut;
use crate::errors::{AppError, AppResult};
use crate::models::reject_nul;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Partial update; keys left out of the body are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostDTO {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub content: Patch<String>,
    #[serde(default)]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub is_published: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostOut {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author: UserOut,
}

/// `?skip=&limit=` query.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /posts` query.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> AppResult<Self> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if skip < 0 {
            return Err(AppError::validation("skip must not be negative"));
        }
        if limit < 0 {
            return Err(AppError::validation("limit must not be negative"));
        }
        Ok(Self {
            skip,
            limit: limit.min(MAX_PAGE_LIMIT),
        })
    }
}

impl PageQuery {
    /// `None` when neither `skip` nor `limit` was given, meaning no paging.
    pub fn page_or_all(&self) -> AppResult<Option<Page>> {
        if self.skip.is_none() && self.limit.is_none() {
            return Ok(None);
        }
        Page::new(self.skip, self.limit).map(Some)
    }
}

impl ListPostsQuery {
    pub fn page(&self) -> AppResult<Page> {
        Page::new(self.skip, self.limit)
    }

    /// An empty `search=` matches everything, same as leaving it out.
    pub fn search_term(&self) -> AppResult<Option<&str>> {
        let term = self.search.as_deref().filter(|s| !s.is_empty());
        if let Some(term) = term {
            reject_nul("search", term)?;
        }
        Ok(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn page_defaults() {
        assert_eq!(Page::new(None, None).unwrap(), Page { skip: 0, limit: 10 });
    }

    #[test]
    fn page_limit_is_capped() {
        assert_eq!(Page::new(Some(5), Some(1000)).unwrap(), Page { skip: 5, limit: 100 });
    }

    #[test]
    fn negative_page_values_are_rejected() {
        assert_matches!(Page::new(Some(-1), None), Err(AppError::Validation(_)));
        assert_matches!(Page::new(None, Some(-3)), Err(AppError::Validation(_)));
    }

    #[test]
    fn empty_search_is_ignored() {
        let q = ListPostsQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(q.search_term().unwrap(), None);

        let q = ListPostsQuery {
            search: Some("Rust".into()),
            ..Default::default()
        };
        assert_eq!(q.search_term().unwrap(), Some("Rust"));

        let q = ListPostsQuery {
            search: Some("a\0b".into()),
            ..Default::default()
        };
        assert_matches!(q.search_term(), Err(AppError::Validation(_)));
    }

    #[test]
    fn user_posts_are_unpaged_without_params() {
        assert_eq!(PageQuery::default().page_or_all().unwrap(), None);
        let q = PageQuery {
            skip: Some(1),
            limit: None,
        };
        assert_eq!(q.page_or_all().unwrap(), Some(Page { skip: 1, limit: 10 }));
        let q = PageQuery {
            skip: None,
            limit: Some(-1),
        };
        assert_matches!(q.page_or_all(), Err(AppError::Validation(_)));
    }

    #[test]
    fn create_ignores_publish_flag() {
        let dto: CreatePostDTO =
            serde_json::from_str(r#"{"title":"t","content":"c","is_published":true}"#).unwrap();
        assert_eq!(dto.title, "t");
        assert_eq!(dto.image_url, None);
    }
}
