use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::models::user::User;

/// Public view of a user, also nested as `author` in posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserOut {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserOut {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl UserOut {
    /// Read the `author_*` columns of a joined row.
    pub fn author_from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("author_id")?,
            username: row.try_get("author_username")?,
            email: row.try_get("author_email")?,
            created_at: row.try_get("author_created_at")?,
            updated_at: row.try_get("author_updated_at")?,
        })
    }
}
