use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

/// Row of the `users` table, password hash included. Never sent to clients;
/// see `UserOut` for the public shape.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Values for a fresh `users` row.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}
