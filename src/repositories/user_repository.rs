// src/repositories/user_repository.rs
use tokio_postgres::GenericClient;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};

const USER_COLUMNS: &str = "id, username, email, hashed_password, created_at, updated_at";

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_email<C: GenericClient>(db: &C, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = db.query_opt(sql.as_str(), &[&email]).await?;
        Ok(row.as_ref().map(User::from_row).transpose()?)
    }

    /// Insert a user. A unique violation on the email column comes back as a
    /// validation error so a racing duplicate registration still reads as 400.
    pub async fn insert<C: GenericClient>(db: &C, new_user: &NewUser) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO users (id, username, email, hashed_password) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let row = db
            .query_one(
                sql.as_str(),
                &[
                    &Uuid::new_v4(),
                    &new_user.username,
                    &new_user.email,
                    &new_user.hashed_password,
                ],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    AppError::validation("Email already registered")
                } else {
                    AppError::Database(e)
                }
            })?;
        Ok(User::from_row(&row)?)
    }
}
