// src/repositories/comment_repository.rs
use tokio_postgres::{GenericClient, Row};
use uuid::Uuid;

use crate::dtos::comment_dtos::CommentOut;
use crate::dtos::user_dtos::UserOut;
use crate::errors::AppResult;
use crate::models::comment::Comment;

const SELECT_WITH_AUTHOR: &str = "SELECT c.id, c.content, c.created_at, c.updated_at, \
     c.author_id, c.post_id, \
     u.username AS author_username, u.email AS author_email, \
     u.created_at AS author_created_at, u.updated_at AS author_updated_at \
     FROM comments c JOIN users u ON u.id = c.author_id";

pub struct CommentRepository;

fn comment_out_from_row(row: &Row) -> Result<CommentOut, tokio_postgres::Error> {
    Ok(CommentOut {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        author_id: row.try_get("author_id")?,
        post_id: row.try_get("post_id")?,
        author: UserOut::author_from_row(row)?,
    })
}

impl CommentRepository {
    pub async fn insert<C: GenericClient>(
        db: &C,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        db.execute(
            "INSERT INTO comments (id, content, author_id, post_id) VALUES ($1, $2, $3, $4)",
            &[&id, &content, &author_id, &post_id],
        )
        .await?;
        Ok(id)
    }

    pub async fn fetch<C: GenericClient>(db: &C, id: Uuid) -> AppResult<Option<CommentOut>> {
        let sql = format!("{} WHERE c.id = $1", SELECT_WITH_AUTHOR);
        let row = db.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(comment_out_from_row).transpose()?)
    }

    pub async fn lock<C: GenericClient>(db: &C, id: Uuid) -> AppResult<Option<Comment>> {
        let row = db
            .query_opt(
                "SELECT id, content, created_at, updated_at, author_id, post_id \
                 FROM comments WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(Comment::from_row).transpose()?)
    }

    /// All comments on a post, oldest first.
    pub async fn list_for_post<C: GenericClient>(db: &C, post_id: Uuid) -> AppResult<Vec<CommentOut>> {
        let sql = format!(
            "{} WHERE c.post_id = $1 ORDER BY c.created_at ASC, c.id ASC",
            SELECT_WITH_AUTHOR
        );
        let rows = db.query(sql.as_str(), &[&post_id]).await?;
        Ok(rows
            .iter()
            .map(comment_out_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn update<C: GenericClient>(db: &C, comment: &Comment) -> AppResult<()> {
        db.execute(
            "UPDATE comments SET content = $2, updated_at = now() WHERE id = $1",
            &[&comment.id, &comment.content],
        )
        .await?;
        Ok(())
    }

    pub async fn delete<C: GenericClient>(db: &C, id: Uuid) -> AppResult<u64> {
        Ok(db.execute("DELETE FROM comments WHERE id = $1", &[&id]).await?)
    }
}
