// src/repositories/post_repository.rs
use tokio_postgres::{GenericClient, Row};
use uuid::Uuid;

use crate::dtos::post_dtos::{Page, PostOut};
use crate::dtos::user_dtos::UserOut;
use crate::errors::AppResult;
use crate::models::post::{NewPost, Post};

/// Posts joined with their author, in the column layout `post_out_from_row` reads.
const SELECT_WITH_AUTHOR: &str = "SELECT p.id, p.title, p.content, p.image_url, p.is_published, \
     p.created_at, p.updated_at, p.author_id, \
     u.username AS author_username, u.email AS author_email, \
     u.created_at AS author_created_at, u.updated_at AS author_updated_at \
     FROM posts p JOIN users u ON u.id = p.author_id";

const NEWEST_FIRST: &str = "ORDER BY p.created_at DESC, p.id DESC";

pub struct PostRepository;

fn post_out_from_row(row: &Row) -> Result<PostOut, tokio_postgres::Error> {
    Ok(PostOut {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        image_url: row.try_get("image_url")?,
        is_published: row.try_get("is_published")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        author_id: row.try_get("author_id")?,
        author: UserOut::author_from_row(row)?,
    })
}

fn collect(rows: &[Row]) -> AppResult<Vec<PostOut>> {
    Ok(rows
        .iter()
        .map(post_out_from_row)
        .collect::<Result<Vec<_>, _>>()?)
}

impl PostRepository {
    pub async fn insert<C: GenericClient>(db: &C, new_post: &NewPost) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        db.execute(
            "INSERT INTO posts (id, title, content, image_url, author_id) \
             VALUES ($1, $2, $3, $4, $5)",
            &[
                &id,
                &new_post.title,
                &new_post.content,
                &new_post.image_url,
                &new_post.author_id,
            ],
        )
        .await?;
        Ok(id)
    }

    pub async fn fetch<C: GenericClient>(db: &C, id: Uuid) -> AppResult<Option<PostOut>> {
        let sql = format!("{} WHERE p.id = $1", SELECT_WITH_AUTHOR);
        let row = db.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(post_out_from_row).transpose()?)
    }

    /// Load a bare post row and lock it for the rest of the transaction.
    pub async fn lock<C: GenericClient>(db: &C, id: Uuid) -> AppResult<Option<Post>> {
        let row = db
            .query_opt(
                "SELECT id, title, content, image_url, is_published, created_at, updated_at, author_id \
                 FROM posts WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(Post::from_row).transpose()?)
    }

    pub async fn exists<C: GenericClient>(db: &C, id: Uuid) -> AppResult<bool> {
        let row = db
            .query_opt("SELECT 1 FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(row.is_some())
    }

    pub async fn update<C: GenericClient>(db: &C, post: &Post) -> AppResult<()> {
        db.execute(
            "UPDATE posts SET title = $2, content = $3, image_url = $4, is_published = $5, \
             updated_at = now() WHERE id = $1",
            &[
                &post.id,
                &post.title,
                &post.content,
                &post.image_url,
                &post.is_published,
            ],
        )
        .await?;
        Ok(())
    }

    /// Hard delete; the post's comments go with it through the foreign key.
    pub async fn delete<C: GenericClient>(db: &C, id: Uuid) -> AppResult<u64> {
        Ok(db.execute("DELETE FROM posts WHERE id = $1", &[&id]).await?)
    }

    /// Published posts, newest first, optionally filtered by a case-sensitive
    /// substring of the title or content.
    pub async fn list_published<C: GenericClient>(
        db: &C,
        search: Option<&str>,
        page: Page,
    ) -> AppResult<Vec<PostOut>> {
        let sql = format!(
            "{} WHERE p.is_published \
             AND ($1::text IS NULL OR strpos(p.title, $1) > 0 OR strpos(p.content, $1) > 0) \
             {} OFFSET $2 LIMIT $3",
            SELECT_WITH_AUTHOR, NEWEST_FIRST
        );
        let rows = db
            .query(sql.as_str(), &[&search, &page.skip, &page.limit])
            .await?;
        collect(&rows)
    }

    /// With no `page`, every matching post is returned.
    pub async fn list_by_author<C: GenericClient>(
        db: &C,
        author_id: Uuid,
        include_drafts: bool,
        page: Option<Page>,
    ) -> AppResult<Vec<PostOut>> {
        let skip = page.map_or(0, |p| p.skip);
        // LIMIT NULL is no limit
        let limit: Option<i64> = page.map(|p| p.limit);
        let sql = format!(
            "{} WHERE p.author_id = $1 AND ($2 OR p.is_published) {} OFFSET $3 LIMIT $4::bigint",
            SELECT_WITH_AUTHOR, NEWEST_FIRST
        );
        let rows = db
            .query(
                sql.as_str(),
                &[&author_id, &include_drafts, &skip, &limit],
            )
            .await?;
        collect(&rows)
    }
}
