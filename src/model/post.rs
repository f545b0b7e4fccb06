use std::collections::HashMap;

use anyhow::Result;
use sqlx::PgPool;
use sqlx::prelude::FromRow;
use time::OffsetDateTime;

use crate::model::comment::{self, Comment};
use crate::model::user::UserId;

/// A post flattened with its author's username and its comments, the shape
/// the views consume directly.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i32,
    pub user_id: UserId,
    pub author: String,
    pub title: String,
    pub body: String,
    pub created_at: OffsetDateTime,
    pub comments: Vec<Comment>,
}

/// A post without comments, for the owner's dashboard listing.
#[derive(Debug, Clone, FromRow)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub created_at: OffsetDateTime,
}

#[derive(FromRow)]
struct PostRow {
    id: i32,
    user_id: i32,
    author: String,
    title: String,
    body: String,
    created_at: OffsetDateTime,
}

impl PostRow {
    fn into_post(self, comments: Vec<Comment>) -> Post {
        Post {
            id: self.id,
            user_id: UserId(self.user_id),
            author: self.author,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            comments,
        }
    }
}

const SELECT: &str = "SELECT p.id, p.user_id, u.username AS author,
                      p.title, p.body, p.created_at
                      FROM posts p JOIN users u ON u.id = p.user_id";

/// All posts, newest first, each carrying its comments.
pub async fn list_all(db: &PgPool) -> Result<Vec<Post>> {
    let sql = format!("{SELECT} ORDER BY p.created_at DESC");
    let rows = sqlx::query_as::<_, PostRow>(&sql).fetch_all(db).await?;

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let mut by_post: HashMap<i32, Vec<Comment>> = HashMap::new();
    for comment in comment::for_posts(db, &ids).await? {
        by_post.entry(comment.post_id).or_default().push(comment);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let comments = by_post.remove(&row.id).unwrap_or_default();
            row.into_post(comments)
        })
        .collect())
}

pub async fn get(db: &PgPool, id: i32) -> Result<Option<Post>> {
    let sql = format!("{SELECT} WHERE p.id = $1");
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let comments = comment::for_post(db, row.id).await?;
    Ok(Some(row.into_post(comments)))
}

pub async fn list_by_user(db: &PgPool, user_id: UserId) -> Result<Vec<PostSummary>> {
    let rows = sqlx::query_as::<_, PostSummary>(
        "SELECT id, title, created_at FROM posts WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id.0)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, user_id: UserId, title: &str, body: &str) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO posts (user_id, title, body) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id.0)
    .bind(title)
    .bind(body)
    .fetch_one(db)
    .await?;

    Ok(id)
}

/// Updates an owned post. Returns `false` when the post does not exist or
/// belongs to someone else; the ownership check lives in the predicate.
pub async fn update(
    db: &PgPool,
    user_id: UserId,
    id: i32,
    title: &str,
    body: &str,
) -> Result<bool> {
    let result = sqlx::query("UPDATE posts SET title = $1, body = $2 WHERE id = $3 AND user_id = $4")
        .bind(title)
        .bind(body)
        .bind(id)
        .bind(user_id.0)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes an owned post; comments go with it via the cascade.
pub async fn delete(db: &PgPool, user_id: UserId, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id.0)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
