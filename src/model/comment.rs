use anyhow::Result;
use futures::FutureExt;
use sqlx::PgPool;
use sqlx::prelude::FromRow;
use time::OffsetDateTime;

use crate::db;
use crate::model::user::UserId;

/// A comment flattened with its author's username, ready for the view.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub user_id: UserId,
    pub author: String,
    pub body: String,
    pub created_at: OffsetDateTime,
}

#[derive(FromRow)]
struct CommentRow {
    id: i32,
    post_id: i32,
    user_id: i32,
    author: String,
    body: String,
    created_at: OffsetDateTime,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            user_id: UserId(row.user_id),
            author: row.author,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

const SELECT: &str = "SELECT c.id, c.post_id, c.user_id, u.username AS author,
                      c.body, c.created_at
                      FROM comments c JOIN users u ON u.id = c.user_id";

pub async fn for_post(db: &PgPool, post_id: i32) -> Result<Vec<Comment>> {
    let sql = format!("{SELECT} WHERE c.post_id = $1 ORDER BY c.created_at");
    let rows = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(post_id)
        .fetch_all(db)
        .await?;

    Ok(rows.into_iter().map(Comment::from).collect())
}

pub async fn for_posts(db: &PgPool, post_ids: &[i32]) -> Result<Vec<Comment>> {
    let sql = format!("{SELECT} WHERE c.post_id = ANY($1) ORDER BY c.created_at");
    let rows = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(post_ids)
        .fetch_all(db)
        .await?;

    Ok(rows.into_iter().map(Comment::from).collect())
}

/// Creates a comment. Returns `false` when the post no longer exists, so
/// the route can answer 404 instead of surfacing a constraint violation.
pub async fn create(db: &PgPool, post_id: i32, user_id: UserId, body: String) -> Result<bool> {
    db::transaction(
        db,
        (post_id, user_id.0, body),
        |txn, (post_id, user_id, body)| {
            async move {
                let exists =
                    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                        .bind(post_id)
                        .fetch_one(&mut **txn)
                        .await?;

                if !exists {
                    return Ok(false);
                }

                sqlx::query("INSERT INTO comments (post_id, user_id, body) VALUES ($1, $2, $3)")
                    .bind(post_id)
                    .bind(user_id)
                    .bind(body)
                    .execute(&mut **txn)
                    .await?;

                Ok(true)
            }
            .boxed()
        },
    )
    .await
}
