use anyhow::Result;
use base64::engine::{Engine, general_purpose::STANDARD as BASE64_STANDARD};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

/// A user as exposed to views. The password hash never leaves this module.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

#[derive(FromRow)]
struct UserRow {
    id: i32,
    username: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            username: row.username,
        }
    }
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    BASE64_STANDARD.encode(digest)
}

/// Creates an account. Returns `false` when the username is already taken.
pub async fn create(db: &PgPool, username: &str, password: &str) -> Result<bool> {
    let password_hash = hash_password(password);

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(&password_hash)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn login(db: &PgPool, username: &str, password: &str) -> Result<Option<UserId>> {
    let password_hash = hash_password(password);

    let id = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM users WHERE username = $1 AND password_hash = $2",
    )
    .bind(username)
    .bind(&password_hash)
    .fetch_optional(db)
    .await?;

    Ok(id.map(UserId))
}

pub async fn get_by_id(db: &PgPool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE id = $1")
        .bind(id.0)
        .fetch_optional(db)
        .await?;

    Ok(row.map(User::from))
}

/// Every registered user except `id`, for the friends page.
pub async fn list_others(db: &PgPool, id: UserId) -> Result<Vec<User>> {
    let rows =
        sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE id <> $1 ORDER BY username")
            .bind(id.0)
            .fetch_all(db)
            .await?;

    Ok(rows.into_iter().map(User::from).collect())
}
