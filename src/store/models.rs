//! Row types and read queries for the two application tables.
//!
//! These are plain pass-through reads; every invariant lives in the schema.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// A registered user. The password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, email, username, created_at, updated_at FROM users ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, email, username, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

/// A content post belonging to a user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Post {
    /// List posts, optionally filtered by status, newest first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Post>, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_as(
                    "SELECT id, user_id, title, content, status, created_at, updated_at \
                     FROM posts WHERE status = $1 ORDER BY created_at DESC, id DESC",
                )
                .bind(status)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, user_id, title, content, status, created_at, updated_at \
                     FROM posts ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(pool)
                .await
            }
        }
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, user_id, title, content, status, created_at, updated_at \
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
