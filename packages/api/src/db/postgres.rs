//! PostgreSQL-backed user store.
//!
//! Uniqueness of `username` and `email` is enforced by the `users_username_key`
//! and `users_email_key` constraints, so two concurrent registrations for the
//! same key cannot both succeed. A unique violation is mapped back to the
//! colliding field by constraint name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{StoreError, UniqueField, UserStore};
use crate::models::{Role, User};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, role, dashboard_type, last_login, created_at";

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    full_name: Option<String>,
    role: Option<String>,
    dashboard_type: Option<String>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: row.role.map(Role::from),
            dashboard_type: row.dashboard_type,
            last_login: row.last_login,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
            Some("users_email_key") => StoreError::Duplicate(UniqueField::Email),
            Some("users_username_key") => StoreError::Duplicate(UniqueField::Username),
            _ => StoreError::Backend(db.to_string()),
        },
        other => other.into(),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.find_by("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_by("email", email).await
    }

    async fn find_conflict(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UniqueField>, StoreError> {
        let email_hits: Vec<bool> = sqlx::query_scalar(
            "SELECT email = $1 FROM users WHERE email = $1 OR username = $2",
        )
        .bind(email)
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(match email_hits.as_slice() {
            [] => None,
            hits if hits.iter().any(|hit| *hit) => Some(UniqueField::Email),
            _ => Some(UniqueField::Username),
        })
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, full_name, role, dashboard_type, last_login, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_ref().map(|r| r.as_str().to_string()))
        .bind(&user.dashboard_type)
        .bind(user.last_login)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let rows: Vec<UserRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
