//! # Database module for the user store
//!
//! The [`UserStore`] trait is the only way the auth service touches persistent
//! state. Two backends implement it:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryUserStore`] | Tests and `store.backend = "memory"`. Duplicate check and insert happen under one lock. |
//! | [`PgUserStore`] | PostgreSQL via SQLx. Uniqueness enforced by `UNIQUE` constraints. |
//!
//! [`open_store`] picks the backend from [`Settings`], connecting the pool and
//! running the embedded migrations for Postgres.
//!
//! This module is entirely gated behind `#[cfg(feature = "server")]`.

#[cfg(feature = "server")]
mod memory;
#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
mod postgres;

#[cfg(feature = "server")]
pub use memory::MemoryUserStore;
#[cfg(feature = "server")]
pub use pool::connect_pool;
#[cfg(feature = "server")]
pub use postgres::PgUserStore;
#[cfg(feature = "server")]
pub use store::{open_store, StoreError, UniqueField, UserStore};

#[cfg(feature = "server")]
mod store {
    use std::fmt;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use thiserror::Error;
    use uuid::Uuid;

    use crate::config::{Settings, StoreBackend};
    use crate::models::User;

    use super::{connect_pool, MemoryUserStore, PgUserStore};

    /// Which unique key an insert collided with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UniqueField {
        Email,
        Username,
    }

    impl fmt::Display for UniqueField {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                UniqueField::Email => f.write_str("email"),
                UniqueField::Username => f.write_str("username"),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum StoreError {
        #[error("duplicate {0}")]
        Duplicate(UniqueField),
        #[error("user store backend error: {0}")]
        Backend(String),
    }

    impl From<sqlx::Error> for StoreError {
        fn from(err: sqlx::Error) -> Self {
            StoreError::Backend(err.to_string())
        }
    }

    /// Persistent collection of user records.
    #[async_trait]
    pub trait UserStore: Send + Sync {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

        /// Which key, if any, an existing user already holds, in one read.
        /// Email wins when both collide.
        async fn find_conflict(
            &self,
            email: &str,
            username: &str,
        ) -> Result<Option<UniqueField>, StoreError>;

        /// Insert a new user. When both keys collide the email is reported.
        async fn insert(&self, user: &User) -> Result<(), StoreError>;

        async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;

        async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;

        /// All users, oldest first.
        async fn list(&self) -> Result<Vec<User>, StoreError>;
    }

    /// Build the configured user store.
    pub async fn open_store(settings: &Settings) -> Result<Arc<dyn UserStore>, StoreError> {
        match settings.store.backend {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory user store; users are lost on restart");
                Ok(Arc::new(MemoryUserStore::new()))
            }
            StoreBackend::Postgres => {
                let pool = connect_pool(&settings.database).await?;
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                tracing::info!("connected to postgres user store");
                Ok(Arc::new(PgUserStore::new(pool)))
            }
        }
    }
}
