//! # User model
//!
//! Defines the two representations of a warehouse portal user:
//!
//! ## [`User`] (server only)
//!
//! The canonical record held by a [`UserStore`](crate::db::UserStore):
//!
//! - `id`: UUID v4 generated at registration.
//! - `username`, `email`: each unique across the store.
//! - `password_hash`: Argon2id PHC string. Never leaves the server.
//! - `full_name`: optional display name.
//! - `role` / `dashboard_type`: which dashboard the user sees and its label.
//! - `last_login` / `created_at`: audit timestamps.
//!
//! ## [`UserInfo`]
//!
//! The sanitized projection that crosses the wire and is what the client keeps
//! in its session. It has no password field at all and rejects unknown fields
//! on deserialization, so a stored blob carrying anything extra (a password,
//! for instance) fails to load instead of being silently accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// Full user record from the store.
#[cfg(feature = "server")]
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub dashboard_type: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Everything except the password hash.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
            dashboard_type: self.dashboard_type.clone(),
            last_login: self.last_login,
            created_at: Some(self.created_at),
        }
    }

    /// Projection returned by registration.
    pub fn to_registration_info(&self) -> UserInfo {
        UserInfo {
            last_login: None,
            ..self.to_info()
        }
    }

    /// Projection returned by login.
    pub fn to_login_info(&self) -> UserInfo {
        UserInfo {
            created_at: None,
            ..self.to_info()
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserInfo {
    /// Get display name, falling back to the username if no full name is set.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    /// Check that the identifying fields are populated.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("missing id");
        }
        if self.username.trim().is_empty() {
            return Err("missing username");
        }
        if self.email.trim().is_empty() {
            return Err("missing email");
        }
        Ok(())
    }
}
