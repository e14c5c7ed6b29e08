//! JSON envelope shared by every auth endpoint.
//!
//! Successful responses carry `success: true` plus whichever payload the
//! endpoint returns (`user`, or `count` + `users`, or just a `message`).
//! Failures carry `success: false`, a `message`, and for field validation
//! failures an `errors` list with one entry per offending field.

use serde::{Deserialize, Serialize};

use super::UserInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserInfo>>,
}

impl ApiResponse {
    pub fn with_user(user: UserInfo) -> Self {
        Self {
            success: true,
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn with_users(users: Vec<UserInfo>) -> Self {
        Self {
            success: true,
            count: Some(users.len()),
            users: Some(users),
            ..Self::default()
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors,
            ..Self::default()
        }
    }
}
