//! # Auth service
//!
//! The four account operations behind `/api/auth/*`. Each call is independent:
//! it validates its input, performs at most one read and one write against the
//! [`UserStore`], and returns either a sanitized [`UserInfo`] or an
//! [`ApiError`]. Store and hashing failures are logged here and surface to the
//! caller only as the generic internal error.
//!
//! Identifiers (username, email) are missing when absent or blank. Passwords
//! are missing only when absent or empty; whitespace is a legal password.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::password::{hash_password, verify_password, verify_unknown_user};
use super::{
    EMAIL_TAKEN, INCORRECT_CURRENT_PASSWORD, INVALID_CREDENTIALS, INVALID_ROLE,
    MIN_PASSWORD_LENGTH, USERNAME_TAKEN, USER_NOT_FOUND,
};
use crate::db::{UniqueField, UserStore};
use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, User, UserInfo};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

/// `Some` only if the field is present and not blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `Some` only if the password is present and non-empty. No trimming.
fn secret(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn internal(context: &str, err: impl fmt::Display) -> ApiError {
    tracing::error!(error = %err, "{context}");
    ApiError::internal()
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create an account. Email collisions are reported ahead of username ones.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserInfo, ApiError> {
        let username = present(request.username);
        let email = present(request.email);
        let password = secret(request.password);

        let (Some(username), Some(email), Some(password)) =
            (username.clone(), email.clone(), password.clone())
        else {
            let mut errors = Vec::new();
            if username.is_none() {
                errors.push("Username is required".to_string());
            }
            if email.is_none() {
                errors.push("Email is required".to_string());
            }
            if password.is_none() {
                errors.push("Password is required".to_string());
            }
            return Err(ApiError::Validation {
                message: "Please provide all required fields".to_string(),
                errors,
            });
        };

        // An empty role is the same as none.
        let role = request.role.filter(|r| !r.as_str().is_empty());
        if role.as_ref().is_some_and(|r| !r.is_recognized()) {
            return Err(ApiError::Validation {
                message: INVALID_ROLE.to_string(),
                errors: vec!["Role is invalid".to_string()],
            });
        }

        match self.store.find_conflict(&email, &username).await? {
            Some(UniqueField::Email) => return Err(ApiError::Conflict(EMAIL_TAKEN.to_string())),
            Some(UniqueField::Username) => {
                return Err(ApiError::Conflict(USERNAME_TAKEN.to_string()))
            }
            None => {}
        }

        let password_hash =
            hash_password(&password).map_err(|e| internal("failed to hash password", e))?;

        let dashboard_type = present(request.dashboard_type).or_else(|| {
            role.as_ref()
                .and_then(|r| r.default_dashboard_label())
                .map(str::to_string)
        });

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            full_name: present(request.full_name),
            role,
            dashboard_type,
            last_login: None,
            created_at: Utc::now(),
        };

        // A concurrent registration may have claimed a key since the checks
        // above; the store reports that as a duplicate.
        self.store.insert(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "registered user");
        Ok(user.to_registration_info())
    }

    /// Check credentials and stamp `last_login`.
    pub async fn login(&self, request: LoginRequest) -> Result<UserInfo, ApiError> {
        let (Some(username), Some(password)) =
            (present(request.username), secret(request.password))
        else {
            return Err(ApiError::validation("Username and password are required"));
        };

        let Some(mut user) = self.store.find_by_username(&username).await? else {
            verify_unknown_user(&password);
            tracing::debug!(%username, "login for unknown username");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let valid = verify_password(&password, &user.password_hash)
            .map_err(|e| internal("stored password hash is malformed", e))?;
        if !valid {
            tracing::debug!(%username, "login with wrong password");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now();
        self.store.update_last_login(user.id, now).await?;
        user.last_login = Some(now);

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user.to_login_info())
    }

    /// Replace a user's password after checking the current one.
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), ApiError> {
        let (Some(username), Some(current_password), Some(new_password)) = (
            present(request.username),
            secret(request.current_password),
            secret(request.new_password),
        ) else {
            return Err(ApiError::validation("All fields are required"));
        };

        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::validation(format!(
                "New password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        let Some(user) = self.store.find_by_username(&username).await? else {
            return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
        };

        let valid = verify_password(&current_password, &user.password_hash)
            .map_err(|e| internal("stored password hash is malformed", e))?;
        if !valid {
            return Err(ApiError::Unauthorized(INCORRECT_CURRENT_PASSWORD.to_string()));
        }

        let password_hash =
            hash_password(&new_password).map_err(|e| internal("failed to hash password", e))?;
        self.store.update_password(user.id, &password_hash).await?;

        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    /// Every user, oldest first, without password hashes.
    pub async fn list_users(&self) -> Result<Vec<UserInfo>, ApiError> {
        let users = self.store.list().await?;
        Ok(users.iter().map(User::to_info).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;
    use crate::models::Role;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryUserStore::new()))
    }

    async fn register(service: &AuthService, username: &str, email: &str, password: &str) {
        service
            .register(RegisterRequest::new(username, email, password))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_then_list() {
        let service = service();
        let user = service
            .register(RegisterRequest::new("alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@x.com");
        assert!(user.created_at.is_some());
        assert!(user.last_login.is_none());
        assert!(user.role.is_none());

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].id, user.id);

        let json = serde_json::to_value(&users).unwrap();
        assert!(json[0].get("password").is_none());
        assert!(json[0].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        let err = service
            .register(RegisterRequest::new("alice", "bob@x.com", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Conflict("Username already taken".to_string()));
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_takes_precedence() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        for username in ["alice", "bob"] {
            let err = service
                .register(RegisterRequest::new(username, "alice@x.com", "secret2"))
                .await
                .unwrap_err();
            assert_eq!(err, ApiError::Conflict("Email already registered".to_string()));
        }
    }

    #[tokio::test]
    async fn test_register_reports_each_missing_field() {
        let service = service();
        let err = service
            .register(RegisterRequest {
                username: Some("  ".to_string()),
                email: None,
                password: Some("secret1".to_string()),
                ..RegisterRequest::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.field_errors(),
            ["Username is required".to_string(), "Email is required".to_string()]
        );
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_with_role_fills_dashboard_label() {
        let service = service();
        let user = service
            .register(
                RegisterRequest::new("carol", "carol@x.com", "secret1")
                    .with_full_name("Carol")
                    .with_role(Role::OperationsCompliance),
            )
            .await
            .unwrap();

        assert_eq!(user.role, Some(Role::OperationsCompliance));
        assert_eq!(user.dashboard_type.as_deref(), Some("Operations Compliance Dashboard"));
        assert_eq!(user.full_name.as_deref(), Some("Carol"));
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let service = service();
        let err = service
            .register(
                RegisterRequest::new("dave", "dave@x.com", "secret1")
                    .with_role(Role::from("admin")),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid role");
        assert_eq!(err.field_errors(), ["Role is invalid".to_string()]);
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_empty_role_is_no_role() {
        let service = service();
        let user = service
            .register(
                RegisterRequest::new("erin", "erin@x.com", "secret1").with_role(Role::from("")),
            )
            .await
            .unwrap();

        assert!(user.role.is_none());
        assert!(user.dashboard_type.is_none());
        assert!(service.list_users().await.unwrap()[0].role.is_none());
    }

    #[tokio::test]
    async fn test_whitespace_password_is_a_real_password() {
        let service = service();
        register(&service, "alice", "alice@x.com", "      ").await;

        service.login(LoginRequest::new("alice", "      ")).await.unwrap();
        assert!(service.login(LoginRequest::new("alice", "     ")).await.is_err());

        service
            .change_password(ChangePasswordRequest::new("alice", "      ", "        "))
            .await
            .unwrap();
        service.login(LoginRequest::new("alice", "        ")).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_password_is_missing() {
        let service = service();
        let err = service
            .register(RegisterRequest::new("alice", "alice@x.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.field_errors(), ["Password is required".to_string()]);

        register(&service, "alice", "alice@x.com", "secret1").await;
        let err = service
            .change_password(ChangePasswordRequest::new("alice", "secret1", ""))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::validation("All fields are required"));
    }

    #[tokio::test]
    async fn test_login_success_stamps_last_login() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        let user = service
            .login(LoginRequest::new("alice", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.last_login.is_some());
        assert!(user.created_at.is_none());

        let stored = service.list_users().await.unwrap();
        assert_eq!(stored[0].last_login, user.last_login);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        let cases = [("alice", "SECRET1"), ("alice", "secret"), ("mallory", "secret1")];
        for (username, password) in cases {
            let err = service
                .login(LoginRequest::new(username, password))
                .await
                .unwrap_err();
            assert_eq!(err, ApiError::Unauthorized("Invalid username or password".to_string()));
        }

        assert!(service.list_users().await.unwrap()[0].last_login.is_none());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let service = service();
        let err = service
            .login(LoginRequest {
                username: Some("alice".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::validation("Username and password are required"));
    }

    #[tokio::test]
    async fn test_change_password_rejects_short_password_even_when_current_is_right() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        let err = service
            .change_password(ChangePasswordRequest::new("alice", "secret1", "abc12"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::validation("New password must be at least 6 characters long")
        );

        // old password still works
        service.login(LoginRequest::new("alice", "secret1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_change_password_errors() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        let missing = service
            .change_password(ChangePasswordRequest::default())
            .await
            .unwrap_err();
        assert_eq!(missing, ApiError::validation("All fields are required"));

        let unknown = service
            .change_password(ChangePasswordRequest::new("bob", "secret1", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(unknown, ApiError::NotFound("User not found".to_string()));

        let wrong = service
            .change_password(ChangePasswordRequest::new("alice", "wrong-one", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(
            wrong,
            ApiError::Unauthorized("Current password is incorrect".to_string())
        );
    }

    #[tokio::test]
    async fn test_change_password_then_login_with_new_password() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;

        service
            .change_password(ChangePasswordRequest::new("alice", "secret1", "brand-new"))
            .await
            .unwrap();

        assert!(service.login(LoginRequest::new("alice", "secret1")).await.is_err());
        service.login(LoginRequest::new("alice", "brand-new")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_users_keeps_registration_order() {
        let service = service();
        register(&service, "alice", "alice@x.com", "secret1").await;
        register(&service, "bob", "bob@x.com", "secret2").await;
        register(&service, "carol", "carol@x.com", "secret3").await;

        let names: Vec<_> = service
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }
}
