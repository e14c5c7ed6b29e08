//! Local username + password authentication.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod service;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password, verify_unknown_user};
#[cfg(feature = "server")]
pub use service::AuthService;

/// Minimum length, in characters, accepted by change-password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const EMAIL_TAKEN: &str = "Email already registered";
pub const USERNAME_TAKEN: &str = "Username already taken";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const INCORRECT_CURRENT_PASSWORD: &str = "Current password is incorrect";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_ROLE: &str = "Invalid role";
