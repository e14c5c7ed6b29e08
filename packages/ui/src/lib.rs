//! This crate contains the session handling and shared UI for the workspace.

pub mod session;
pub use session::{SessionStore, SESSION_KEY};

mod auth;
pub use auth::{
    api_base_url, platform_storage, use_auth_client, use_session, LogoutButton, SessionProvider,
};

mod dashboard;
pub use dashboard::{Dashboard, RoleDashboard};
