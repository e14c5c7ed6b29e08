//! Data models shared by the server and the frontends.

mod request;
mod response;
mod role;
mod user;

pub use request::{ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use response::ApiResponse;
pub use role::Role;
#[cfg(feature = "server")]
pub use user::User;
pub use user::UserInfo;
