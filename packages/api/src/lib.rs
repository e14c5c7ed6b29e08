//! # API crate for accounts and the auth REST API
//!
//! This crate is shared by the server and the frontends. Client builds (WASM)
//! compile it without the `server` feature and get only the wire types and the
//! HTTP client; the server build adds the user store, the auth service and the
//! axum routes.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] |: (`server` for the service) | Auth service (register, login, change-password, list-users), Argon2id password hashing, user-facing messages |
//! | [`client`] |: | [`AuthClient`], the reqwest client the frontends call the API with |
//! | [`config`] | `server` | [`Settings`](config::Settings) loaded with the `config` crate |
//! | [`db`] | `server` | [`UserStore`](db::UserStore) trait with in-memory and PostgreSQL backends |
//! | [`error`] |: | [`ApiError`] taxonomy and its HTTP mapping |
//! | [`models`] |: | [`UserInfo`], [`Role`], request bodies and the response envelope |
//! | [`routes`] | `server` | axum router mounting `/api/auth/*` |

pub mod auth;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod routes;

pub use client::{AuthClient, ClientError};
pub use error::ApiError;
pub use models::{ApiResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, Role, UserInfo};
