//! HTTP client for the auth API, used by the frontends.
//!
//! Each call is a single request awaited to completion: no retries, no
//! timeouts, no cancellation. Failures the server reports come back as
//! [`ClientError::Server`] carrying its message; anything that stops the
//! request from completing is [`ClientError::Network`], which always displays
//! the same generic message.

use serde::Serialize;
use thiserror::Error;

use crate::models::{ApiResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UserInfo};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The server answered with `success: false`.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        errors: Vec<String>,
    },
    /// The server answered, but not with the expected envelope.
    #[error("Unexpected response from server (status {status})")]
    UnexpectedResponse { status: u16 },
    #[error("Network error, please try again")]
    Network(String),
}

impl ClientError {
    fn network(err: reqwest::Error) -> Self {
        tracing::warn!(error = %err, "auth request failed");
        ClientError::Network(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    /// `base_url` is the origin serving `/api/auth`, without a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserInfo, ClientError> {
        let (status, response) = self.post("/api/auth/register", request).await?;
        response
            .user
            .ok_or(ClientError::UnexpectedResponse { status })
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<UserInfo, ClientError> {
        let (status, response) = self.post("/api/auth/login", request).await?;
        response
            .user
            .ok_or(ClientError::UnexpectedResponse { status })
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<(), ClientError> {
        self.post("/api/auth/change-password", request).await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<UserInfo>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/auth/users", self.base_url))
            .send()
            .await
            .map_err(ClientError::network)?;
        let (status, body) = Self::read(response).await?;
        body.users.ok_or(ClientError::UnexpectedResponse { status })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(u16, ApiResponse), ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::network)?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<(u16, ApiResponse), ClientError> {
        let status = response.status().as_u16();
        let body: ApiResponse = match response.json().await {
            Ok(body) => body,
            Err(err) if err.is_decode() => {
                tracing::warn!(status, error = %err, "undecodable auth response");
                return Err(ClientError::UnexpectedResponse { status });
            }
            Err(err) => return Err(ClientError::network(err)),
        };

        if body.success {
            Ok((status, body))
        } else {
            Err(ClientError::Server {
                status,
                message: body.message.unwrap_or_default(),
                errors: body.errors,
            })
        }
    }
}
