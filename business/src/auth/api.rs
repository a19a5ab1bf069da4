//! Auth service adapter.
//!
//! Every call is a single request/response round trip; failures are returned once and never
//! retried.

use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;
use crate::{
    ApiError, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, RegisteredUser,
};

#[async_trait]
pub trait AuthApi: Send + Sync + std::fmt::Debug {
    /// `POST /auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/logout` with the bearer token.
    async fn logout(&self, access_token: &str) -> Result<(), ApiError>;

    /// `POST /auth/refresh`
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    http: HttpClient,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(base_url),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        debug!("Signing in as {email}");
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };

        self.http
            .post("/auth/login")
            .json(&body)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        self.http
            .post("/auth/logout")
            .bearer(Some(access_token))
            .json(&serde_json::json!({}))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_owned(),
        };

        self.http
            .post("/auth/refresh")
            .json(&body)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        debug!("Registering {}", request.email);
        self.http
            .post("/auth/register")
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}
