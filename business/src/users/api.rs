//! User service adapter.
//!
//! The bearer token is read from the [`KeyValueStore`] on every call, never cached, so a
//! login or logout between two calls is picked up without rebuilding the adapter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{HttpClient, RequestBuilder};
use crate::storage::keys;
use crate::{ApiError, CreateUserRequest, KeyValueStore, UpdateUserRequest, User, UserListResponse};

#[async_trait]
pub trait UsersApi: Send + Sync + std::fmt::Debug {
    /// `GET /users?skip=&limit=`
    async fn list(&self, skip: u64, limit: u64) -> Result<UserListResponse, ApiError>;

    /// `GET /users/{id}`
    async fn get(&self, id: &str) -> Result<User, ApiError>;

    /// `POST /users`
    async fn create(&self, request: &CreateUserRequest) -> Result<User, ApiError>;

    /// `PUT /users/{id}`
    async fn update(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    http: HttpClient,
    store: Arc<dyn KeyValueStore>,
}

impl HttpUsersApi {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            http: HttpClient::new(base_url),
            store,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.store.get(keys::ACCESS_TOKEN);
        request.bearer(token.as_deref())
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self, skip: u64, limit: u64) -> Result<UserListResponse, ApiError> {
        self.authorized(self.http.get("/users"))
            .query("skip", skip)
            .query("limit", limit)
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.authorized(self.http.get(&format!("/users/{id}")))
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn create(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.authorized(self.http.post("/users"))
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn update(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.authorized(self.http.put(&format!("/users/{id}")))
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.authorized(self.http.delete(&format!("/users/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
