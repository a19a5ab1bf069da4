//! Helpers for driving commands against a wiremock server.
//!
//! Both services are pointed at the same mock server; the endpoint paths do not overlap.

use std::sync::Arc;

use async_trait::async_trait;
use roster_states::StateCtx;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::storage::keys;
use crate::{
    ApiError, AuthApi, AuthResponse, BusinessConfig, KeyValueStore, MemoryStore,
    RegisterRequest, RegisteredUser, Role, Services, User,
};

pub struct TestContext {
    pub mock_server: MockServer,
    pub store: Arc<MemoryStore>,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_store(MemoryStore::new()).await
    }

    pub async fn with_store(store: MemoryStore) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri(), mock_server.uri());
        let store = Arc::new(store);

        let mut ctx = StateCtx::new();
        Services::http(&config, store.clone()).install(&mut ctx, config);

        Self {
            mock_server,
            store,
            ctx,
        }
    }

    /// A context whose session is already signed in with `token`.
    pub async fn authenticated(token: &str) -> Self {
        Self::with_store(MemoryStore::with_entries([
            (keys::ACCESS_TOKEN, token),
            (keys::REFRESH_TOKEN, "refresh-1"),
        ]))
        .await
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    pub async fn mount(&self, http_method: &str, endpoint: &str, response: ResponseTemplate) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }
}

pub fn auth_response_json(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 1800,
        "user": {
            "id": "u-ana",
            "email": "ana@x.com",
            "full_name": "Ana Ruiz",
            "role": "admin",
            "is_verified": true
        }
    })
}

pub fn sample_user(id: &str, full_name: &str, role: Role, is_active: bool) -> User {
    let first = full_name
        .split_whitespace()
        .next()
        .unwrap_or(id)
        .to_lowercase();

    User {
        id: id.to_owned(),
        email: format!("{first}@x.com"),
        full_name: full_name.to_owned(),
        role,
        is_active,
        is_verified: false,
        phone: None,
        department: None,
        created_at: "2024-01-01T00:00:00".to_owned(),
        updated_at: "2024-01-01T00:00:00".to_owned(),
    }
}

pub fn ana_and_bob() -> Vec<User> {
    vec![
        sample_user("u-ana", "Ana Ruiz", Role::Admin, true),
        sample_user("u-bob", "Bob Lee", Role::User, false),
    ]
}

pub fn list_json(users: &[User], total: u64) -> serde_json::Value {
    serde_json::json!({
        "users": users,
        "total": total,
        "skip": 0,
        "limit": 100
    })
}

/// Auth double whose every call fails at the transport level.
#[derive(Debug, Default)]
pub struct UnreachableAuthApi;

#[async_trait]
impl AuthApi for UnreachableAuthApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::Network("connection refused".to_owned()))
    }

    async fn logout(&self, _access_token: &str) -> Result<(), ApiError> {
        Err(ApiError::Network("connection refused".to_owned()))
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::Network("connection refused".to_owned()))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        Err(ApiError::Network("connection refused".to_owned()))
    }
}
