use std::sync::Arc;

use egui_kittest::Harness;
use roster_business::storage::keys;
use roster_business::{KeyValueStore, MemoryStore};
use roster_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    store: Arc<MemoryStore>,
    harness: Harness<'a, State>,
}

impl<'a> TestCtx<'a> {
    /// The whole app shell with nobody signed in.
    pub async fn new() -> Self {
        Self::with_store(MemoryStore::new(), Vec::new()).await
    }

    /// Signed in with `token`. The mocks are mounted before the first frame so the initial list
    /// fetch already sees them.
    #[allow(unused)]
    pub async fn authenticated(token: &str, mocks: Vec<Mock>) -> Self {
        let store = MemoryStore::with_entries([
            (keys::ACCESS_TOKEN, token),
            (keys::REFRESH_TOKEN, "refresh-1"),
        ]);
        Self::with_store(store, mocks).await
    }

    async fn with_store(store: MemoryStore, mocks: Vec<Mock>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&mock_server).await;
        }

        let store = Arc::new(store);
        let state = State::test_with_store(mock_server.uri(), store.clone());
        let harness = Harness::builder()
            .with_size(egui::vec2(1280.0, 900.0))
            .build_ui_state(
                |ui, state: &mut State| roster_ui::app::render(state, ui),
                state,
            );

        Self {
            mock_server,
            store,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, State> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, State> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    #[allow(unused)]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Wait for every dispatched command, then render twice so the results are on screen.
    pub async fn settle(&mut self) {
        self.harness.state_mut().ctx.settle().await;
        self.harness.step();
        self.harness.step();
    }
}

#[allow(unused)]
pub fn mock(http_method: &str, endpoint: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .respond_with(response)
}

#[allow(unused)]
pub fn user_json(id: &str, full_name: &str, role: &str, is_active: bool) -> serde_json::Value {
    let first = full_name
        .split_whitespace()
        .next()
        .unwrap_or(id)
        .to_lowercase();

    serde_json::json!({
        "id": id,
        "email": format!("{first}@x.com"),
        "full_name": full_name,
        "role": role,
        "is_active": is_active,
        "is_verified": is_active,
        "phone": null,
        "department": null,
        "created_at": "2024-01-01T09:30:00",
        "updated_at": "2024-01-02T09:30:00"
    })
}

/// Ana (admin, active) and Bob (standard, inactive).
#[allow(unused)]
pub fn ana_and_bob_json() -> serde_json::Value {
    serde_json::json!({
        "users": [
            user_json("u-ana", "Ana Ruiz", "admin", true),
            user_json("u-bob", "Bob Lee", "user", false)
        ],
        "total": 2,
        "skip": 0,
        "limit": 100
    })
}

#[allow(unused)]
pub fn auth_response_json(access: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "refresh_token": format!("{access}-refresh"),
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

/// The list endpoint answering with Ana and Bob.
#[allow(unused)]
pub fn ana_and_bob_mock() -> Mock {
    mock(
        "GET",
        "/users",
        ResponseTemplate::new(200).set_body_json(ana_and_bob_json()),
    )
}
