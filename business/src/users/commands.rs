//! Manual-only commands for the user collection.
//!
//! The synchronous part marks [`UsersState`] busy; the network call runs on a Tokio task and
//! every outcome, success or failure, is recorded in [`UsersState::action`].

use log::{info, warn};
use roster_states::{Command, CommandFuture, Dep, Updater};
use ustr::Ustr;

use crate::{
    CreateUserRequest, Services, UpdateUserRequest, UserActionKind, UserListViewState, UsersState,
};

pub const FETCH_FALLBACK: &str = "Unable to load users";
pub const CREATE_FALLBACK: &str = "Unable to create user";
pub const UPDATE_FALLBACK: &str = "Unable to update user";
pub const DELETE_FALLBACK: &str = "Unable to delete user";
pub const GET_FALLBACK: &str = "Unable to load user";

fn report_failure(
    updater: &Updater,
    kind: UserActionKind,
    target: Option<Ustr>,
    message: String,
) {
    updater.update::<UsersState>(move |users| users.fail_action(kind, target, message));
}

/// Load one page and replace the whole collection with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchUsersCommand {
    pub skip: u64,
    pub limit: u64,
}

impl Default for FetchUsersCommand {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

impl Command for FetchUsersCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        updater.update::<UsersState>(UsersState::start_fetch);

        Box::pin(async move {
            match services.users.list(self.skip, self.limit).await {
                Ok(page) => {
                    info!("Loaded {} of {} users", page.users.len(), page.total);
                    updater.update::<UsersState>(move |users| users.finish_fetch(page));
                }
                Err(e) => {
                    warn!("Listing users failed: {e}");
                    let message = e.display_message(FETCH_FALLBACK);
                    updater.update::<UsersState>(move |users| users.fail(message));
                }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserCommand {
    pub request: CreateUserRequest,
}

impl Command for CreateUserCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let kind = UserActionKind::Create;
        updater.update::<UsersState>(move |users| users.begin_action(kind, None));

        Box::pin(async move {
            match services.users.create(&self.request).await {
                Ok(user) => {
                    info!("Created user {} ({})", user.email, user.id);
                    updater.update::<UsersState>(move |users| users.user_created(user));
                    updater.update::<UserListViewState>(UserListViewState::on_user_created);
                }
                Err(e) => {
                    warn!("Creating {} failed: {e}", self.request.email);
                    report_failure(&updater, kind, None, e.display_message(CREATE_FALLBACK));
                }
            }
        })
    }
}

/// Send a partial update and replace the record with the server's copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserCommand {
    pub id: String,
    pub request: UpdateUserRequest,
}

impl Command for UpdateUserCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let kind = UserActionKind::Update;
        let target = Some(Ustr::from(&self.id));
        updater.update::<UsersState>(move |users| users.begin_action(kind, target));

        Box::pin(async move {
            match services.users.update(&self.id, &self.request).await {
                Ok(user) => {
                    info!("Updated user {}", user.id);
                    let id = user.id.clone();
                    updater.update::<UsersState>(move |users| users.user_updated(user));
                    updater.update::<UserListViewState>(move |view| view.on_user_updated(&id));
                }
                Err(e) => {
                    warn!("Updating user {} failed: {e}", self.id);
                    report_failure(&updater, kind, target, e.display_message(UPDATE_FALLBACK));
                }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUserCommand {
    pub id: String,
}

impl Command for DeleteUserCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let kind = UserActionKind::Delete;
        let target = Some(Ustr::from(&self.id));
        updater.update::<UsersState>(move |users| users.begin_action(kind, target));

        Box::pin(async move {
            match services.users.delete(&self.id).await {
                Ok(()) => {
                    info!("Deleted user {}", self.id);
                    let id = self.id;
                    let view_id = id.clone();
                    updater.update::<UsersState>(move |users| users.user_deleted(&id));
                    updater
                        .update::<UserListViewState>(move |view| view.on_user_deleted(&view_id));
                }
                Err(e) => {
                    warn!("Deleting user {} failed: {e}", self.id);
                    report_failure(&updater, kind, target, e.display_message(DELETE_FALLBACK));
                }
            }
        })
    }
}

/// Load a single record and patch it into the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchUserCommand {
    pub id: String,
}

impl Command for FetchUserCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let kind = UserActionKind::Get;
        let target = Some(Ustr::from(&self.id));
        updater.update::<UsersState>(move |users| users.begin_action(kind, target));

        Box::pin(async move {
            match services.users.get(&self.id).await {
                Ok(user) => {
                    let fresh = user.clone();
                    updater.update::<UsersState>(move |users| users.user_loaded(user));
                    updater.update::<UserListViewState>(move |view| view.on_user_loaded(&fresh));
                }
                Err(e) => {
                    warn!("Loading user {} failed: {e}", self.id);
                    report_failure(&updater, kind, target, e.display_message(GET_FALLBACK));
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::test_utils::{TestContext, ana_and_bob, list_json, sample_user};
    use crate::{CreateUserForm, Role, UserActionState, UserModal, UserStats};

    async fn loaded(t: &mut TestContext) {
        t.mount(
            "GET",
            "/users",
            ResponseTemplate::new(200).set_body_json(list_json(&ana_and_bob(), 2)),
        )
        .await;
        t.ctx.dispatch(FetchUsersCommand::default());
        t.ctx.settle().await;
    }

    #[tokio::test]
    async fn fetch_sends_paging_and_bearer() {
        let mut t = TestContext::authenticated("tok").await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "100"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&ana_and_bob(), 12)))
            .expect(1)
            .mount(&t.mock_server)
            .await;

        t.ctx.dispatch(FetchUsersCommand::default());
        assert!(t.ctx.state::<UsersState>().is_loading());
        t.ctx.settle().await;

        let users = t.ctx.state::<UsersState>();
        assert!(!users.is_loading());
        assert_eq!(users.users().len(), 2);
        assert_eq!(users.total(), 12);
        assert_eq!(
            UserStats::compute(users.users(), users.total()),
            UserStats {
                total: 12,
                active: 1,
                verified: 0,
                admins: 1
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_uses_fallback() {
        let mut t = TestContext::authenticated("tok").await;
        t.mount("GET", "/users", ResponseTemplate::new(502)).await;

        t.ctx.dispatch(FetchUsersCommand::default());
        t.ctx.settle().await;

        assert_eq!(t.ctx.state::<UsersState>().error(), Some(FETCH_FALLBACK));
    }

    #[tokio::test]
    async fn create_appends_and_closes_modal() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;

        let created = sample_user("u-cy", "Cy Park", Role::Moderator, true);
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "email": "cy@x.com",
                "full_name": "Cy Park",
                "password": "password1",
                "role": "moderator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(&created))
            .expect(1)
            .mount(&t.mock_server)
            .await;

        t.ctx.update::<UserListViewState>(|view| {
            view.open_create();
            view.create_form = CreateUserForm {
                full_name: "Cy Park".to_owned(),
                email: "cy@x.com".to_owned(),
                password: "password1".to_owned(),
                role: Role::Moderator,
                ..Default::default()
            };
        });
        let request = t
            .ctx
            .state::<UserListViewState>()
            .create_form
            .to_request()
            .expect("valid form");

        t.ctx.dispatch(CreateUserCommand { request });
        t.ctx.settle().await;

        let users = t.ctx.state::<UsersState>();
        assert_eq!(users.users().len(), 3);
        assert_eq!(users.total(), 3);
        assert!(matches!(
            users.action(),
            UserActionState::Succeeded {
                kind: UserActionKind::Create,
                ..
            }
        ));

        let view = t.ctx.state::<UserListViewState>();
        assert_eq!(view.modal, UserModal::Closed);
        assert_eq!(view.create_form, CreateUserForm::default());
    }

    #[tokio::test]
    async fn duplicate_email_keeps_modal_and_values() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;
        t.mount(
            "POST",
            "/users",
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Email already registered"})),
        )
        .await;

        let form = CreateUserForm {
            full_name: "Ana Again".to_owned(),
            email: "ana@x.com".to_owned(),
            password: "password1".to_owned(),
            ..Default::default()
        };
        t.ctx.update::<UserListViewState>(|view| {
            view.open_create();
            view.create_form = form.clone();
        });

        let request = form.to_request().expect("valid form");
        t.ctx.dispatch(CreateUserCommand { request });
        t.ctx.settle().await;

        let users = t.ctx.state::<UsersState>();
        assert_eq!(users.users().len(), 2);
        assert_eq!(users.total(), 2);
        assert_eq!(
            users.action().failure(UserActionKind::Create),
            Some("Email already registered")
        );

        let view = t.ctx.state::<UserListViewState>();
        assert_eq!(view.modal, UserModal::Create);
        assert_eq!(view.create_form, form);
    }

    #[tokio::test]
    async fn confirm_delete_removes_exactly_that_user() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;
        Mock::given(method("DELETE"))
            .and(path("/users/u-bob"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&t.mock_server)
            .await;

        t.ctx.update::<UserListViewState>(|view| view.delete_confirm.arm("u-bob"));
        t.ctx.dispatch(DeleteUserCommand {
            id: "u-bob".to_owned(),
        });
        t.ctx.settle().await;

        let users = t.ctx.state::<UsersState>();
        assert_eq!(users.total(), 1);
        assert!(users.find("u-bob").is_none());
        assert!(users.find("u-ana").is_some());
        assert_eq!(t.ctx.state::<UserListViewState>().delete_confirm.armed(), None);
    }

    #[tokio::test]
    async fn failed_delete_stays_armed() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;
        t.mount(
            "DELETE",
            "/users/u-bob",
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "User not found"})),
        )
        .await;

        t.ctx.update::<UserListViewState>(|view| view.delete_confirm.arm("u-bob"));
        t.ctx.dispatch(DeleteUserCommand {
            id: "u-bob".to_owned(),
        });
        t.ctx.settle().await;

        assert_eq!(t.ctx.state::<UsersState>().users().len(), 2);
        assert_eq!(t.ctx.state::<UsersState>().error(), Some("User not found"));
        assert!(
            t.ctx
                .state::<UserListViewState>()
                .delete_confirm
                .is_armed("u-bob")
        );
    }

    #[tokio::test]
    async fn update_replaces_record_and_closes_edit() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;

        let mut promoted = sample_user("u-bob", "Bob Lee", Role::Moderator, true);
        promoted.department = Some("Support".to_owned());
        Mock::given(method("PUT"))
            .and(path("/users/u-bob"))
            .and(body_json(serde_json::json!({"role": "moderator", "is_active": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&promoted))
            .expect(1)
            .mount(&t.mock_server)
            .await;

        let bob = t
            .ctx
            .state::<UsersState>()
            .find("u-bob")
            .cloned()
            .expect("bob is listed");
        t.ctx.update::<UserListViewState>(|view| view.open_edit(&bob));

        let request = match &mut t.ctx.state_mut::<UserListViewState>().modal {
            UserModal::Edit(form) => {
                form.role = Role::Moderator;
                form.is_active = true;
                form.to_request().expect("valid edit")
            }
            other => panic!("expected edit modal, got {other:?}"),
        };

        t.ctx.dispatch(UpdateUserCommand {
            id: "u-bob".to_owned(),
            request,
        });
        t.ctx.settle().await;

        let users = t.ctx.state::<UsersState>();
        assert_eq!(users.find("u-bob"), Some(&promoted));
        assert_eq!(users.total(), 2);
        assert_eq!(t.ctx.state::<UserListViewState>().modal, UserModal::Closed);
    }

    #[tokio::test]
    async fn fetch_user_patches_and_refreshes_edit_form() {
        let mut t = TestContext::authenticated("tok").await;
        loaded(&mut t).await;

        let mut fresh = sample_user("u-ana", "Ana Ruiz", Role::Admin, true);
        fresh.phone = Some("555-0100".to_owned());
        t.mount(
            "GET",
            "/users/u-ana",
            ResponseTemplate::new(200).set_body_json(&fresh),
        )
        .await;

        let ana = ana_and_bob().remove(0);
        t.ctx.update::<UserListViewState>(|view| view.open_edit(&ana));
        t.ctx.dispatch(FetchUserCommand {
            id: "u-ana".to_owned(),
        });
        t.ctx.settle().await;

        assert_eq!(
            t.ctx
                .state::<UsersState>()
                .find("u-ana")
                .and_then(|u| u.phone.as_deref()),
            Some("555-0100")
        );
        match &t.ctx.state::<UserListViewState>().modal {
            UserModal::Edit(form) => assert_eq!(form.phone, "555-0100"),
            other => panic!("expected edit modal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_user_not_found_is_reported() {
        let mut t = TestContext::authenticated("tok").await;
        t.mount(
            "GET",
            "/users/ghost",
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "User not found"})),
        )
        .await;

        t.ctx.dispatch(FetchUserCommand {
            id: "ghost".to_owned(),
        });
        t.ctx.settle().await;

        assert_eq!(
            t.ctx.state::<UsersState>().action().failure(UserActionKind::Get),
            Some("User not found")
        );
    }
}
