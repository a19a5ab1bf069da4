//! Pure view logic for the user list page: filtering, summary counts, delete confirmation
//! and the create/edit form models.

use roster_states::State;
use ustr::Ustr;

use crate::{CreateUserRequest, FormError, Role, UpdateUserRequest, User};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_password(password: &str) -> Result<(), FormError> {
    if password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All statuses",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    fn accepts(self, is_active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }
}

/// Search / role / status predicate. `role: None` means every role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub status: StatusFilter,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.to_lowercase();
        let text_ok = needle.is_empty()
            || user.full_name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle);

        text_ok
            && self.role.is_none_or(|role| user.role == role)
            && self.status.accepts(user.is_active)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Summary counts. `total` is the server total; the others count the loaded page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: u64,
    pub active: usize,
    pub verified: usize,
    pub admins: usize,
}

impl UserStats {
    pub fn compute(users: &[User], total: u64) -> Self {
        Self {
            total,
            active: users.iter().filter(|u| u.is_active).count(),
            verified: users.iter().filter(|u| u.is_verified).count(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
        }
    }

    pub fn inactive(&self) -> u64 {
        self.total.saturating_sub(self.active as u64)
    }
}

/// At most one row is armed for deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteConfirm {
    armed: Option<Ustr>,
}

impl DeleteConfirm {
    pub fn arm(&mut self, id: &str) {
        self.armed = Some(Ustr::from(id));
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn armed(&self) -> Option<Ustr> {
        self.armed
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.is_some_and(|armed| armed.as_str() == id)
    }
}

/// Values of the create-user modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub department: String,
}

impl CreateUserForm {
    pub fn to_request(&self) -> Result<CreateUserRequest, FormError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(FormError::Required("Full name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail);
        }
        validate_password(&self.password)?;

        Ok(CreateUserRequest {
            email: email.to_owned(),
            full_name: full_name.to_owned(),
            password: self.password.clone(),
            role: self.role,
            phone: non_blank(&self.phone),
            department: non_blank(&self.department),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Values of the edit modal, alongside the record they started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditUserForm {
    pub id: Ustr,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub phone: String,
    pub department: String,
    pub is_active: bool,
    original: User,
}

impl EditUserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Ustr::from(&user.id),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            phone: user.phone.clone().unwrap_or_default(),
            department: user.department.clone().unwrap_or_default(),
            is_active: user.is_active,
            original: user.clone(),
        }
    }

    /// Pick up a freshly loaded record, keeping fields the user already edited.
    pub fn refresh(&mut self, user: &User) {
        let edited = self.clone();
        let pristine = Self::from_user(&self.original);
        *self = Self::from_user(user);

        if edited.full_name != pristine.full_name {
            self.full_name = edited.full_name;
        }
        if edited.role != pristine.role {
            self.role = edited.role;
        }
        if edited.phone != pristine.phone {
            self.phone = edited.phone;
        }
        if edited.department != pristine.department {
            self.department = edited.department;
        }
        if edited.is_active != pristine.is_active {
            self.is_active = edited.is_active;
        }
    }

    /// Only the fields that differ from the original record.
    pub fn to_request(&self) -> Result<UpdateUserRequest, FormError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(FormError::Required("Full name"));
        }

        let changed = |now: &str, before: Option<&str>| {
            (now.trim() != before.unwrap_or_default()).then(|| now.trim().to_owned())
        };

        Ok(UpdateUserRequest {
            full_name: changed(full_name, Some(&self.original.full_name)),
            phone: changed(&self.phone, self.original.phone.as_deref()),
            department: changed(&self.department, self.original.department.as_deref()),
            role: (self.role != self.original.role).then_some(self.role),
            is_active: (self.is_active != self.original.is_active).then_some(self.is_active),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserModal {
    #[default]
    Closed,
    Create,
    Edit(EditUserForm),
}

/// Ephemeral state of the user list page. Reset on sign out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListViewState {
    pub filter: UserFilter,
    pub delete_confirm: DeleteConfirm,
    pub modal: UserModal,
    pub create_form: CreateUserForm,
    /// Local validation message for the open modal.
    pub form_error: Option<String>,
    fetched: bool,
}

impl State for UserListViewState {}

impl UserListViewState {
    /// True exactly once per entry into the list page.
    pub fn take_initial_fetch(&mut self) -> bool {
        !std::mem::replace(&mut self.fetched, true)
    }

    pub fn open_create(&mut self) {
        self.form_error = None;
        self.modal = UserModal::Create;
    }

    pub fn open_edit(&mut self, user: &User) {
        self.form_error = None;
        self.modal = UserModal::Edit(EditUserForm::from_user(user));
    }

    pub fn close_modal(&mut self) {
        self.form_error = None;
        self.modal = UserModal::Closed;
    }

    pub fn on_user_created(&mut self) {
        self.create_form = CreateUserForm::default();
        if self.modal == UserModal::Create {
            self.close_modal();
        }
    }

    pub fn on_user_updated(&mut self, id: &str) {
        if matches!(&self.modal, UserModal::Edit(form) if form.id.as_str() == id) {
            self.close_modal();
        }
    }

    pub fn on_user_loaded(&mut self, user: &User) {
        if let UserModal::Edit(form) = &mut self.modal {
            if form.id.as_str() == user.id {
                form.refresh(user);
            }
        }
    }

    pub fn on_user_deleted(&mut self, id: &str) {
        if self.delete_confirm.is_armed(id) {
            self.delete_confirm.disarm();
        }
    }
}
