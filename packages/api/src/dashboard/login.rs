//! Login and registration.
//!
//! Messages here stay on screen for the longer auth window, and failures are
//! described by status rather than with a fixed text: the user needs to tell
//! a typo from a server that is down.

use store::{KeyValueStore, Role};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::lifecycle::{Lifecycle, MutationError, NoticeLevel, Reconcile, ViewCell};
use crate::models::{BloodGroup, LoginRequest, Registration};
use crate::transport::Transport;

pub const INVALID_CREDENTIALS: &str =
    "Sign-in error: the credentials are incorrect or not authorized.";
pub const UNREACHABLE: &str = "Network error: unable to reach the server. Check the API URL.";
pub const UNKNOWN_FAILURE: &str = "An unknown error occurred. Please check your input.";
pub const REGISTERED: &str = "Account created successfully! Please sign in now.";

/// Characters of a 400 body echoed back to the user.
const BODY_EXCERPT: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

/// Every field of the combined form; only the selected role's extras are sent.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub blood_group: BloodGroup,
    pub date_of_birth: String,
    pub professional_id: String,
    pub hospital: String,
    pub bank_name: String,
    pub location: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Role::Donor,
            name: String::new(),
            blood_group: BloodGroup::OPositive,
            date_of_birth: String::new(),
            professional_id: String::new(),
            hospital: String::new(),
            bank_name: String::new(),
            location: String::new(),
        }
    }
}

impl LoginForm {
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        }
    }

    pub fn registration(&self) -> Registration {
        match self.role {
            Role::Donor => Registration::Donor {
                name: self.name.trim().to_string(),
                blood_group: self.blood_group,
                date_of_birth: self.date_of_birth.clone(),
            },
            Role::Doctor => Registration::Doctor {
                professional_id: self.professional_id.trim().to_string(),
                hospital: self.hospital.trim().to_string(),
            },
            Role::BloodBank => Registration::BloodBank {
                bank_name: self.bank_name.trim().to_string(),
                location: self.location.trim().to_string(),
            },
        }
    }

    /// Blank everything but the selected role.
    fn clear(&mut self) {
        *self = Self {
            role: self.role,
            ..Self::default()
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginModel {
    pub mode: AuthMode,
    pub form: LoginForm,
}

/// User-facing text for a failed login or registration.
pub fn describe_auth_error(err: &ApiError) -> String {
    let detail = match err {
        ApiError::Rejected { status: 400, body } => {
            let raw = body.to_string();
            let excerpt: String = raw.chars().take(BODY_EXCERPT).collect();
            format!("ERROR 400 (Bad Request): the server rejected the data. Response: {excerpt}...")
        }
        ApiError::Rejected {
            status: 401 | 403, ..
        }
        | ApiError::Unauthorized { .. } => INVALID_CREDENTIALS.to_string(),
        ApiError::Transport(_) => UNREACHABLE.to_string(),
        other => other
            .server_message()
            .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
    };
    format!("Error: {detail}")
}

#[derive(Clone, Debug)]
pub struct LoginView<T, S, C> {
    client: ApiClient<T>,
    lifecycle: Lifecycle<S, C>,
}

impl<T, S, C> LoginView<T, S, C>
where
    T: Transport,
    S: KeyValueStore,
    C: ViewCell<Model = LoginModel>,
{
    /// Auth notices use the auth window regardless of level.
    pub fn new(client: ApiClient<T>, lifecycle: Lifecycle<S, C>) -> Self {
        let timing = lifecycle.timing().for_auth();
        Self {
            client,
            lifecycle: lifecycle.with_timing(timing),
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, C> {
        &self.lifecycle
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut LoginForm)) {
        self.lifecycle
            .cell()
            .update(|view| edit(&mut view.model.form));
    }

    pub fn set_mode(&self, mode: AuthMode) {
        self.lifecycle.cell().update(|view| {
            view.model.mode = mode;
            view.notice = None;
        });
    }

    /// Submit whichever mode is showing.
    pub async fn submit(&self) -> Result<(), MutationError> {
        match self.lifecycle.cell().snapshot().model.mode {
            AuthMode::SignIn => self.sign_in().await.map(|_| ()),
            AuthMode::Register => self.register().await,
        }
    }

    /// Exchange the form's credentials for a token pair, store it and head
    /// to the role's dashboard after the redirect delay.
    pub async fn sign_in(&self) -> Result<Role, MutationError> {
        let form = self.lifecycle.cell().snapshot().model.form;
        let request = form.login_request();

        let mut credential = self
            .lifecycle
            .mutate_with(
                Reconcile::Pessimistic,
                self.client.login(&request),
                |model, _| model.form.password.clear(),
                describe_auth_error,
            )
            .await?;

        // An unrecognised role in the reply falls back to the one claimed.
        let role = credential.role.unwrap_or(form.role);
        credential.role = Some(role);
        self.lifecycle.session().establish(&credential).await;
        tracing::info!("signed in as {role}");
        self.lifecycle.notify(
            NoticeLevel::Success,
            format!("Signed in as {}!", role.as_tag().to_uppercase()),
        );
        self.lifecycle.redirect(role.home_path());
        Ok(role)
    }

    /// Create an account for the selected role, then switch to sign-in.
    pub async fn register(&self) -> Result<(), MutationError> {
        let form = self.lifecycle.cell().snapshot().model.form;
        let registration = form.registration();

        self.lifecycle
            .mutate_with(
                Reconcile::Pessimistic,
                self.client
                    .register(form.email.trim(), &form.password, &registration),
                |model, _| {
                    model.form.clear();
                    model.mode = AuthMode::SignIn;
                },
                describe_auth_error,
            )
            .await?;

        self.lifecycle.notify(NoticeLevel::Success, REGISTERED);
        Ok(())
    }
}
