use futures_signals::signal::Mutable;

use shared::constants::{path_login, path_register};
use shared::types::{Credentials, LoginResponse};

use crate::connect_fetch::{json_body, ApiClient, Method};
use crate::error::{ActionError, FetchError};
use crate::notes::notes_client::NotesClient;
use crate::notice::Notices;
use crate::session::Session;
use crate::state::Busy;

const MESSAGE_MISSING_CREDENTIALS: &str = "Enter email/password";
const MESSAGE_REGISTER_FAILED: &str = "Register failed";
const MESSAGE_LOGIN_FAILED: &str = "Login failed";

/// Session manager: register, login, logout. Failures never escape; they
/// are turned into notices.
#[derive(Clone)]
pub struct Account {
    client: ApiClient,
    notes: NotesClient,
    notices: Notices,
    pub auth_loading: Mutable<bool>,
}

impl Account {
    pub fn new(client: ApiClient, notes: NotesClient, notices: Notices) -> Self {
        Self {
            client,
            notes,
            notices,
            auth_loading: Mutable::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Registration leaves the session alone; the user logs in afterwards.
    pub async fn register(&self, email: &str, password: &str) {
        match self.try_register(email, password).await {
            Ok(()) => self.notices.success("Registered, now log in"),
            Err(err) => self.notices.report(&err),
        }
    }

    async fn try_register(&self, email: &str, password: &str) -> Result<(), ActionError> {
        let body = json_body(&credentials(email, password)?)?;
        let _busy = Busy::start(&self.auth_loading);
        let response = self.client.send(Method::Post, &path_register(), Some(body)).await?;
        if !response.is_success() {
            return Err(ActionError::Rejected(
                response.error_message().unwrap_or_else(|| MESSAGE_REGISTER_FAILED.to_string()),
            ));
        }
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) {
        match self.try_login(email, password).await {
            Ok(()) => {
                self.notices.success("Logged in");
                self.notes.list_notes().await;
            }
            Err(err) => self.notices.report(&err),
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<(), ActionError> {
        let body = json_body(&credentials(email, password)?)?;
        let _busy = Busy::start(&self.auth_loading);
        let response = self.client.send(Method::Post, &path_login(), Some(body)).await?;
        if !response.is_success() {
            return Err(ActionError::Rejected(
                response.error_message().unwrap_or_else(|| MESSAGE_LOGIN_FAILED.to_string()),
            ));
        }
        let data: LoginResponse = response.json()?;
        if data.access_token.is_empty() {
            return Err(FetchError::Decode("missing access token".to_string()).into());
        }
        self.session().establish(data.access_token);
        log::info!("logged in");
        Ok(())
    }

    pub fn logout(&self) {
        self.session().end();
        self.notices.info("Logged out");
    }
}

fn credentials(email: &str, password: &str) -> Result<Credentials, ActionError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ActionError::Invalid(MESSAGE_MISSING_CREDENTIALS));
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
