use futures_signals::signal::Mutable;
use futures_signals::signal_vec::MutableVec;

use shared::constants::{path_note, path_notes};
use shared::types::{NewNote, NoteSource};

use crate::connect_fetch::{json_body, ApiClient, Method};
use crate::error::ActionError;
use crate::notice::Notices;
use crate::state::Busy;
use crate::types::Note;

const MESSAGE_EMPTY_NOTE: &str = "Type a note";
const MESSAGE_LOAD_FAILED: &str = "Failed to load notes";
const MESSAGE_ADD_FAILED: &str = "Failed to add";
const MESSAGE_DELETE_FAILED: &str = "Delete failed";

/// Authenticated note operations. The cached list is never patched locally:
/// every successful mutation is followed by a full [`NotesClient::list_notes`].
#[derive(Clone)]
pub struct NotesClient {
    client: ApiClient,
    notices: Notices,
    pub loading: Mutable<bool>,
    pub draft: Mutable<String>,
}

impl NotesClient {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            loading: Mutable::new(false),
            draft: Mutable::new(String::new()),
        }
    }

    pub fn notes(&self) -> &MutableVec<Note> {
        self.client.session().notes()
    }

    pub async fn list_notes(&self) {
        if let Err(err) = self.try_list_notes().await {
            self.notices.report(&err);
        }
    }

    async fn try_list_notes(&self) -> Result<(), ActionError> {
        let token = match self.client.session().token() {
            Some(token) => token,
            None => return Ok(()),
        };
        let _busy = Busy::start(&self.loading);
        let response = self.client.call(Method::Get, &path_notes(), None).await.into_result()?;
        if !response.is_success() {
            return Err(ActionError::Rejected(MESSAGE_LOAD_FAILED.to_string()));
        }
        let data: Vec<NoteSource> = response.json()?;

        // a logout or re-login happened while this request was in flight
        if self.client.session().token().as_deref() != Some(token.as_str()) {
            log::debug!("dropping note list fetched under a previous session");
            return Ok(());
        }
        self.notes().lock_mut().replace_cloned(data.into_iter().map(Note::from).collect());
        Ok(())
    }

    pub async fn create_note(&self, text: &str) {
        match self.try_create_note(text).await {
            Ok(()) => {
                self.draft.set(String::new());
                self.list_notes().await;
            }
            Err(err) => self.notices.report(&err),
        }
    }

    async fn try_create_note(&self, text: &str) -> Result<(), ActionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ActionError::Invalid(MESSAGE_EMPTY_NOTE));
        }
        let body = json_body(&NewNote { text: text.to_string() })?;
        let response = self.client.call(Method::Post, &path_notes(), Some(body)).await.into_result()?;
        if !response.is_success() {
            return Err(ActionError::Rejected(
                response.error_message().unwrap_or_else(|| MESSAGE_ADD_FAILED.to_string()),
            ));
        }
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) {
        match self.try_delete_note(id).await {
            Ok(()) => self.list_notes().await,
            Err(err) => self.notices.report(&err),
        }
    }

    async fn try_delete_note(&self, id: i64) -> Result<(), ActionError> {
        let response = self.client.call(Method::Delete, &path_note(id), None).await.into_result()?;
        if !response.is_success() {
            return Err(ActionError::Rejected(MESSAGE_DELETE_FAILED.to_string()));
        }
        Ok(())
    }
}
