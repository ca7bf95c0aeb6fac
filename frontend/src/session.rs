use std::rc::Rc;

use futures_signals::signal::{Mutable, Signal};
use futures_signals::signal_vec::MutableVec;

use crate::storage::TokenStore;
use crate::types::Note;

/// The one piece of shared mutable state: the bearer token plus the note
/// list cached under it.
///
/// Built once at startup from durable storage and handed to everything that
/// talks to the API. Only login, logout and the 401 interception in
/// [`crate::connect_fetch::ApiClient::call`] write to it.
#[derive(Clone)]
pub struct Session {
    token: Mutable<Option<String>>,
    notes: MutableVec<Note>,
    store: Rc<dyn TokenStore>,
}

impl Session {
    /// A stored token counts as a live session until the server says
    /// otherwise.
    pub fn restore(store: Rc<dyn TokenStore>) -> Self {
        let token = store.load();
        if token.is_some() {
            log::info!("session restored from storage");
        }
        Self {
            token: Mutable::new(token),
            notes: MutableVec::new(),
            store,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get_cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.lock_ref().is_some()
    }

    pub fn authenticated_signal(&self) -> impl Signal<Item=bool> {
        self.token.signal_ref(|token| token.is_some())
    }

    pub fn notes(&self) -> &MutableVec<Note> {
        &self.notes
    }

    pub fn establish(&self, token: String) {
        self.store.save(&token);
        self.token.set(Some(token));
    }

    /// Drops the token from memory and storage and forgets the cached notes.
    pub fn end(&self) {
        self.token.set(None);
        self.store.clear();
        self.notes.lock_mut().clear();
    }
}
