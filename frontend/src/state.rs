use std::rc::Rc;

use futures_signals::signal::Mutable;

use crate::account::Account;
use crate::config::ClientConfig;
use crate::connect_fetch::{ApiClient, FetchTransport, Transport};
use crate::notes::notes_client::NotesClient;
use crate::notice::Notices;
use crate::session::Session;
use crate::storage::{LocalStorage, TokenStore};

/// Everything the UI needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub notices: Notices,
    pub account: Account,
    pub notes: NotesClient,
}

impl AppState {
    pub fn new(config: &ClientConfig, transport: Rc<dyn Transport>, store: Rc<dyn TokenStore>) -> Self {
        let session = Session::restore(store);
        let notices = Notices::new();
        let client = ApiClient::new(&config.api_base, transport, session.clone());
        let notes = NotesClient::new(client.clone(), notices.clone());
        let account = Account::new(client, notes.clone(), notices.clone());
        Self {
            session,
            notices,
            account,
            notes,
        }
    }

    pub fn browser(config: &ClientConfig) -> Self {
        Self::new(config, Rc::new(FetchTransport), Rc::new(LocalStorage::new(config.storage_key)))
    }
}

/// Holds a loading flag up for as long as it lives.
pub struct Busy<'a>(&'a Mutable<bool>);

impl<'a> Busy<'a> {
    pub fn start(flag: &'a Mutable<bool>) -> Self {
        flag.set_neq(true);
        Self(flag)
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.set_neq(false);
    }
}
