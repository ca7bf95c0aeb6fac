use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::store::Store;
use crate::types::SessionStruct;
use crate::utils::new_token;

/// Issued tokens live only in memory; a restart logs everybody out.
pub struct AppState {
    pub store: Arc<dyn Store>,
    sessions: Mutex<HashMap<String, SessionStruct>>,
    token_ttl: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, token_ttl_hours: i64) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    pub fn open_session(&self, idu: i64) -> String {
        let token = new_token();
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(token.clone(), SessionStruct::new(idu, Utc::now() + self.token_ttl));
        }
        token
    }

    /// Owner of a live token. Expired tokens are dropped on sight.
    pub fn authorize(&self, token: &str) -> Option<i64> {
        let mut sessions = self.sessions.lock().ok()?;
        match sessions.get(token) {
            Some(session) if session.is_expired(Utc::now()) => {
                sessions.remove(token);
                None
            }
            Some(session) => Some(session.idu),
            None => None,
        }
    }

    pub fn purge_sessions(&self) -> usize {
        let now = Utc::now();
        match self.sessions.lock() {
            Ok(mut sessions) => {
                let before = sessions.len();
                sessions.retain(|_, session| !session.is_expired(now));
                before - sessions.len()
            }
            Err(_) => 0,
        }
    }
}
