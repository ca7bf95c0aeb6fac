use std::sync::Mutex;

use chrono::Utc;
use deadpool_postgres::{Pool, PoolError};
use futures_util::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use crate::config::DBParams;
use crate::db::{db_init, db_pool};
use crate::db_notes::{db_notes_insert, db_notes_remove, db_notes_select};
use crate::db_user::{db_user_insert, db_user_login};
use crate::types::{DBNote, DBUser};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres: {0}")]
    Db(#[from] tokio_postgres::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("no row returned for {0}")]
    Missing(&'static str),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Users and their notes. Every note operation is scoped to the owner `idu`.
pub trait Store: Send + Sync {
    /// `None` when the email is already registered.
    fn create_user<'a>(&'a self, email: &'a str, password_hash: &'a str, salt: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>>;
    fn find_user<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>>;
    /// Newest first.
    fn list_notes(&self, idu: i64) -> BoxFuture<'_, Result<Vec<DBNote>, StoreError>>;
    fn create_note<'a>(&'a self, idu: i64, text: &'a str) -> BoxFuture<'a, Result<DBNote, StoreError>>;
    /// `false` when no such note belongs to `idu`.
    fn delete_note(&self, idu: i64, idn: i64) -> BoxFuture<'_, Result<bool, StoreError>>;
}

pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub async fn connect(params: &DBParams) -> Result<Self, StoreError> {
        let pool = db_pool(params)?;
        db_init(&pool).await?;
        tracing::info!("connected to postgres at {}:{}/{}", params.host, params.port, params.db);
        Ok(Self { pool })
    }
}

impl Store for PgStore {
    fn create_user<'a>(&'a self, email: &'a str, password_hash: &'a str, salt: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>> {
        db_user_insert(&self.pool, email, password_hash, salt).boxed()
    }

    fn find_user<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>> {
        db_user_login(&self.pool, email).boxed()
    }

    fn list_notes(&self, idu: i64) -> BoxFuture<'_, Result<Vec<DBNote>, StoreError>> {
        db_notes_select(&self.pool, idu).boxed()
    }

    fn create_note<'a>(&'a self, idu: i64, text: &'a str) -> BoxFuture<'a, Result<DBNote, StoreError>> {
        db_notes_insert(&self.pool, idu, text).boxed()
    }

    fn delete_note(&self, idu: i64, idn: i64) -> BoxFuture<'_, Result<bool, StoreError>> {
        db_notes_remove(&self.pool, idu, idn).boxed()
    }
}

#[derive(Default)]
struct MemoryData {
    users: Vec<DBUser>,
    notes: Vec<(i64, DBNote)>,
    last_idu: i64,
    last_idn: i64,
}

/// Process-local store, used when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    fn with_data<R>(&self, f: impl FnOnce(&mut MemoryData) -> R) -> Result<R, StoreError> {
        match self.data.lock() {
            Ok(mut data) => Ok(f(&mut data)),
            Err(_) => Err(StoreError::Poisoned),
        }
    }
}

impl Store for MemoryStore {
    fn create_user<'a>(&'a self, email: &'a str, password_hash: &'a str, salt: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>> {
        let result = self.with_data(|data| {
            if data.users.iter().any(|user| user.email == email) {
                return None;
            }
            data.last_idu += 1;
            let user = DBUser {
                idu: data.last_idu,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                salt: salt.to_string(),
            };
            data.users.push(user.clone());
            Some(user)
        });
        future::ready(result).boxed()
    }

    fn find_user<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<Option<DBUser>, StoreError>> {
        let result = self.with_data(|data| data.users.iter().find(|user| user.email == email).cloned());
        future::ready(result).boxed()
    }

    fn list_notes(&self, idu: i64) -> BoxFuture<'_, Result<Vec<DBNote>, StoreError>> {
        let result = self.with_data(|data| {
            let mut notes = data.notes.iter()
                .filter(|(owner, _)| *owner == idu)
                .map(|(_, note)| note.clone())
                .collect::<Vec<_>>();
            notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.idn.cmp(&a.idn)));
            notes
        });
        future::ready(result).boxed()
    }

    fn create_note<'a>(&'a self, idu: i64, text: &'a str) -> BoxFuture<'a, Result<DBNote, StoreError>> {
        let result = self.with_data(|data| {
            data.last_idn += 1;
            let note = DBNote {
                idn: data.last_idn,
                text: text.to_string(),
                created_at: Utc::now(),
            };
            data.notes.push((idu, note.clone()));
            note
        });
        future::ready(result).boxed()
    }

    fn delete_note(&self, idu: i64, idn: i64) -> BoxFuture<'_, Result<bool, StoreError>> {
        let result = self.with_data(|data| {
            let before = data.notes.len();
            data.notes.retain(|(owner, note)| !(*owner == idu && note.idn == idn));
            data.notes.len() < before
        });
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let store = MemoryStore::default();
        assert!(store.create_user("a@b.c", "h", "s").await.unwrap().is_some());
        assert!(store.create_user("a@b.c", "h2", "s2").await.unwrap().is_none());
        assert_eq!(store.find_user("a@b.c").await.unwrap().unwrap().password_hash, "h");
    }

    #[tokio::test]
    async fn notes_are_scoped_and_newest_first() {
        let store = MemoryStore::default();
        let first = store.create_note(1, "first").await.unwrap();
        let second = store.create_note(1, "second").await.unwrap();
        store.create_note(2, "other").await.unwrap();

        let ids = store.list_notes(1).await.unwrap().iter().map(|n| n.idn).collect::<Vec<_>>();
        assert_eq!(ids, vec![second.idn, first.idn]);

        assert!(!store.delete_note(2, first.idn).await.unwrap());
        assert!(store.delete_note(1, first.idn).await.unwrap());
        assert_eq!(store.list_notes(1).await.unwrap().len(), 1);
    }
}
