use chrono::{DateTime, SecondsFormat, Utc};
use tokio_postgres::Row;

use shared::types::{NoteSource, UserView};

#[derive(Clone, Debug)]
pub struct SessionStruct {
    pub idu: i64,
    pub expires: DateTime<Utc>,
}

impl SessionStruct {
    pub fn new(idu: i64, expires: DateTime<Utc>) -> Self {
        Self { idu, expires }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

#[derive(Clone, Debug)]
pub struct DBUser {
    pub idu: i64,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
}

impl From<Row> for DBUser {
    fn from(row: Row) -> Self {
        Self {
            idu: row.get("idu"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            salt: row.get("salt"),
        }
    }
}

impl From<&DBUser> for UserView {
    fn from(user: &DBUser) -> Self {
        Self {
            id: user.idu,
            email: user.email.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DBNote {
    pub idn: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Row> for DBNote {
    fn from(row: Row) -> Self {
        Self {
            idn: row.get("idn"),
            text: row.get("text"),
            created_at: row.get("created_at"),
        }
    }
}

impl From<DBNote> for NoteSource {
    fn from(note: DBNote) -> Self {
        Self {
            id: note.idn,
            text: note.text,
            created_at: Some(note.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DBIdn {
    pub idn: i64,
}

impl From<Row> for DBIdn {
    fn from(row: Row) -> Self {
        Self {
            idn: row.get("idn"),
        }
    }
}
