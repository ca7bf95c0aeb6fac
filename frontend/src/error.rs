use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::notice::NoticeLevel;

pub const MESSAGE_SESSION_EXPIRED: &str = "Session expired. You were logged out.";

/// Failure below HTTP: nothing usable came back from the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<JsValue> for FetchError {
    fn from(err: JsValue) -> Self {
        FetchError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

/// Why a user action did not go through. Every variant ends up as exactly
/// one notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("{0}")]
    Rejected(String),
    #[error("{}", MESSAGE_SESSION_EXPIRED)]
    SessionExpired,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ActionError {
    pub fn level(&self) -> NoticeLevel {
        match self {
            ActionError::Invalid(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }
}
