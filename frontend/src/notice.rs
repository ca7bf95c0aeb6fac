use futures_signals::signal::Mutable;
use futures_signals::signal_vec::{MutableVec, SignalVec};

use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// User-facing notifications, newest last. Rendering and dismissal
/// timing belong to the UI.
#[derive(Clone)]
pub struct Notices {
    list: MutableVec<Notice>,
    next_id: Mutable<u64>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            list: MutableVec::new(),
            next_id: Mutable::new(0),
        }
    }

    pub fn push(&self, level: NoticeLevel, text: impl Into<String>) -> u64 {
        let text = text.into();
        match level {
            NoticeLevel::Error => log::warn!("notice: {text}"),
            _ => log::info!("notice: {text}"),
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.list.lock_mut().push_cloned(Notice { id, level, text });
        id
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn report(&self, err: &ActionError) {
        self.push(err.level(), err.to_string());
    }

    pub fn dismiss(&self, id: u64) {
        self.list.lock_mut().retain(|notice| notice.id != id);
    }

    pub fn signal_vec(&self) -> impl SignalVec<Item=Notice> {
        self.list.signal_vec_cloned()
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.list.lock_ref().to_vec()
    }
}
